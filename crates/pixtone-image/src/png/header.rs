//! IHDR payload: width, height, bit depth, color type, compression, filter, interlace.

use pixtone_spec::{ColorType, Image};

use crate::error::{ImageError, ImageResult};

/// Length of the IHDR payload.
pub(crate) const IHDR_LEN: usize = 13;

/// Parsed IHDR fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per channel.
    pub bit_depth: u8,
    /// Raw color type code.
    pub color_type: u8,
    /// Compression method (0 = deflate).
    pub compression_method: u8,
    /// Filter method (0 = adaptive five-filter set).
    pub filter_method: u8,
    /// Interlace method (0 = none).
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Header for writing `image`.
    pub fn for_image(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            bit_depth: 8,
            color_type: image.color_type().code(),
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    /// Parses a 13-byte IHDR payload.
    pub fn parse(data: &[u8]) -> ImageResult<Self> {
        if data.len() != IHDR_LEN {
            return Err(ImageError::format(format!(
                "IHDR chunk must be {} bytes, got {}",
                IHDR_LEN,
                data.len()
            )));
        }

        let header = Self {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: data[9],
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        };

        if header.width == 0 || header.height == 0 {
            return Err(ImageError::format(format!(
                "invalid dimensions {}x{}",
                header.width, header.height
            )));
        }

        Ok(header)
    }

    /// Checks the header against the supported subset and returns the color type.
    pub fn supported_color_type(&self) -> ImageResult<ColorType> {
        if self.bit_depth != 8 {
            return Err(ImageError::UnsupportedFormat {
                field: "bit depth",
                value: self.bit_depth,
            });
        }
        let color_type =
            ColorType::from_code(self.color_type).ok_or(ImageError::UnsupportedFormat {
                field: "color type",
                value: self.color_type,
            })?;
        if self.compression_method != 0 {
            return Err(ImageError::UnsupportedFormat {
                field: "compression method",
                value: self.compression_method,
            });
        }
        if self.filter_method != 0 {
            return Err(ImageError::UnsupportedFormat {
                field: "filter method",
                value: self.filter_method,
            });
        }
        if self.interlace_method != 0 {
            return Err(ImageError::UnsupportedFormat {
                field: "interlace method",
                value: self.interlace_method,
            });
        }
        Ok(color_type)
    }

    /// Serializes to the 13-byte IHDR payload.
    pub fn to_bytes(&self) -> [u8; IHDR_LEN] {
        let mut out = [0u8; IHDR_LEN];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type;
        out[10] = self.compression_method;
        out[11] = self.filter_method;
        out[12] = self.interlace_method;
        out
    }
}
