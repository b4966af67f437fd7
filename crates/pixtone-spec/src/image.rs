//! Decoded raster image value.

use crate::{ColorType, LayoutError};

/// An 8-bit raster image with channels stored row-major, channel-interleaved.
///
/// Constructed once (by the PNG decoder or the audio analyzer) and treated as
/// an immutable value afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    color_type: ColorType,
    data: Vec<u8>,
}

impl Image {
    /// Creates an image, checking that `data` matches the declared layout.
    pub fn new(
        width: u32,
        height: u32,
        color_type: ColorType,
        data: Vec<u8>,
    ) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::ZeroDimension { width, height });
        }

        let expected = Self::buffer_len(width, height, color_type);
        if data.len() != expected {
            return Err(LayoutError::LengthMismatch {
                width,
                height,
                color_type,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            color_type,
            data,
        })
    }

    /// Creates an image filled with a single value in every channel.
    pub fn filled(width: u32, height: u32, color_type: ColorType, value: u8) -> Result<Self, LayoutError> {
        let len = Self::buffer_len(width, height, color_type);
        Self::new(width, height, color_type, vec![value; len])
    }

    /// Number of bytes a `width` x `height` image of `color_type` occupies.
    pub fn buffer_len(width: u32, height: u32, color_type: ColorType) -> usize {
        width as usize * height as usize * color_type.bytes_per_pixel()
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color type of the channel buffer.
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    /// Flat channel buffer (row-major, channels interleaved).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its channel buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Total number of channel values (width * height * bytes-per-pixel).
    pub fn component_count(&self) -> usize {
        self.data.len()
    }

    /// Bytes in one unfiltered scanline.
    pub fn stride(&self) -> usize {
        self.width as usize * self.color_type.bytes_per_pixel()
    }

    /// Returns row `y` of the channel buffer.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns the channels of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.color_type.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        &self.data[start..start + bpp]
    }

    /// Converts to a grayscale image of perceived brightness.
    ///
    /// Uses `round(0.299 R + 0.587 G + 0.114 B)`; alpha is discarded.
    /// Grayscale images are returned unchanged.
    pub fn to_luminance(&self) -> Image {
        if self.color_type == ColorType::Grayscale {
            return self.clone();
        }

        let bpp = self.color_type.bytes_per_pixel();
        let data = self
            .data
            .chunks_exact(bpp)
            .map(|px| {
                let y = 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect();

        Image {
            width: self.width,
            height: self.height,
            color_type: ColorType::Grayscale,
            data,
        }
    }
}
