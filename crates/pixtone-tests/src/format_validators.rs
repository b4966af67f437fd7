//! Structural validators for the files the codec writes.
//!
//! These walk the raw bytes on their own instead of calling the codec's
//! readers, so a bug shared by writer and reader still shows up here.

use std::fmt;

use pixtone_image::crc32;

/// A validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// "WAV" or "PNG".
    pub format: &'static str,
    /// What went wrong.
    pub message: String,
    /// Byte offset of the problem, when known.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Error without an offset.
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            offset: None,
        }
    }

    /// Error at a byte offset.
    pub fn at_offset(format: &'static str, message: impl Into<String>, offset: usize) -> Self {
        Self {
            format,
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} error at offset {}: {}", self.format, offset, self.message),
            None => write!(f, "{} error: {}", self.format, self.message),
        }
    }
}

impl std::error::Error for FormatError {}

fn u16_le(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn u32_le(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn u32_be(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// Header fields of a canonical WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Format code (1 = PCM).
    pub audio_format: u16,
    /// Channel count.
    pub channels: u16,
    /// Samples per second.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Sample frames in the data chunk.
    pub num_samples: usize,
}

/// Checks the 44-byte canonical layout the codec writes: RIFF size, `fmt `
/// at offset 12, `data` at offset 36, and consistent rate fields.
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    const F: &str = "WAV";

    if data.len() < 44 {
        return Err(FormatError::new(
            F,
            format!("file too small: {} bytes, need at least 44", data.len()),
        ));
    }
    if &data[0..4] != b"RIFF" {
        return Err(FormatError::at_offset(F, "missing RIFF identifier", 0));
    }
    let riff_size = u32_le(data, 4) as usize;
    if riff_size + 8 != data.len() {
        return Err(FormatError::at_offset(
            F,
            format!("RIFF size {} does not match file length {}", riff_size, data.len()),
            4,
        ));
    }
    if &data[8..12] != b"WAVE" {
        return Err(FormatError::at_offset(F, "missing WAVE identifier", 8));
    }
    if &data[12..16] != b"fmt " || u32_le(data, 16) != 16 {
        return Err(FormatError::at_offset(F, "expected a 16-byte fmt chunk", 12));
    }

    let info_fields = (
        u16_le(data, 20),
        u16_le(data, 22),
        u32_le(data, 24),
        u32_le(data, 28),
        u16_le(data, 32),
        u16_le(data, 34),
    );
    let (audio_format, channels, sample_rate, byte_rate, block_align, bits_per_sample) = info_fields;

    let expected_align = channels as u32 * (bits_per_sample as u32 / 8);
    if block_align as u32 != expected_align {
        return Err(FormatError::at_offset(
            F,
            format!("block align {} should be {}", block_align, expected_align),
            32,
        ));
    }
    if byte_rate != sample_rate * expected_align {
        return Err(FormatError::at_offset(
            F,
            format!("byte rate {} should be {}", byte_rate, sample_rate * expected_align),
            28,
        ));
    }

    if &data[36..40] != b"data" {
        return Err(FormatError::at_offset(F, "expected data chunk", 36));
    }
    let data_size = u32_le(data, 40) as usize;
    if 44 + data_size != data.len() {
        return Err(FormatError::at_offset(
            F,
            format!("data size {} does not match {} payload bytes", data_size, data.len() - 44),
            40,
        ));
    }
    if block_align == 0 || data_size % block_align as usize != 0 {
        return Err(FormatError::at_offset(F, "data is not whole sample frames", 40));
    }

    Ok(WavInfo {
        audio_format,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
        num_samples: data_size / block_align as usize,
    })
}

/// IHDR fields and chunk statistics of a PNG file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngInfo {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Bits per channel.
    pub bit_depth: u8,
    /// PNG color type code.
    pub color_type: u8,
    /// Number of IDAT chunks.
    pub idat_chunks: usize,
    /// Total IDAT payload bytes.
    pub idat_bytes: usize,
}

impl PngInfo {
    /// Channels for the color type.
    pub fn channels(&self) -> u8 {
        match self.color_type {
            0 => 1,
            2 => 3,
            4 => 2,
            6 => 4,
            _ => 1,
        }
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Walks every chunk, checking CRCs and order: IHDR first, at least one
/// IDAT, and IEND last with nothing after it.
pub fn validate_png(data: &[u8]) -> Result<PngInfo, FormatError> {
    const F: &str = "PNG";

    if data.len() < 8 || data[..8] != PNG_SIGNATURE {
        return Err(FormatError::at_offset(F, "invalid signature", 0));
    }

    let mut offset = 8;
    let mut header: Option<(u32, u32, u8, u8)> = None;
    let mut idat_chunks = 0;
    let mut idat_bytes = 0;

    loop {
        if offset + 12 > data.len() {
            return Err(FormatError::at_offset(F, "missing IEND chunk", offset));
        }
        let len = u32_be(data, offset) as usize;
        let kind = &data[offset + 4..offset + 8];
        let body_end = offset + 8 + len;
        if body_end + 4 > data.len() {
            return Err(FormatError::at_offset(F, "chunk runs past end of file", offset));
        }
        let stored_crc = u32_be(data, body_end);
        if crc32(&data[offset + 4..body_end]) != stored_crc {
            return Err(FormatError::at_offset(
                F,
                format!("CRC mismatch in {} chunk", String::from_utf8_lossy(kind)),
                body_end,
            ));
        }
        let body = &data[offset + 8..body_end];

        match kind {
            b"IHDR" => {
                if header.is_some() || offset != 8 {
                    return Err(FormatError::at_offset(F, "IHDR must be the first chunk", offset));
                }
                if len != 13 {
                    return Err(FormatError::at_offset(F, "IHDR must be 13 bytes", offset));
                }
                header = Some((u32_be(body, 0), u32_be(body, 4), body[8], body[9]));
            }
            _ if header.is_none() => {
                return Err(FormatError::at_offset(F, "IHDR must be the first chunk", offset));
            }
            b"IDAT" => {
                idat_chunks += 1;
                idat_bytes += len;
            }
            b"IEND" => {
                if body_end + 4 != data.len() {
                    return Err(FormatError::at_offset(F, "data after IEND", body_end + 4));
                }
                break;
            }
            _ => {}
        }
        offset = body_end + 4;
    }

    let (width, height, bit_depth, color_type) =
        header.ok_or_else(|| FormatError::new(F, "missing IHDR"))?;
    if width == 0 || height == 0 {
        return Err(FormatError::at_offset(F, "zero dimension", 16));
    }
    if idat_chunks == 0 {
        return Err(FormatError::new(F, "no IDAT chunk"));
    }

    Ok(PngInfo {
        width,
        height,
        bit_depth,
        color_type,
        idat_chunks,
        idat_bytes,
    })
}
