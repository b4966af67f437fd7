//! Error types for the image codec.

use pixtone_spec::{LayoutError, StageError};
use thiserror::Error;

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors that can occur while reading or writing PNG data.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Structural problem: bad signature, IHDR not first, missing IDAT,
    /// chunk running past the end of the buffer.
    #[error("malformed PNG: {reason}")]
    Format {
        /// What was wrong.
        reason: String,
    },

    /// A header field outside the supported set.
    #[error("unsupported PNG {field}: {value}")]
    UnsupportedFormat {
        /// IHDR field name.
        field: &'static str,
        /// Value found in the file.
        value: u8,
    },

    /// The concatenated IDAT stream is not valid zlib/DEFLATE.
    #[error("IDAT decompression failed: {message}")]
    Decompression {
        /// Decompressor status.
        message: String,
    },

    /// Decompressed scanline data shorter than the header implies.
    #[error("decompressed image data too short: expected {expected} bytes, got {actual}")]
    TruncatedData {
        /// Bytes required by width, height and color type.
        expected: usize,
        /// Bytes produced by the decompressor.
        actual: usize,
    },

    /// A scanline starts with a filter byte outside 0..=4.
    #[error("invalid filter type {value} on scanline {row}")]
    InvalidFilterType {
        /// Zero-based scanline index.
        row: u32,
        /// Filter byte found.
        value: u8,
    },

    /// Stored chunk CRC differs from the computed one.
    #[error("CRC mismatch in {chunk} chunk: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch {
        /// Chunk type as text.
        chunk: String,
        /// CRC stored in the file.
        expected: u32,
        /// CRC computed over type and data.
        actual: u32,
    },

    /// Image value cannot be written (zero size or wrong buffer length).
    #[error("invalid image layout: {0}")]
    InvalidDimensions(#[from] LayoutError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageError {
    /// Creates a format error.
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}

impl StageError for ImageError {
    fn code(&self) -> &'static str {
        match self {
            ImageError::Format { .. } => "IMAGE_001",
            ImageError::UnsupportedFormat { .. } => "IMAGE_002",
            ImageError::Decompression { .. } => "IMAGE_003",
            ImageError::TruncatedData { .. } => "IMAGE_004",
            ImageError::InvalidFilterType { .. } => "IMAGE_005",
            ImageError::ChecksumMismatch { .. } => "IMAGE_006",
            ImageError::InvalidDimensions(_) => "IMAGE_007",
            ImageError::Io(_) => "IMAGE_008",
        }
    }

    fn category(&self) -> &'static str {
        "image"
    }
}
