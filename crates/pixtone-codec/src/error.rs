//! Error types for the codec pipelines.

use pixtone_audio::AudioError;
use pixtone_image::ImageError;
use pixtone_spec::{LayoutError, ParamsError, StageError};
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from the image->audio and audio->image pipelines.
#[derive(Debug, Error)]
pub enum CodecError {
    /// PNG reading or writing failed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// WAV reading failed.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// The parameter set is unusable.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// Channel bytes do not match the declared dimensions and color type.
    #[error("invalid image layout: {0}")]
    Layout(#[from] LayoutError),

    /// Fewer samples than the two dimension markers need.
    #[error("audio too short: need at least {expected} samples for the dimension markers, got {actual}")]
    TruncatedAudio {
        /// Samples needed for both markers.
        expected: usize,
        /// Samples present.
        actual: usize,
    },

    /// A dimension marker decoded to zero.
    #[error("decoded image size {width}x{height} is empty")]
    EmptyImage {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },

    /// A width or height too large for its marker tone to stay below Nyquist.
    #[error("image {dimension} {value} exceeds the encodable maximum {max}")]
    DimensionOutOfRange {
        /// "width" or "height".
        dimension: &'static str,
        /// Actual size.
        value: u32,
        /// Largest encodable size.
        max: u32,
    },
}

impl StageError for CodecError {
    fn code(&self) -> &'static str {
        match self {
            CodecError::Image(e) => e.code(),
            CodecError::Audio(e) => e.code(),
            CodecError::Params(_) => "CODEC_001",
            CodecError::Layout(_) => "CODEC_002",
            CodecError::TruncatedAudio { .. } => "CODEC_003",
            CodecError::EmptyImage { .. } => "CODEC_004",
            CodecError::DimensionOutOfRange { .. } => "CODEC_005",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            CodecError::Image(e) => e.category(),
            CodecError::Audio(e) => e.category(),
            _ => "codec",
        }
    }
}
