//! Error reporting shared by every codec stage.

use thiserror::Error;

use crate::ColorType;

/// Trait for errors raised by one stage of the codec (image, audio, pipeline).
///
/// Each stage keeps its own error enum; this trait lets reporting code treat
/// them uniformly.
///
/// ```ignore
/// use pixtone_spec::StageError;
///
/// fn report<E: StageError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait StageError: std::error::Error {
    /// Stable error code such as "IMAGE_003" or "AUDIO_001".
    fn code(&self) -> &'static str;

    /// Human-readable message, usually the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category: "image", "audio" or "codec".
    fn category(&self) -> &'static str;
}

/// A channel buffer that does not match the declared image layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Buffer length differs from width * height * bytes-per-pixel.
    #[error("{width}x{height} {color_type} image needs {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Declared color type.
        color_type: ColorType,
        /// Required byte count.
        expected: usize,
        /// Supplied byte count.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = LayoutError::LengthMismatch {
            width: 2,
            height: 2,
            color_type: ColorType::Rgb,
            expected: 12,
            actual: 11,
        };
        let msg = err.to_string();
        assert!(msg.contains("2x2 rgb"));
        assert!(msg.contains("12"));
        assert!(msg.contains("11"));
    }
}
