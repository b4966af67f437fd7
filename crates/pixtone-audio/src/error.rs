//! Error types for the audio stage.

use pixtone_spec::StageError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while reading or writing WAV data.
///
/// Frequency analysis never fails; only the container can.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Missing `RIFF`/`WAVE` magic or a header cut short.
    #[error("invalid WAV container: {reason}")]
    InvalidContainer {
        /// What was wrong.
        reason: String,
    },

    /// The `fmt ` chunk describes audio this codec does not handle.
    #[error("unsupported WAV {field}: expected {expected}, found {actual}")]
    UnsupportedAudioFormat {
        /// Format field name.
        field: &'static str,
        /// Value the codec requires.
        expected: u32,
        /// Value found in the file.
        actual: u32,
    },

    /// No `fmt ` chunk before the end of the buffer.
    #[error("WAV file has no fmt chunk")]
    MissingFmtChunk,

    /// No `data` chunk before the end of the buffer.
    #[error("WAV file has no data chunk")]
    MissingDataChunk,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid container error.
    pub fn invalid_container(reason: impl Into<String>) -> Self {
        Self::InvalidContainer {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported(field: &'static str, expected: u32, actual: u32) -> Self {
        Self::UnsupportedAudioFormat {
            field,
            expected,
            actual,
        }
    }
}

impl StageError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidContainer { .. } => "AUDIO_001",
            AudioError::UnsupportedAudioFormat { .. } => "AUDIO_002",
            AudioError::MissingFmtChunk => "AUDIO_003",
            AudioError::MissingDataChunk => "AUDIO_004",
            AudioError::Io(_) => "AUDIO_005",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
