//! WAV file format parameters.

use crate::error::{AudioError, AudioResult};

/// PCM format code in the `fmt ` chunk.
pub(crate) const FORMAT_PCM: u16 = 1;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit mono at `sample_rate`, the only layout the codec writes.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Bytes per sample frame.
    ///
    /// Computed in `u32` so any `fmt ` header fits; the writer checks the
    /// 16-bit header field.
    pub fn block_align(&self) -> u32 {
        u32::from(self.channels) * u32::from(self.bytes_per_sample())
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u64 {
        u64::from(self.sample_rate) * u64::from(self.block_align())
    }

    /// Checks that this is 16-bit mono at `sample_rate`.
    pub fn ensure_mono16(&self, sample_rate: u32) -> AudioResult<()> {
        if self.channels != 1 {
            return Err(AudioError::unsupported("channel count", 1, self.channels as u32));
        }
        if self.bits_per_sample != 16 {
            return Err(AudioError::unsupported(
                "bits per sample",
                16,
                self.bits_per_sample as u32,
            ));
        }
        if self.sample_rate != sample_rate {
            return Err(AudioError::unsupported(
                "sample rate",
                sample_rate,
                self.sample_rate,
            ));
        }
        Ok(())
    }
}
