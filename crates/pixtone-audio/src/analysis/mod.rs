//! Dominant-frequency estimation for single-tone PCM segments.
//!
//! The primary estimator times zero crossings, which is cheap and accurate
//! once a segment holds a few cycles. Segments with too few crossings fall
//! back to a brute-force DFT magnitude search. Estimation never fails: a
//! segment whose peak stays under the amplitude threshold reads as 0 Hz,
//! matching the synthesizer's silent tone.

mod dft;
mod zero_crossing;

#[cfg(test)]
mod tests;

use std::fmt;

use pixtone_spec::CodecParams;

pub use dft::{dominant_frequency, dominant_frequency_on_grid};
pub use zero_crossing::{count_crossings, Crossings};

use crate::wav::pcm16_to_samples;

/// Which path produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimateMethod {
    /// Peak under the amplitude threshold.
    Silence,
    /// Timed zero crossings.
    ZeroCrossing,
    /// Too few crossings; DFT magnitude search.
    DftFallback,
}

impl EstimateMethod {
    /// Lowercase name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateMethod::Silence => "silence",
            EstimateMethod::ZeroCrossing => "zero-crossing",
            EstimateMethod::DftFallback => "dft-fallback",
        }
    }
}

impl fmt::Display for EstimateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated frequency of one segment plus the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEstimate {
    /// Estimated frequency in Hz; 0 for silence.
    pub hz: f64,
    /// Peak absolute sample value.
    pub max_amplitude: u16,
    /// Sign changes among samples at or above the threshold.
    pub zero_crossings: usize,
    /// Path that produced `hz`.
    pub method: EstimateMethod,
}

impl FrequencyEstimate {
    fn silence(max_amplitude: u16) -> Self {
        Self {
            hz: 0.0,
            max_amplitude,
            zero_crossings: 0,
            method: EstimateMethod::Silence,
        }
    }
}

/// Zero-crossing frequency estimator with a DFT fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyAnalyzer {
    sample_rate: u32,
    amplitude_threshold: u16,
    min_zero_crossings: usize,
}

impl FrequencyAnalyzer {
    /// Default amplitude threshold in i16 units.
    pub const DEFAULT_THRESHOLD: u16 = 50;
    /// Default number of crossings needed to trust the crossing estimate.
    pub const DEFAULT_MIN_CROSSINGS: usize = 4;

    /// Creates an analyzer with the default threshold and crossing count.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            amplitude_threshold: Self::DEFAULT_THRESHOLD,
            min_zero_crossings: Self::DEFAULT_MIN_CROSSINGS,
        }
    }

    /// Creates an analyzer matching a codec parameter set.
    pub fn from_params(params: &CodecParams) -> Self {
        Self {
            sample_rate: params.sample_rate,
            amplitude_threshold: params.amplitude_threshold,
            min_zero_crossings: params.min_zero_crossings.max(2),
        }
    }

    /// Sets the amplitude threshold.
    pub fn with_threshold(mut self, threshold: u16) -> Self {
        self.amplitude_threshold = threshold;
        self
    }

    /// Sets the minimum crossing count (at least 2).
    pub fn with_min_crossings(mut self, count: usize) -> Self {
        self.min_zero_crossings = count.max(2);
        self
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Estimates the dominant frequency of `samples`. When the DFT fallback
    /// runs it searches the bins `k·sample_rate/N` up to `max_hz`.
    pub fn estimate(&self, samples: &[i16], max_hz: f64) -> FrequencyEstimate {
        self.estimate_with(samples, max_hz, |segment| {
            dominant_frequency(segment, self.sample_rate, max_hz)
        })
    }

    /// Like [`estimate`](Self::estimate), but the DFT fallback only evaluates
    /// multiples of `step_hz` up to `max_hz`.
    ///
    /// Used for long segments whose tone is known to sit on a grid, such as
    /// the dimension markers.
    pub fn estimate_on_grid(&self, samples: &[i16], step_hz: f64, max_hz: f64) -> FrequencyEstimate {
        self.estimate_with(samples, max_hz, |segment| {
            dominant_frequency_on_grid(segment, self.sample_rate, step_hz, max_hz)
        })
    }

    fn estimate_with(
        &self,
        samples: &[i16],
        max_hz: f64,
        fallback: impl FnOnce(&[i16]) -> f64,
    ) -> FrequencyEstimate {
        let max_amplitude = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
        if max_amplitude < self.amplitude_threshold || self.sample_rate == 0 {
            return FrequencyEstimate::silence(max_amplitude);
        }

        let crossings = count_crossings(samples, self.amplitude_threshold);
        if crossings.count >= self.min_zero_crossings {
            if let Some(hz) = crossings.frequency(self.sample_rate) {
                return FrequencyEstimate {
                    hz,
                    max_amplitude,
                    zero_crossings: crossings.count,
                    method: EstimateMethod::ZeroCrossing,
                };
            }
        }

        let hz = fallback(samples);
        log::debug!(
            "{} crossings in {} samples; DFT fallback up to {:.1} Hz found {:.1} Hz",
            crossings.count,
            samples.len(),
            max_hz,
            hz
        );

        FrequencyEstimate {
            hz,
            max_amplitude,
            zero_crossings: crossings.count,
            method: EstimateMethod::DftFallback,
        }
    }

    /// Same as [`estimate`](Self::estimate) on little-endian 16-bit PCM bytes.
    pub fn estimate_pcm(&self, pcm: &[u8], max_hz: f64) -> FrequencyEstimate {
        self.estimate(&pcm16_to_samples(pcm), max_hz)
    }
}
