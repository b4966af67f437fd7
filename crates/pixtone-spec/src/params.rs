//! Versioned codec parameters.
//!
//! The image->audio and audio->image directions must use identical values;
//! a mismatch silently corrupts the round trip. Parameters therefore travel
//! as one explicit, versioned struct instead of literals duplicated on both
//! sides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only parameter-set version this build understands.
pub const PARAMS_VERSION: u32 = 1;

/// Highest sample rate a parameter set may use.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Highest channel value a tone can encode.
const MAX_CHANNEL_VALUE: f64 = 255.0;

/// Errors from loading or validating a parameter set.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The `version` field names a set this build does not know.
    #[error("unsupported params version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version this build supports.
        expected: u32,
        /// Version found in the input.
        found: u32,
    },

    /// A field holds an unusable value.
    #[error("invalid params field '{field}': {message}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// JSON could not be parsed.
    #[error("params JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding parameters shared by synthesis and analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecParams {
    /// Parameter-set version.
    pub version: u32,
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
    /// Length of each dimension marker tone, in samples.
    pub marker_samples: u32,
    /// Hz per pixel of width/height in the marker tones.
    pub marker_scale: f64,
    /// Hz per unit of channel value.
    pub pixel_scale: f64,
    /// Length of each channel tone, in samples.
    pub samples_per_component: u32,
    /// Oscillator amplitude as a fraction of i16 full scale.
    pub amplitude: f64,
    /// Peak magnitude (in i16 units) below which a segment counts as silence.
    pub amplitude_threshold: u16,
    /// Zero crossings needed before the crossing estimator is trusted.
    pub min_zero_crossings: usize,
    /// Relative tolerance when matching the component count to a color type.
    pub color_type_tolerance: f64,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self::v1()
    }
}

impl CodecParams {
    /// Version 1 parameter set.
    ///
    /// 2205 samples per component gives 20 Hz DFT bins at 44.1 kHz, i.e. two
    /// channel values per bin at a pixel scale of 10 Hz.
    pub fn v1() -> Self {
        Self {
            version: PARAMS_VERSION,
            sample_rate: 44_100,
            marker_samples: 44_100,
            marker_scale: 10.0,
            pixel_scale: 10.0,
            samples_per_component: 2205,
            amplitude: 0.5,
            amplitude_threshold: 50,
            min_zero_crossings: 4,
            color_type_tolerance: 0.01,
        }
    }

    /// Parses and validates a parameter set from JSON.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: CodecParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ParamsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the set is usable for both directions.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.version != PARAMS_VERSION {
            return Err(ParamsError::UnsupportedVersion {
                expected: PARAMS_VERSION,
                found: self.version,
            });
        }
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(invalid(
                "sample_rate",
                format!("must be in 1..={}", MAX_SAMPLE_RATE),
            ));
        }
        if self.marker_samples == 0 {
            return Err(invalid("marker_samples", "must be positive"));
        }
        if self.samples_per_component == 0 {
            return Err(invalid("samples_per_component", "must be positive"));
        }
        if !(self.marker_scale.is_finite() && self.marker_scale > 0.0) {
            return Err(invalid("marker_scale", "must be a positive number"));
        }
        if !(self.pixel_scale.is_finite() && self.pixel_scale > 0.0) {
            return Err(invalid("pixel_scale", "must be a positive number"));
        }
        if self.max_pixel_frequency() >= self.nyquist() {
            return Err(invalid(
                "pixel_scale",
                format!(
                    "channel value 255 maps to {} Hz, at or above Nyquist ({} Hz)",
                    self.max_pixel_frequency(),
                    self.nyquist()
                ),
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(invalid("amplitude", "must be in (0, 1]"));
        }
        if f64::from(self.amplitude_threshold) >= self.amplitude * i16::MAX as f64 {
            return Err(invalid(
                "amplitude_threshold",
                "must be below the synthesized peak amplitude",
            ));
        }
        if self.min_zero_crossings < 2 {
            return Err(invalid("min_zero_crossings", "must be at least 2"));
        }
        if !(0.0..1.0).contains(&self.color_type_tolerance) {
            return Err(invalid("color_type_tolerance", "must be in [0, 1)"));
        }
        Ok(())
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Tone frequency for a channel value.
    pub fn pixel_frequency(&self, value: u8) -> f64 {
        value as f64 * self.pixel_scale
    }

    /// Tone frequency for a width or height marker.
    pub fn marker_frequency(&self, dimension: u32) -> f64 {
        dimension as f64 * self.marker_scale
    }

    /// Frequency of the highest channel value.
    pub fn max_pixel_frequency(&self) -> f64 {
        MAX_CHANNEL_VALUE * self.pixel_scale
    }

    /// Largest width/height a marker tone can carry below Nyquist.
    pub fn max_dimension(&self) -> u32 {
        let max = (self.nyquist() / self.marker_scale).ceil() as u32;
        max.saturating_sub(1)
    }

    /// Recovers a channel value from an estimated frequency.
    pub fn value_from_frequency(&self, hz: f64) -> u8 {
        (hz / self.pixel_scale).round().clamp(0.0, MAX_CHANNEL_VALUE) as u8
    }

    /// Recovers a width/height from an estimated marker frequency.
    pub fn dimension_from_frequency(&self, hz: f64) -> u32 {
        (hz / self.marker_scale).round().max(0.0) as u32
    }

    /// Total samples of an encoding with `components` channel tones.
    pub fn total_samples(&self, components: usize) -> usize {
        2 * self.marker_samples as usize + components * self.samples_per_component as usize
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ParamsError {
    ParamsError::InvalidField {
        field,
        message: message.into(),
    }
}
