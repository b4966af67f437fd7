//! Audio->image analysis results and diagnostics.

use std::fmt;

use pixtone_audio::FrequencyEstimate;
use pixtone_spec::{ColorType, Image};

/// Which dimension a marker tone carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// First marker.
    Width,
    /// Second marker.
    Height,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Width => f.write_str("width"),
            Marker::Height => f.write_str("height"),
        }
    }
}

/// Something the analysis recovered from instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisWarning {
    /// A marker had too few zero crossings and was read by DFT.
    MarkerFallback {
        /// Affected marker.
        marker: Marker,
        /// Crossings found.
        zero_crossings: usize,
    },
    /// No color type matched the component count; decoded as grayscale.
    ColorTypeFallback {
        /// Components found in the stream.
        components: usize,
        /// width * height.
        pixels: usize,
    },
    /// Component count differs from what the color type needs; missing
    /// components were zero-filled, surplus ones ignored.
    ComponentCountMismatch {
        /// Components the image needs.
        expected: usize,
        /// Components found.
        actual: usize,
    },
    /// Samples after the last whole component segment.
    PartialSegment {
        /// Leftover sample count.
        samples: usize,
    },
    /// Channel segments decoded by the DFT fallback.
    SegmentFallbacks {
        /// How many.
        count: usize,
    },
    /// Channel segments holding signal that never reached the amplitude
    /// threshold; decoded as 0. Digital silence is not counted.
    LowAmplitudeSegments {
        /// How many.
        count: usize,
        /// Loudest peak among them.
        max_amplitude: u16,
    },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::MarkerFallback {
                marker,
                zero_crossings,
            } => write!(
                f,
                "{} marker has only {} zero crossings; estimated by DFT",
                marker, zero_crossings
            ),
            AnalysisWarning::ColorTypeFallback { components, pixels } => write!(
                f,
                "{} components do not fit {} pixels as grayscale, RGB or RGBA; decoding as grayscale",
                components, pixels
            ),
            AnalysisWarning::ComponentCountMismatch { expected, actual } if actual < expected => {
                write!(
                    f,
                    "expected {} components, found {}; missing values set to 0",
                    expected, actual
                )
            }
            AnalysisWarning::ComponentCountMismatch { expected, actual } => write!(
                f,
                "expected {} components, found {}; extra segments ignored",
                expected, actual
            ),
            AnalysisWarning::PartialSegment { samples } => write!(
                f,
                "{} trailing samples do not fill a component segment",
                samples
            ),
            AnalysisWarning::SegmentFallbacks { count } => write!(
                f,
                "{} channel segments had too few zero crossings; estimated by DFT",
                count
            ),
            AnalysisWarning::LowAmplitudeSegments {
                count,
                max_amplitude,
            } => write!(
                f,
                "{} channel segments peaked below the amplitude threshold (loudest {}); decoded as 0",
                count, max_amplitude
            ),
        }
    }
}

/// Result of decoding audio back into an image.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Recovered image.
    pub image: Image,
    /// Width marker estimate.
    pub width_estimate: FrequencyEstimate,
    /// Height marker estimate.
    pub height_estimate: FrequencyEstimate,
    /// Recoveries made along the way.
    pub warnings: Vec<AnalysisWarning>,
    /// Channel segments decoded by DFT.
    pub fallback_segments: usize,
    /// Channel segments below the amplitude threshold (value 0).
    pub silent_segments: usize,
    /// Whether no color type matched and grayscale was assumed.
    pub color_type_fallback: bool,
}

impl AnalysisReport {
    /// Recovered color type.
    pub fn color_type(&self) -> ColorType {
        self.image.color_type()
    }

    /// True when nothing had to be recovered.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
