//! JSON output types for the `--json` flag.

use serde::Serialize;

use pixtone_codec::AnalysisReport;

/// Result of `pixtone decode --json`.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    /// Whether the decode succeeded.
    pub success: bool,
    /// Input WAV path.
    pub input: String,
    /// Output PNG path.
    pub output: String,
    /// Recovered width.
    pub width: u32,
    /// Recovered height.
    pub height: u32,
    /// Recovered color type.
    pub color_type: String,
    /// Width marker estimate in Hz.
    pub width_hz: f64,
    /// Height marker estimate in Hz.
    pub height_hz: f64,
    /// Channel segments decoded by DFT.
    pub fallback_segments: usize,
    /// Channel segments read as silence.
    pub silent_segments: usize,
    /// Human-readable warnings.
    pub warnings: Vec<String>,
    /// BLAKE3 hash of the written PNG.
    pub png_hash: String,
}

impl DecodeOutput {
    /// Builds the output from an analysis report.
    pub fn from_report(input: &str, output: &str, report: &AnalysisReport, png: &[u8]) -> Self {
        Self {
            success: true,
            input: input.to_string(),
            output: output.to_string(),
            width: report.image.width(),
            height: report.image.height(),
            color_type: report.color_type().as_str().to_string(),
            width_hz: report.width_estimate.hz,
            height_hz: report.height_estimate.hz,
            fallback_segments: report.fallback_segments,
            silent_segments: report.silent_segments,
            warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
            png_hash: blake3::hash(png).to_hex().to_string(),
        }
    }
}

/// Result of `pixtone inspect --json`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InspectOutput {
    /// A PNG file.
    Png {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Bits per channel.
        bit_depth: u8,
        /// Raw color type code.
        color_type: u8,
        /// Interlace method.
        interlace: u8,
        /// Chunks in file order.
        chunks: Vec<ChunkInfo>,
        /// BLAKE3 hash of the file.
        file_hash: String,
    },
    /// A WAV file.
    Wav {
        /// Format code (1 = PCM).
        format_code: u16,
        /// Channel count.
        channels: u16,
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Bits per sample.
        bits_per_sample: u16,
        /// Sample frames.
        num_samples: usize,
        /// Duration in seconds.
        duration_seconds: f64,
        /// BLAKE3 hash of the PCM payload.
        pcm_hash: String,
    },
}

/// One chunk in a PNG file.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkInfo {
    /// Chunk type tag.
    pub chunk_type: String,
    /// Payload length.
    pub length: usize,
    /// Byte offset of the length field.
    pub offset: usize,
    /// Stored CRC.
    pub crc: u32,
}

/// Per-file entry in a batch report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Source file.
    pub input: String,
    /// Written file, when successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Whether the conversion succeeded.
    pub success: bool,
    /// Error message, when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Analysis warnings (audio -> image only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Summary written to `batch-report.json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Files attempted.
    pub total: usize,
    /// Files converted.
    pub passed: usize,
    /// Files that failed.
    pub failed: usize,
    /// Per-file results, image->audio first.
    pub results: Vec<BatchResult>,
}
