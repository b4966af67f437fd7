//! Pixtone Codec
//!
//! Transcodes raster images into pitch-encoded audio and back.
//!
//! The audio stream is: a width marker tone, a height marker tone (each
//! `marker_samples` long at `dimension × marker_scale` Hz), then one tone per
//! channel byte at `value × pixel_scale` Hz lasting `samples_per_component`
//! samples. Both directions read the same [`CodecParams`].
//!
//! # Example
//!
//! ```
//! use pixtone_codec::{analyze_audio, synthesize_audio};
//! use pixtone_spec::ColorType;
//!
//! let wav = synthesize_audio(2, 1, &[10, 20, 30, 200, 210, 220], ColorType::Rgb).unwrap();
//! let image = analyze_audio(&wav).unwrap();
//! assert_eq!((image.width(), image.height()), (2, 1));
//! assert_eq!(image.color_type(), ColorType::Rgb);
//! ```

pub mod analyze;
pub mod error;
pub mod report;
pub mod synthesize;

pub use analyze::{analyze_samples, analyze_wav, infer_color_type};
pub use error::{CodecError, CodecResult};
pub use report::{AnalysisReport, AnalysisWarning, Marker};
pub use synthesize::{synthesize_image, tone_sequence};

use pixtone_audio::SynthResult;
use pixtone_image::{decode_png, encode_png, PngConfig};
use pixtone_spec::{CodecParams, ColorType, Image};

/// Both pipelines bound to one parameter set and PNG writer configuration.
#[derive(Debug, Clone)]
pub struct Codec {
    params: CodecParams,
    png: PngConfig,
    luminance: bool,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            params: CodecParams::v1(),
            png: PngConfig::default(),
            luminance: false,
        }
    }
}

impl Codec {
    /// Creates a codec after validating `params`.
    pub fn new(params: CodecParams) -> CodecResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Uses `png` when writing decoded images.
    pub fn with_png_config(mut self, png: PngConfig) -> Self {
        self.png = png;
        self
    }

    /// Reduces color images to one luminance byte per pixel before synthesis.
    pub fn with_luminance(mut self, luminance: bool) -> Self {
        self.luminance = luminance;
        self
    }

    /// The parameter set.
    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// The PNG writer configuration.
    pub fn png_config(&self) -> &PngConfig {
        &self.png
    }

    /// Synthesizes audio for an already-decoded image.
    pub fn synthesize(&self, image: &Image) -> CodecResult<SynthResult> {
        if self.luminance && image.color_type() != ColorType::Grayscale {
            return synthesize_image(&image.to_luminance(), &self.params);
        }
        synthesize_image(image, &self.params)
    }

    /// PNG bytes -> WAV.
    pub fn image_to_audio(&self, png_bytes: &[u8]) -> CodecResult<SynthResult> {
        let image = decode_png(png_bytes)?;
        self.synthesize(&image)
    }

    /// WAV bytes -> recovered image plus diagnostics.
    pub fn analyze(&self, wav_bytes: &[u8]) -> CodecResult<AnalysisReport> {
        analyze_wav(wav_bytes, &self.params)
    }

    /// WAV bytes -> PNG bytes plus diagnostics.
    pub fn audio_to_image(&self, wav_bytes: &[u8]) -> CodecResult<(Vec<u8>, AnalysisReport)> {
        let report = self.analyze(wav_bytes)?;
        let png = encode_png(&report.image, &self.png)?;
        Ok((png, report))
    }
}

/// Decodes PNG bytes into an image.
pub fn decode_image(bytes: &[u8]) -> CodecResult<Image> {
    Ok(decode_png(bytes)?)
}

/// Encodes an image as PNG with the default writer configuration (Paeth rows).
pub fn encode_image(image: &Image) -> CodecResult<Vec<u8>> {
    Ok(encode_png(image, &PngConfig::default())?)
}

/// Synthesizes the WAV encoding of raw channel bytes with the v1 parameters.
pub fn synthesize_audio(
    width: u32,
    height: u32,
    channels: &[u8],
    color_type: ColorType,
) -> CodecResult<Vec<u8>> {
    let image = Image::new(width, height, color_type, channels.to_vec())?;
    Ok(synthesize_image(&image, &CodecParams::v1())?.wav_data)
}

/// Recovers width, height, channel bytes and color type from a WAV with the
/// v1 parameters.
pub fn analyze_audio(wav_bytes: &[u8]) -> CodecResult<Image> {
    Ok(analyze_wav(wav_bytes, &CodecParams::v1())?.image)
}
