//! Image -> audio: dimension markers followed by one tone per channel byte.

use pixtone_audio::{SynthResult, ToneRequest, ToneSynthesizer};
use pixtone_spec::{CodecParams, Image};

use crate::error::{CodecError, CodecResult};

/// Builds the tone sequence for `image`: width marker, height marker, then
/// each channel byte in row-major, channel-interleaved order.
pub fn tone_sequence(image: &Image, params: &CodecParams) -> CodecResult<Vec<ToneRequest>> {
    let max = params.max_dimension();
    for (dimension, value) in [("width", image.width()), ("height", image.height())] {
        if value > max {
            return Err(CodecError::DimensionOutOfRange {
                dimension,
                value,
                max,
            });
        }
    }

    let mut tones = Vec::with_capacity(2 + image.component_count());
    tones.push(ToneRequest::new(
        params.marker_frequency(image.width()),
        params.marker_samples,
    ));
    tones.push(ToneRequest::new(
        params.marker_frequency(image.height()),
        params.marker_samples,
    ));
    tones.extend(
        image
            .data()
            .iter()
            .map(|&value| ToneRequest::new(params.pixel_frequency(value), params.samples_per_component)),
    );
    Ok(tones)
}

/// Synthesizes the complete WAV encoding of `image`.
pub fn synthesize_image(image: &Image, params: &CodecParams) -> CodecResult<SynthResult> {
    params.validate()?;
    let tones = tone_sequence(image, params)?;

    let mut synth = ToneSynthesizer::new(params.sample_rate, params.amplitude);
    let samples = synth.synthesize(&tones);
    log::debug!(
        "encoded {}x{} {} image as {} tones ({} samples)",
        image.width(),
        image.height(),
        image.color_type(),
        tones.len(),
        samples.len()
    );

    Ok(SynthResult::from_samples(&samples, params.sample_rate))
}
