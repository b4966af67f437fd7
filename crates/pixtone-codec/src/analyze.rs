//! Audio -> image: read the markers, infer the color type, then estimate one
//! channel value per fixed-length segment.

use pixtone_audio::{read_wav, EstimateMethod, FrequencyAnalyzer};
use pixtone_spec::{CodecParams, ColorType, Image};

use crate::error::{CodecError, CodecResult};
use crate::report::{AnalysisReport, AnalysisWarning, Marker};

/// Decodes a WAV produced by the synthesizer back into an image.
pub fn analyze_wav(wav_bytes: &[u8], params: &CodecParams) -> CodecResult<AnalysisReport> {
    params.validate()?;
    let wav = read_wav(wav_bytes, params.sample_rate)?;
    analyze_samples(&wav.samples(), params)
}

/// Decodes raw samples (markers and channel segments) into an image.
pub fn analyze_samples(samples: &[i16], params: &CodecParams) -> CodecResult<AnalysisReport> {
    let analyzer = FrequencyAnalyzer::from_params(params);
    let marker_len = params.marker_samples as usize;
    let needed = 2 * marker_len;
    if samples.len() < needed {
        return Err(CodecError::TruncatedAudio {
            expected: needed,
            actual: samples.len(),
        });
    }

    let mut warnings = Vec::new();

    // Markers only ever carry whole dimensions, so their DFT fallback steps by
    // the marker scale instead of 1/N of the sample rate.
    let marker_max_hz = params.marker_frequency(params.max_dimension());
    let read_marker = |segment: &[i16]| {
        analyzer.estimate_on_grid(segment, params.marker_scale, marker_max_hz)
    };
    let width_estimate = read_marker(&samples[..marker_len]);
    let height_estimate = read_marker(&samples[marker_len..needed]);
    for (marker, estimate) in [(Marker::Width, &width_estimate), (Marker::Height, &height_estimate)] {
        if estimate.method == EstimateMethod::DftFallback {
            log::warn!("{} marker estimated by DFT ({:.2} Hz)", marker, estimate.hz);
            warnings.push(AnalysisWarning::MarkerFallback {
                marker,
                zero_crossings: estimate.zero_crossings,
            });
        }
    }

    let width = params.dimension_from_frequency(width_estimate.hz);
    let height = params.dimension_from_frequency(height_estimate.hz);
    log::debug!(
        "markers: width {:.2} Hz -> {}, height {:.2} Hz -> {}",
        width_estimate.hz,
        width,
        height_estimate.hz,
        height
    );
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyImage { width, height });
    }

    let body = &samples[needed..];
    let segment_len = params.samples_per_component as usize;
    let components = body.len() / segment_len;
    let trailing = body.len() % segment_len;
    if trailing > 0 {
        warnings.push(AnalysisWarning::PartialSegment { samples: trailing });
    }

    let pixels = width as usize * height as usize;
    let inferred = infer_color_type(components, pixels, params.color_type_tolerance);
    let color_type_fallback = inferred.is_none();
    let color_type = inferred.unwrap_or_else(|| {
        log::warn!(
            "{} components match no color type for {}x{}; assuming grayscale",
            components,
            width,
            height
        );
        warnings.push(AnalysisWarning::ColorTypeFallback { components, pixels });
        ColorType::Grayscale
    });

    let expected = pixels * color_type.bytes_per_pixel();
    if components != expected {
        warnings.push(AnalysisWarning::ComponentCountMismatch {
            expected,
            actual: components,
        });
    }

    // One bin above the top channel tone so 255 stays reachable.
    let max_hz = params.max_pixel_frequency() + params.sample_rate as f64 / segment_len as f64;
    let mut data = vec![0u8; expected];
    let mut fallback_segments = 0;
    let mut silent_segments = 0;
    let mut low_amplitude_segments = 0;
    let mut low_amplitude_peak = 0;

    for (index, (slot, segment)) in data.iter_mut().zip(body.chunks_exact(segment_len)).enumerate() {
        let estimate = analyzer.estimate(segment, max_hz);
        match estimate.method {
            EstimateMethod::Silence => {
                silent_segments += 1;
                if estimate.max_amplitude > 0 {
                    low_amplitude_segments += 1;
                    low_amplitude_peak = low_amplitude_peak.max(estimate.max_amplitude);
                }
            }
            EstimateMethod::DftFallback => {
                fallback_segments += 1;
                log::debug!(
                    "segment {}: {} crossings, DFT {:.1} Hz",
                    index,
                    estimate.zero_crossings,
                    estimate.hz
                );
            }
            EstimateMethod::ZeroCrossing => {}
        }
        *slot = params.value_from_frequency(estimate.hz);
    }

    if fallback_segments > 0 {
        warnings.push(AnalysisWarning::SegmentFallbacks {
            count: fallback_segments,
        });
    }
    if low_amplitude_segments > 0 {
        log::warn!(
            "{} segments stayed under the amplitude threshold (loudest {}); decoded as 0",
            low_amplitude_segments,
            low_amplitude_peak
        );
        warnings.push(AnalysisWarning::LowAmplitudeSegments {
            count: low_amplitude_segments,
            max_amplitude: low_amplitude_peak,
        });
    }

    let image = Image::new(width, height, color_type, data)?;
    Ok(AnalysisReport {
        image,
        width_estimate,
        height_estimate,
        warnings,
        fallback_segments,
        silent_segments,
        color_type_fallback,
    })
}

/// Picks the color type whose component count is closest to `components`,
/// accepting it when within the relative `tolerance`.
pub fn infer_color_type(components: usize, pixels: usize, tolerance: f64) -> Option<ColorType> {
    if pixels == 0 {
        return None;
    }

    ColorType::ALL
        .iter()
        .map(|&color_type| {
            let expected = (pixels * color_type.bytes_per_pixel()) as f64;
            let error = (components as f64 - expected).abs() / expected;
            (color_type, error)
        })
        .filter(|&(_, error)| error <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(color_type, _)| color_type)
}
