use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::*;
use crate::synth::{ToneRequest, ToneSynthesizer};

const RATE: u32 = 44_100;

fn tone(hz: f64, samples: u32) -> Vec<i16> {
    ToneSynthesizer::new(RATE, 0.5).synthesize(&[ToneRequest::new(hz, samples)])
}

#[test]
fn test_silence_reports_zero() {
    let analyzer = FrequencyAnalyzer::new(RATE);
    let estimate = analyzer.estimate(&vec![0; 2205], 2570.0);
    assert_eq!(estimate.hz, 0.0);
    assert_eq!(estimate.method, EstimateMethod::Silence);
    assert_eq!(estimate.zero_crossings, 0);
    assert_eq!(estimate.max_amplitude, 0);
}

#[test]
fn test_empty_segment_is_silence() {
    let estimate = FrequencyAnalyzer::new(RATE).estimate(&[], 1000.0);
    assert_eq!(estimate.method, EstimateMethod::Silence);
    assert_eq!(estimate.hz, 0.0);
}

#[test]
fn test_below_threshold_is_silence() {
    let samples: Vec<i16> = (0..2205).map(|i| if i % 2 == 0 { 49 } else { -49 }).collect();
    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 22_050.0);
    assert_eq!(estimate.method, EstimateMethod::Silence);
    assert_eq!(estimate.max_amplitude, 49);
}

#[test]
fn test_zero_crossing_accuracy() {
    let analyzer = FrequencyAnalyzer::new(RATE);
    for hz in [60.0, 100.0, 440.0, 1000.0, 2550.0] {
        let estimate = analyzer.estimate(&tone(hz, 2205), 2570.0);
        assert_eq!(estimate.method, EstimateMethod::ZeroCrossing, "{} Hz", hz);
        assert!((estimate.hz - hz).abs() < 1.0, "{} Hz estimated as {}", hz, estimate.hz);
    }
}

#[test]
fn test_marker_length_segment() {
    let estimate = FrequencyAnalyzer::new(RATE).estimate(&tone(20.0, RATE), 22_050.0);
    assert_eq!(estimate.method, EstimateMethod::ZeroCrossing);
    assert!((estimate.hz - 20.0).abs() < 0.05);
    assert!(estimate.zero_crossings >= 39);
}

#[test]
fn test_short_low_tone_uses_dft_fallback() {
    // 100 Hz over 600 samples is about 1.4 periods: two crossings.
    let samples = tone(100.0, 600);
    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 22_050.0);

    assert_eq!(estimate.method, EstimateMethod::DftFallback);
    assert!(estimate.zero_crossings < 4);
    let bin = RATE as f64 / 600.0;
    assert!(estimate.hz > 0.0);
    assert!((estimate.hz - 100.0).abs() <= bin);
}

#[test]
fn test_min_crossings_is_configurable() {
    let samples = tone(100.0, 600);
    let analyzer = FrequencyAnalyzer::new(RATE).with_min_crossings(2);
    let estimate = analyzer.estimate(&samples, 22_050.0);
    assert_eq!(estimate.method, EstimateMethod::ZeroCrossing);
    assert!((estimate.hz - 100.0).abs() < 1.0);
}

#[test]
fn test_from_params() {
    let params = CodecParams::v1();
    let analyzer = FrequencyAnalyzer::from_params(&params);
    assert_eq!(analyzer.sample_rate(), 44_100);
    assert_eq!(analyzer, FrequencyAnalyzer::new(44_100));
}

#[test]
fn test_estimate_pcm_bytes() {
    let samples = tone(500.0, 2205);
    let pcm = crate::wav::samples_to_pcm16(&samples);
    let analyzer = FrequencyAnalyzer::new(RATE);
    assert_eq!(analyzer.estimate_pcm(&pcm, 2570.0), analyzer.estimate(&samples, 2570.0));
}

#[test]
fn test_noise_robustness() {
    let mut rng = Pcg32::seed_from_u64(42);
    let analyzer = FrequencyAnalyzer::new(RATE);

    for hz in [440.0, 1000.0, 2000.0] {
        let noisy: Vec<i16> = tone(hz, 2205)
            .into_iter()
            .map(|s| s.saturating_add(rng.gen_range(-200..=200)))
            .collect();
        let estimate = analyzer.estimate(&noisy, 2570.0);
        assert!((estimate.hz - hz).abs() < 2.0, "{} Hz estimated as {}", hz, estimate.hz);
    }
}

#[test]
fn test_low_level_noise_is_silence() {
    let mut rng = Pcg32::seed_from_u64(7);
    let samples: Vec<i16> = (0..2205).map(|_| rng.gen_range(-40..=40)).collect();
    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 2570.0);
    assert_eq!(estimate.method, EstimateMethod::Silence);
    assert_eq!(estimate.hz, 0.0);
}

#[test]
fn test_phase_continuous_sequence() {
    let values = [0u8, 1, 2, 3, 4, 17, 128, 200, 255];
    let tones: Vec<ToneRequest> = values
        .iter()
        .map(|&v| ToneRequest::new(v as f64 * 10.0, 2205))
        .collect();
    let samples = ToneSynthesizer::new(RATE, 0.5).synthesize(&tones);
    let analyzer = FrequencyAnalyzer::new(RATE);

    for (segment, &value) in samples.chunks(2205).zip(&values) {
        let estimate = analyzer.estimate(segment, 2570.0);
        let decoded = (estimate.hz / 10.0).round().clamp(0.0, 255.0) as i32;
        assert!(
            (decoded - value as i32).abs() <= 2,
            "value {} decoded as {} via {}",
            value,
            decoded,
            estimate.method
        );
    }
}

/// `tone` rescaled to the given peak.
fn weak_tone(hz: f64, samples: u32, peak: f64) -> Vec<i16> {
    tone(hz, samples)
        .into_iter()
        .map(|s| (s as f64 * peak / 16_384.0).round() as i16)
        .collect()
}

#[test]
fn test_weak_tone_with_click_searches_full_range() {
    // Tone under the threshold everywhere except one loud click: no
    // crossings, so the DFT has to find it across every bin up to max_hz.
    let mut samples = weak_tone(1000.0, 2205, 45.0);
    samples[700] = 200;

    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 2570.0);
    assert_eq!(estimate.method, EstimateMethod::DftFallback);
    assert_eq!(estimate.zero_crossings, 0);
    assert_eq!(estimate.max_amplitude, 200);
    assert_eq!(estimate.hz, 1000.0);
}

#[test]
fn test_weak_tone_respects_max_hz() {
    let mut samples = weak_tone(2000.0, 2205, 45.0);
    samples[700] = 200;

    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 1000.0);
    assert_eq!(estimate.method, EstimateMethod::DftFallback);
    assert!(estimate.hz <= 1000.0);
}

#[test]
fn test_weak_tone_on_grid() {
    let mut samples = weak_tone(20.0, RATE / 2, 45.0);
    samples[1000] = 200;

    let estimate = FrequencyAnalyzer::new(RATE).estimate_on_grid(&samples, 10.0, 22_040.0);
    assert_eq!(estimate.method, EstimateMethod::DftFallback);
    assert_eq!(estimate.hz, 20.0);
}

#[test]
fn test_short_noisy_tone_uses_dft_fallback() {
    // Noise stays under the threshold, so it cannot add crossings.
    let mut rng = Pcg32::seed_from_u64(11);
    let samples: Vec<i16> = tone(100.0, 600)
        .into_iter()
        .map(|s| s.saturating_add(rng.gen_range(-40..=40)))
        .collect();

    let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 22_050.0);
    assert_eq!(estimate.method, EstimateMethod::DftFallback);
    assert!(estimate.zero_crossings < 4);
    assert!((estimate.hz - 100.0).abs() <= RATE as f64 / 600.0);
}

#[test]
fn test_low_value_with_noise_decodes_close() {
    let mut rng = Pcg32::seed_from_u64(5);
    for value in [1u8, 2, 3] {
        let samples: Vec<i16> = tone(value as f64 * 10.0, 2205)
            .into_iter()
            .map(|s| s.saturating_add(rng.gen_range(-40..=40)))
            .collect();
        let estimate = FrequencyAnalyzer::new(RATE).estimate(&samples, 2570.0);
        assert_eq!(estimate.method, EstimateMethod::DftFallback, "value {}", value);
        let decoded = (estimate.hz / 10.0).round() as i32;
        assert!(
            (decoded - value as i32).abs() <= 2,
            "value {} decoded as {}",
            value,
            decoded
        );
    }
}
