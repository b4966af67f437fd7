//! Brute-force DFT magnitude search.

use std::f64::consts::TAU;

/// Frequency of the strongest DFT bin `k·sample_rate/N`, `k = 0..=N/2`,
/// considering only bins at or below `max_hz`.
///
/// O(N·bins). Ties keep the lower bin. Returns 0 for an empty segment.
pub fn dominant_frequency(samples: &[i16], sample_rate: u32, max_hz: f64) -> f64 {
    let n = samples.len();
    if n == 0 {
        return 0.0;
    }

    let bin_hz = sample_rate as f64 / n as f64;
    // One period of cos/sin; bin k, sample t uses index (k*t) mod n.
    let twiddles: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect();

    let mut best_k = 0usize;
    let mut best_power = f64::NEG_INFINITY;

    for k in 0..=n / 2 {
        if k as f64 * bin_hz > max_hz {
            break;
        }
        let mut re = 0.0;
        let mut im = 0.0;
        let mut index = 0usize;
        for &sample in samples {
            let (cos, sin) = twiddles[index];
            re += sample as f64 * cos;
            im -= sample as f64 * sin;
            index += k;
            if index >= n {
                index -= n;
            }
        }
        let power = re * re + im * im;
        if power > best_power {
            best_power = power;
            best_k = k;
        }
    }

    best_k as f64 * bin_hz
}

/// Frequency of the strongest component among `0, step_hz, 2·step_hz, ...`
/// up to `max_hz`.
///
/// Each candidate costs one pass over the samples, so a coarse `step_hz` keeps
/// long segments cheap. Ties keep the lower frequency. Returns 0 for an empty
/// segment or a non-positive step.
pub fn dominant_frequency_on_grid(
    samples: &[i16],
    sample_rate: u32,
    step_hz: f64,
    max_hz: f64,
) -> f64 {
    if samples.is_empty() || sample_rate == 0 || !(step_hz.is_finite() && step_hz > 0.0) {
        return 0.0;
    }

    let mut best_hz = 0.0;
    let mut best_power = f64::NEG_INFINITY;

    for k in 0.. {
        let hz = k as f64 * step_hz;
        if hz > max_hz {
            break;
        }
        // Rotate a unit phasor by one sample step per sample.
        let angle = TAU * hz / sample_rate as f64;
        let (step_sin, step_cos) = angle.sin_cos();
        let (mut cos, mut sin) = (1.0f64, 0.0f64);
        let mut re = 0.0;
        let mut im = 0.0;
        for &sample in samples {
            re += sample as f64 * cos;
            im -= sample as f64 * sin;
            let next_cos = cos * step_cos - sin * step_sin;
            sin = sin * step_cos + cos * step_sin;
            cos = next_cos;
        }
        let power = re * re + im * im;
        if power > best_power {
            best_power = power;
            best_hz = hz;
        }
    }

    best_hz
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(hz: f64, rate: u32, len: usize) -> Vec<i16> {
        (0..len)
            .map(|i| ((TAU * hz * i as f64 / rate as f64).sin() * 10_000.0) as i16)
            .collect()
    }

    #[test]
    fn test_exact_bin() {
        // 1000 samples at 1000 Hz: 1 Hz bins.
        let samples = tone(37.0, 1000, 1000);
        assert_eq!(dominant_frequency(&samples, 1000, 500.0), 37.0);
    }

    #[test]
    fn test_bound_limits_search() {
        let samples = tone(200.0, 1000, 1000);
        // Above-bound energy ignored; strongest remaining bin is below 100.
        assert!(dominant_frequency(&samples, 1000, 100.0) <= 100.0);
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(dominant_frequency(&[], 44_100, 1000.0), 0.0);
        assert_eq!(dominant_frequency_on_grid(&[], 44_100, 10.0, 1000.0), 0.0);
    }

    #[test]
    fn test_grid_finds_off_bin_multiple() {
        // 1000 samples at 1000 Hz has 1 Hz bins; the grid steps 2.5 Hz.
        let samples = tone(42.5, 1000, 1000);
        assert_eq!(dominant_frequency_on_grid(&samples, 1000, 2.5, 500.0), 42.5);
    }

    #[test]
    fn test_grid_matches_bins_when_aligned() {
        let samples = tone(37.0, 1000, 1000);
        assert_eq!(
            dominant_frequency_on_grid(&samples, 1000, 1.0, 500.0),
            dominant_frequency(&samples, 1000, 500.0)
        );
    }

    #[test]
    fn test_grid_rejects_bad_step() {
        let samples = tone(37.0, 1000, 1000);
        assert_eq!(dominant_frequency_on_grid(&samples, 1000, 0.0, 500.0), 0.0);
        assert_eq!(dominant_frequency_on_grid(&samples, 1000, f64::NAN, 500.0), 0.0);
    }
}
