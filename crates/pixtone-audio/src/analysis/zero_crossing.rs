//! Zero-crossing timing.

/// Sign changes found in a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossings {
    /// Number of sign changes.
    pub count: usize,
    /// Interpolated sample position of the first crossing.
    pub first: f64,
    /// Interpolated sample position of the last crossing.
    pub last: f64,
}

impl Crossings {
    /// Frequency implied by the crossings: `count - 1` half periods span
    /// `last - first` samples.
    pub fn frequency(&self, sample_rate: u32) -> Option<f64> {
        let span = self.last - self.first;
        if self.count < 2 || span <= 0.0 {
            return None;
        }
        let half_periods = (self.count - 1) as f64;
        Some(half_periods / 2.0 * sample_rate as f64 / span)
    }
}

/// Counts sign changes among samples whose magnitude is at least `threshold`.
///
/// Quieter samples are skipped. The first loud sample only sets the starting
/// sign. Each crossing instant is interpolated linearly between the two loud
/// samples that straddle it.
pub fn count_crossings(samples: &[i16], threshold: u16) -> Crossings {
    let mut crossings = Crossings {
        count: 0,
        first: 0.0,
        last: 0.0,
    };
    let mut previous: Option<(usize, f64)> = None;

    for (i, &sample) in samples.iter().enumerate() {
        if sample.unsigned_abs() < threshold || sample == 0 {
            continue;
        }
        let value = sample as f64;

        if let Some((j, prev)) = previous {
            if (prev < 0.0) != (value < 0.0) {
                let t = j as f64 + (i - j) as f64 * prev / (prev - value);
                if crossings.count == 0 {
                    crossings.first = t;
                }
                crossings.last = t;
                crossings.count += 1;
            }
        }
        previous = Some((i, value));
    }

    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolated_crossing() {
        // -100 at 0, +300 at 1: zero at 0.25.
        let c = count_crossings(&[-100, 300], 50);
        assert_eq!(c.count, 1);
        assert!((c.first - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_quiet_samples_are_skipped() {
        // The small negative samples never register.
        let c = count_crossings(&[100, -10, 100, -20, 100, -200], 50);
        assert_eq!(c.count, 1);
        assert!(c.first > 4.0 && c.first < 5.0);
    }

    #[test]
    fn test_square_wave_frequency() {
        // Period of 10 samples at 1000 Hz sample rate: 100 Hz.
        let samples: Vec<i16> = (0..100)
            .map(|i| if (i / 5) % 2 == 0 { 1000 } else { -1000 })
            .collect();
        let c = count_crossings(&samples, 50);
        assert_eq!(c.count, 19);
        let hz = c.frequency(1000).unwrap();
        assert!((hz - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_crossing_has_no_frequency() {
        let c = count_crossings(&[500, -500], 50);
        assert_eq!(c.frequency(44_100), None);
    }
}
