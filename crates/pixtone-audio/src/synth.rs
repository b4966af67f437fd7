//! Phase-continuous tone synthesis.
//!
//! Each tone is generated with the second-order sine recurrence
//!
//! ```text
//! s[n+1] = 2·cos(Δφ)·s[n] − s[n−1],   Δφ = 2π·f / sample_rate
//! ```
//!
//! seeded with `sin(φ)` and `sin(φ − Δφ)`, where `φ` is the phase carried over
//! from the previous tone. Adjacent tones therefore join without a click.

use std::f64::consts::TAU;

use crate::wav::{samples_to_pcm16, write_wav_to_vec, WavFormat};

/// One tone: a frequency held for a number of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    /// Frequency in Hz. Zero (or anything not strictly positive) is silence.
    pub frequency_hz: f64,
    /// Duration in samples.
    pub sample_count: u32,
}

impl ToneRequest {
    /// Creates a tone request.
    pub fn new(frequency_hz: f64, sample_count: u32) -> Self {
        Self {
            frequency_hz,
            sample_count,
        }
    }

    /// A silent run of `sample_count` samples.
    pub fn silence(sample_count: u32) -> Self {
        Self::new(0.0, sample_count)
    }

    fn is_silent(&self) -> bool {
        !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0)
    }
}

/// Sine oscillator that keeps its phase across tones.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    sample_rate: u32,
    amplitude: f64,
    phase: f64,
}

impl ToneSynthesizer {
    /// Creates a synthesizer at phase 0.
    ///
    /// `amplitude` is a fraction of i16 full scale and is clamped to [0, 1].
    pub fn new(sample_rate: u32, amplitude: f64) -> Self {
        Self {
            sample_rate,
            amplitude: amplitude.clamp(0.0, 1.0),
            phase: 0.0,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current oscillator phase in radians, in [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Appends one tone to `out` and advances the phase.
    ///
    /// Silent tones write zeros and leave the phase untouched.
    pub fn render(&mut self, tone: &ToneRequest, out: &mut Vec<i16>) {
        let count = tone.sample_count as usize;
        out.reserve(count);

        if tone.is_silent() || self.sample_rate == 0 {
            out.resize(out.len() + count, 0);
            return;
        }

        let delta = TAU * tone.frequency_hz / self.sample_rate as f64;
        let scale = self.amplitude * i16::MAX as f64;
        let coeff = 2.0 * delta.cos();

        let mut prev = (self.phase - delta).sin();
        let mut current = self.phase.sin();
        for _ in 0..count {
            out.push(to_pcm(current * scale));
            let next = coeff * current - prev;
            prev = current;
            current = next;
        }

        self.phase = (self.phase + delta * count as f64).rem_euclid(TAU);
    }

    /// Renders a sequence of tones into one sample stream.
    pub fn synthesize(&mut self, tones: &[ToneRequest]) -> Vec<i16> {
        let total: usize = tones.iter().map(|t| t.sample_count as usize).sum();
        let mut out = Vec::with_capacity(total);
        for tone in tones {
            self.render(tone, &mut out);
        }
        log::debug!(
            "synthesized {} tones, {} samples, end phase {:.4}",
            tones.len(),
            out.len(),
            self.phase
        );
        out
    }
}

fn to_pcm(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Result of synthesizing a complete WAV file.
#[derive(Debug, Clone)]
pub struct SynthResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl SynthResult {
    /// Wraps mono samples in a canonical WAV container.
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RATE: u32 = 44_100;

    #[test]
    fn test_silence_is_zero_and_keeps_phase() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        synth.synthesize(&[ToneRequest::new(1000.0, 33)]);
        let phase = synth.phase();

        let mut out = Vec::new();
        synth.render(&ToneRequest::silence(100), &mut out);
        assert_eq!(out, vec![0; 100]);
        assert_eq!(synth.phase(), phase);
    }

    #[test]
    fn test_first_sample_is_sin_of_phase() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        let out = synth.synthesize(&[ToneRequest::new(440.0, 4)]);
        assert_eq!(out[0], 0);

        let delta = TAU * 440.0 / RATE as f64;
        let expected = (delta.sin() * 0.5 * i16::MAX as f64).round() as i16;
        assert_eq!(out[1], expected);
    }

    #[test]
    fn test_matches_direct_sine() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        let out = synth.synthesize(&[ToneRequest::new(1234.5, 2000)]);
        let delta = TAU * 1234.5 / RATE as f64;
        for (n, &s) in out.iter().enumerate() {
            let expected = (n as f64 * delta).sin() * 0.5 * i16::MAX as f64;
            assert!((s as f64 - expected).abs() <= 1.0, "sample {}", n);
        }
    }

    #[test]
    fn test_phase_continuity_across_tones() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        let out = synth.synthesize(&[ToneRequest::new(300.0, 101), ToneRequest::new(700.0, 50)]);

        // Second tone starts at the phase the first one ended on.
        let d1 = TAU * 300.0 / RATE as f64;
        let phase = (d1 * 101.0).rem_euclid(TAU);
        let expected = (phase.sin() * 0.5 * i16::MAX as f64).round() as i16;
        assert!((out[101] - expected).abs() <= 1);

        // No jump larger than one step of the faster tone.
        let max_step = (TAU * 700.0 / RATE as f64) * 0.5 * i16::MAX as f64 + 2.0;
        for pair in out.windows(2) {
            assert!(((pair[1] as f64) - (pair[0] as f64)).abs() <= max_step);
        }
    }

    #[test]
    fn test_phase_wraps() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        synth.synthesize(&[ToneRequest::new(441.0, 44_100)]);
        // Exactly 441 cycles: back to (almost) zero.
        let phase = synth.phase();
        assert!(phase < 1e-6 || TAU - phase < 1e-6);
    }

    #[test]
    fn test_amplitude_is_respected() {
        let mut synth = ToneSynthesizer::new(RATE, 0.5);
        let out = synth.synthesize(&[ToneRequest::new(1000.0, 4410)]);
        let peak = out.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak <= 16_384);
        assert!(peak >= 16_300);
    }

    #[test]
    fn test_synth_result() {
        let samples = vec![1i16, -1, 2];
        let result = SynthResult::from_samples(&samples, RATE);
        assert_eq!(result.num_samples, 3);
        assert_eq!(result.wav_data.len(), 44 + 6);
        assert_eq!(result.pcm_hash.len(), 64);
        assert_eq!(
            Some(result.pcm_hash.clone()),
            crate::wav::compute_pcm_hash(&result.wav_data)
        );
    }
}
