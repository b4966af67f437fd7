//! Pixtone Audio Stage
//!
//! Everything on the audio side of the codec:
//!
//! - [`wav`] - canonical 16-bit mono RIFF/WAVE reading and writing
//! - [`synth`] - phase-continuous tone synthesis from (frequency, duration) requests
//! - [`analysis`] - dominant-frequency estimation by zero crossings with a DFT fallback
//!
//! # Example
//!
//! ```
//! use pixtone_audio::{FrequencyAnalyzer, ToneRequest, ToneSynthesizer};
//!
//! let mut synth = ToneSynthesizer::new(44_100, 0.5);
//! let samples = synth.synthesize(&[ToneRequest::new(440.0, 4410)]);
//!
//! let estimate = FrequencyAnalyzer::new(44_100).estimate(&samples, 22_050.0);
//! assert!((estimate.hz - 440.0).abs() < 1.0);
//! ```

pub mod analysis;
pub mod error;
pub mod synth;
pub mod wav;

pub use analysis::{EstimateMethod, FrequencyAnalyzer, FrequencyEstimate};
pub use error::{AudioError, AudioResult};
pub use synth::{SynthResult, ToneRequest, ToneSynthesizer};
pub use wav::{
    compute_pcm_hash, parse_wav, pcm16_to_samples, read_wav, samples_to_pcm16, write_wav,
    write_wav_to_vec, WavData, WavFormat,
};
