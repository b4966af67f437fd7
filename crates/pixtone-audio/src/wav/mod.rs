//! Canonical 16-bit PCM WAV container.
//!
//! Writing always produces the fixed 44-byte header (RIFF, `fmt ` with PCM
//! format code 1, `data`) with no timestamps or optional chunks, so equal
//! samples give equal bytes. Reading walks the chunk list and tolerates extra
//! chunks before or between `fmt ` and `data`.

mod format;
mod reader;
mod writer;


pub use format::WavFormat;
pub use reader::{compute_pcm_hash, parse_wav, read_wav, WavData};
pub use writer::{pcm16_to_samples, samples_to_pcm16, write_wav, write_wav_to_vec};

/// Size of the canonical header written by [`write_wav`].
pub const WAV_HEADER_LEN: usize = 44;
