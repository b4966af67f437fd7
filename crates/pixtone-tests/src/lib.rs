//! Pixtone End-to-End Test Infrastructure
//!
//! Integration tests for the codec pipelines:
//!
//! - **Round trip**: image -> audio -> image recovers dimensions exactly and
//!   channel values within ±2
//! - **Interop**: our PNG and WAV files read with the `png` and `hound` crates
//!   and the other way around
//! - **Determinism**: equal inputs give byte-identical PNG and WAV output
//! - **Batch**: the `input/ -> audio/ -> output/` directory flow
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pixtone-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod format_validators;

pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::{checkerboard, gradient, BatchRootFixture};
pub use format_validators::{validate_png, validate_wav, FormatError, PngInfo, WavInfo};
