//! Pixtone CLI library.
//!
//! Command implementations behind the `pixtone` binary: single-file encode
//! and decode, batch directory processing, file inspection and the parameter
//! dump.

pub mod commands;
