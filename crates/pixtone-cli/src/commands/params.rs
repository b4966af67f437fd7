//! Params command: prints the default parameter set.

use anyhow::Result;
use std::process::ExitCode;

use pixtone_spec::CodecParams;

/// Prints the v1 parameter set as pretty JSON.
pub fn run() -> Result<ExitCode> {
    println!("{}", CodecParams::v1().to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
