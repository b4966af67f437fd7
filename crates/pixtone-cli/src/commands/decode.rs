//! Decode command: WAV -> PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use pixtone_codec::{AnalysisReport, Codec};
use pixtone_image::PngConfig;
use pixtone_spec::CodecParams;

use super::json_output::DecodeOutput;
use super::reporting::print_warnings;

/// Converts one WAV file back into a PNG file.
pub fn run(
    input: &str,
    output: &str,
    params_path: Option<&str>,
    filter: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let params = super::load_params(params_path)?;
    let png_config = super::png_config_for(filter)?;

    if !json_output {
        println!("{} {}", "Decoding:".cyan().bold(), input);
    }
    let (report, png) = decode_file(Path::new(input), Path::new(output), &params, png_config)?;

    if json_output {
        let out = DecodeOutput::from_report(input, output, &report, &png);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {}x{} {}",
        "Image:".dimmed(),
        report.image.width(),
        report.image.height(),
        report.color_type()
    );
    println!(
        "{} width {:.2} Hz, height {:.2} Hz",
        "Markers:".dimmed(),
        report.width_estimate.hz,
        report.height_estimate.hz
    );
    print_warnings(&report);
    println!("{} {}", "Written:".green().bold(), output);

    Ok(ExitCode::SUCCESS)
}

/// Reads `input`, recovers the image and writes it to `output` as PNG.
pub fn decode_file(
    input: &Path,
    output: &Path,
    params: &CodecParams,
    png_config: PngConfig,
) -> Result<(AnalysisReport, Vec<u8>)> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let codec = Codec::new(params.clone())?.with_png_config(png_config);

    let (png, report) = codec
        .audio_to_image(&bytes)
        .with_context(|| format!("Failed to decode audio {}", input.display()))?;

    fs::write(output, &png).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok((report, png))
}
