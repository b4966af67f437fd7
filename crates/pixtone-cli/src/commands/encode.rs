//! Encode command: PNG -> WAV.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use pixtone_audio::SynthResult;
use pixtone_codec::Codec;
use pixtone_spec::{CodecParams, Image};

use super::reporting::short_hash;

/// Converts one PNG file into a WAV file.
pub fn run(input: &str, output: &str, params_path: Option<&str>, luminance: bool) -> Result<ExitCode> {
    let params = super::load_params(params_path)?;

    println!("{} {}", "Encoding:".cyan().bold(), input);
    let (image, result) = encode_file(Path::new(input), Path::new(output), &params, luminance)?;

    println!(
        "{} {}x{} {}",
        "Image:".dimmed(),
        image.width(),
        image.height(),
        image.color_type()
    );
    println!(
        "{} {} samples, {:.2}s",
        "Audio:".dimmed(),
        result.num_samples,
        result.duration_seconds()
    );
    println!("{} {}", "PCM hash:".dimmed(), short_hash(&result.pcm_hash));
    println!("{} {}", "Written:".green().bold(), output);

    Ok(ExitCode::SUCCESS)
}

/// Reads `input`, synthesizes its audio encoding and writes it to `output`.
pub fn encode_file(
    input: &Path,
    output: &Path,
    params: &CodecParams,
    luminance: bool,
) -> Result<(Image, SynthResult)> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let codec = Codec::new(params.clone())?.with_luminance(luminance);

    let image = pixtone_codec::decode_image(&bytes)
        .with_context(|| format!("Failed to decode PNG {}", input.display()))?;
    let result = codec
        .synthesize(&image)
        .with_context(|| format!("Failed to synthesize audio for {}", input.display()))?;

    fs::write(output, &result.wav_data)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok((image, result))
}
