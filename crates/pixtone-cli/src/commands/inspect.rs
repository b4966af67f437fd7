//! Inspect command: PNG header and chunk list, or WAV format and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use pixtone_audio::parse_wav;
use pixtone_image::{read_header, PngChunkReader, PNG_SIGNATURE};

use super::json_output::{ChunkInfo, InspectOutput};
use super::reporting::short_hash;

/// Prints what a PNG or WAV file contains.
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input))?;
    let info = inspect_bytes(&bytes).with_context(|| format!("Failed to inspect {}", input))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    match &info {
        InspectOutput::Png {
            width,
            height,
            bit_depth,
            color_type,
            interlace,
            chunks,
            file_hash,
        } => {
            println!("{} PNG", "Type:".dimmed());
            println!("{} {}x{}", "Size:".dimmed(), width, height);
            println!(
                "{} bit depth {}, color type {}, interlace {}",
                "Header:".dimmed(),
                bit_depth,
                color_type,
                interlace
            );
            println!("{} {}", "Hash:".dimmed(), short_hash(file_hash));
            println!("{}", "Chunks:".dimmed());
            for chunk in chunks {
                println!(
                    "  {} {:>8} bytes at {:>8}  crc {:#010x}",
                    chunk.chunk_type.bold(),
                    chunk.length,
                    chunk.offset,
                    chunk.crc
                );
            }
        }
        InspectOutput::Wav {
            format_code,
            channels,
            sample_rate,
            bits_per_sample,
            num_samples,
            duration_seconds,
            pcm_hash,
        } => {
            println!("{} WAV", "Type:".dimmed());
            println!(
                "{} format {}, {} channel(s), {} Hz, {} bit",
                "Format:".dimmed(),
                format_code,
                channels,
                sample_rate,
                bits_per_sample
            );
            println!(
                "{} {} samples, {:.3}s",
                "Length:".dimmed(),
                num_samples,
                duration_seconds
            );
            println!("{} {}", "PCM hash:".dimmed(), short_hash(pcm_hash));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Detects the file type from its magic bytes and collects its metadata.
pub fn inspect_bytes(bytes: &[u8]) -> Result<InspectOutput> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        let header = read_header(bytes)?;
        let chunks = PngChunkReader::new(bytes)?
            .map(|chunk| {
                chunk.map(|c| ChunkInfo {
                    chunk_type: c.chunk_type.to_string(),
                    length: c.data.len(),
                    offset: c.offset,
                    crc: c.crc,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(InspectOutput::Png {
            width: header.width,
            height: header.height,
            bit_depth: header.bit_depth,
            color_type: header.color_type,
            interlace: header.interlace_method,
            chunks,
            file_hash: blake3::hash(bytes).to_hex().to_string(),
        });
    }

    if bytes.starts_with(b"RIFF") {
        let wav = parse_wav(bytes)?;
        return Ok(InspectOutput::Wav {
            format_code: wav.format_code,
            channels: wav.format.channels,
            sample_rate: wav.format.sample_rate,
            bits_per_sample: wav.format.bits_per_sample,
            num_samples: wav.num_samples(),
            duration_seconds: wav.duration_seconds(),
            pcm_hash: wav.pcm_hash(),
        });
    }

    anyhow::bail!("unrecognized file type (expected PNG or WAV)")
}
