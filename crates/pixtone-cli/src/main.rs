//! Pixtone CLI - transcodes PNG images to pitch-encoded WAV audio and back.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pixtone_cli::commands;

/// Pixtone - images as tones, tones as images
#[derive(Parser)]
#[command(name = "pixtone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a PNG image as a WAV file
    Encode {
        /// Path to the input PNG
        #[arg(short, long)]
        input: String,

        /// Path of the WAV file to write
        #[arg(short, long)]
        output: String,

        /// Codec parameter file (JSON); defaults to the v1 set
        #[arg(long)]
        params: Option<String>,

        /// Encode one luminance value per pixel instead of every channel
        #[arg(long)]
        luminance: bool,
    },

    /// Decode a WAV file back into a PNG image
    Decode {
        /// Path to the input WAV
        #[arg(short, long)]
        input: String,

        /// Path of the PNG file to write
        #[arg(short, long)]
        output: String,

        /// Codec parameter file (JSON); defaults to the v1 set
        #[arg(long)]
        params: Option<String>,

        /// Scanline filter for the written PNG
        #[arg(long, default_value = "paeth", value_parser = ["paeth", "none", "sub", "up", "average", "adaptive"])]
        filter: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert input/*.png to audio/ and audio/*.wav to output/ under a root
    Batch {
        /// Root directory holding input/, audio/ and output/ (default: .)
        #[arg(short, long)]
        root: Option<String>,

        /// Codec parameter file (JSON); defaults to the v1 set
        #[arg(long)]
        params: Option<String>,
    },

    /// Show PNG chunks or WAV format details of a file
    Inspect {
        /// Path to a PNG or WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the default codec parameters as JSON
    Params,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            params,
            luminance,
        } => commands::encode::run(&input, &output, params.as_deref(), luminance),
        Commands::Decode {
            input,
            output,
            params,
            filter,
            json,
        } => commands::decode::run(&input, &output, params.as_deref(), &filter, json),
        Commands::Batch { root, params } => {
            commands::batch::run(root.as_deref(), params.as_deref())
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Params => commands::params::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_encode() {
        let cli = Cli::try_parse_from([
            "pixtone", "encode", "--input", "a.png", "--output", "a.wav", "--luminance",
        ])
        .unwrap();
        match cli.command {
            Commands::Encode {
                input,
                output,
                params,
                luminance,
            } => {
                assert_eq!(input, "a.png");
                assert_eq!(output, "a.wav");
                assert!(params.is_none());
                assert!(luminance);
            }
            _ => panic!("expected encode command"),
        }
    }

    #[test]
    fn test_cli_parses_decode_defaults() {
        let cli =
            Cli::try_parse_from(["pixtone", "decode", "-i", "a.wav", "-o", "a.png"]).unwrap();
        match cli.command {
            Commands::Decode { filter, json, .. } => {
                assert_eq!(filter, "paeth");
                assert!(!json);
            }
            _ => panic!("expected decode command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_filter() {
        let err = Cli::try_parse_from([
            "pixtone", "decode", "-i", "a.wav", "-o", "a.png", "--filter", "bicubic",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("bicubic"));
    }

    #[test]
    fn test_cli_requires_output_for_encode() {
        let err = Cli::try_parse_from(["pixtone", "encode", "--input", "a.png"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_cli_parses_batch_and_params() {
        let cli = Cli::try_parse_from(["pixtone", "batch", "--root", "work"]).unwrap();
        match cli.command {
            Commands::Batch { root, params } => {
                assert_eq!(root.as_deref(), Some("work"));
                assert!(params.is_none());
            }
            _ => panic!("expected batch command"),
        }

        let cli = Cli::try_parse_from(["pixtone", "params"]).unwrap();
        assert!(matches!(cli.command, Commands::Params));
    }

    #[test]
    fn test_cli_parses_inspect_json() {
        let cli = Cli::try_parse_from(["pixtone", "inspect", "-i", "x.png", "--json"]).unwrap();
        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input, "x.png");
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }
}
