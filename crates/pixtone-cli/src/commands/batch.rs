//! Batch command
//!
//! Under a root directory: every `input/*.png` becomes `audio/C_<stem>.wav`,
//! then every `audio/*.wav` becomes `output/R<stem>.png`. A file that fails
//! is reported and skipped; the rest of the batch continues.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use pixtone_image::PngConfig;
use pixtone_spec::CodecParams;

use super::decode::decode_file;
use super::encode::encode_file;
use super::has_extension;
use super::json_output::{BatchReport, BatchResult};

/// Source PNG files.
pub const INPUT_DIR: &str = "input";
/// Synthesized WAV files.
pub const AUDIO_DIR: &str = "audio";
/// Reconstructed PNG files.
pub const OUTPUT_DIR: &str = "output";

/// Batch report file written under the root.
pub const REPORT_FILE: &str = "batch-report.json";

/// Run batch processing under `root` (default: current directory).
pub fn run(root: Option<&str>, params_path: Option<&str>) -> Result<ExitCode> {
    let params = super::load_params(params_path)?;
    let root = PathBuf::from(root.unwrap_or("."));
    let report = run_batch(&root, &params)?;

    if report.failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Creates the directory layout, converts both directions and writes the report.
pub fn run_batch(root: &Path, params: &CodecParams) -> Result<BatchReport> {
    let input_dir = root.join(INPUT_DIR);
    let audio_dir = root.join(AUDIO_DIR);
    let output_dir = root.join(OUTPUT_DIR);
    for dir in [&input_dir, &audio_dir, &output_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let batch_start = Instant::now();
    let mut results = Vec::new();

    let pngs = list_files(&input_dir, "png");
    if pngs.is_empty() {
        println!("No PNG files found in {}", input_dir.display());
    }
    for (i, png) in pngs.iter().enumerate() {
        print_progress(i, pngs.len(), png);
        let out = audio_dir.join(format!("C_{}.wav", file_stem(png)));
        let result = encode_file(png, &out, params, false).map(|_| Vec::new());
        results.push(record(png, &out, result));
    }

    let wavs = list_files(&audio_dir, "wav");
    if wavs.is_empty() {
        println!("No WAV files found in {}", audio_dir.display());
    }
    for (i, wav) in wavs.iter().enumerate() {
        print_progress(i, wavs.len(), wav);
        let out = output_dir.join(format!("R{}.png", file_stem(wav)));
        let result = decode_file(wav, &out, params, PngConfig::default()).map(|(report, _)| {
            report
                .warnings
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
        });
        results.push(record(wav, &out, result));
    }

    let passed = results.iter().filter(|r| r.success).count();
    let report = BatchReport {
        total: results.len(),
        passed,
        failed: results.len() - passed,
        results,
    };

    let report_path = root.join(REPORT_FILE);
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    print_summary(&report, batch_start, &report_path);
    Ok(report)
}

/// Files directly inside `dir` with extension `ext` (any case), sorted by name.
fn list_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && has_extension(e.path(), ext))
        .map(|e| e.into_path())
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_progress(index: usize, total: usize, path: &Path) {
    let progress = format!("[{}/{}]", index + 1, total).cyan().bold();
    println!("{} {}", progress, path.display());
}

fn record(input: &Path, output: &Path, result: Result<Vec<String>>) -> BatchResult {
    match result {
        Ok(warnings) => {
            println!("  {} {} {}", "✓ PASS".green().bold(), "•".dimmed(), output.display());
            for warning in &warnings {
                println!("  {} {}", "!".yellow().bold(), warning);
            }
            BatchResult {
                input: input.to_string_lossy().into_owned(),
                output: Some(output.to_string_lossy().into_owned()),
                success: true,
                error: None,
                warnings,
            }
        }
        Err(e) => {
            println!("  {} {} {:#}", "✗ ERROR".red().bold(), "•".dimmed(), e);
            BatchResult {
                input: input.to_string_lossy().into_owned(),
                output: None,
                success: false,
                error: Some(format!("{:#}", e)),
                warnings: Vec::new(),
            }
        }
    }
}

fn print_summary(report: &BatchReport, start: Instant, report_path: &Path) {
    println!("\n{}", "=".repeat(60));
    println!(
        "{} {} {}",
        "Batch Summary".bold(),
        "•".dimmed(),
        format!("{:.1}s total", start.elapsed().as_secs_f64()).dimmed()
    );
    println!("  Total:  {}", report.total);
    println!(
        "  Passed: {}",
        if report.failed == 0 {
            report.passed.to_string().green()
        } else {
            report.passed.to_string().normal()
        }
    );
    println!(
        "  Failed: {}",
        if report.failed > 0 {
            report.failed.to_string().red()
        } else {
            report.failed.to_string().normal()
        }
    );
    println!("Report: {}", report_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_files_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.PNG", "c.wav", "10.png", "2.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_files(dir.path(), "png")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["10.png", "2.png", "a.PNG", "b.png"]);
    }
}
