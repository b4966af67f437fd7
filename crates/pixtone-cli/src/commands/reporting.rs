//! Shared human-readable output helpers.

use colored::Colorize;
use pixtone_codec::AnalysisReport;

/// Prints analysis warnings as yellow `!` lines.
pub(super) fn print_warnings(report: &AnalysisReport) {
    for warning in &report.warnings {
        println!("  {} {}", "!".yellow().bold(), warning);
    }
}

/// First 16 hex digits of a hash, for compact display.
pub(super) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(16)]
}
