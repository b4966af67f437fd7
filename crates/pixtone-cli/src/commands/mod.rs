//! CLI command implementations

pub mod batch;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod json_output;
pub mod params;

mod reporting;

use anyhow::{Context, Result};
use std::path::Path;

use pixtone_image::{FilterStrategy, FilterType, PngConfig};
use pixtone_spec::CodecParams;

/// Loads a parameter set from a JSON file, or the v1 defaults.
pub fn load_params(path: Option<&str>) -> Result<CodecParams> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read params file: {}", path))?;
            CodecParams::from_json(&json)
                .with_context(|| format!("Invalid params file: {}", path))
        }
        None => Ok(CodecParams::v1()),
    }
}

/// Maps a `--filter` value to a PNG writer configuration.
pub fn png_config_for(filter: &str) -> Result<PngConfig> {
    let strategy = match filter {
        "adaptive" => FilterStrategy::Adaptive,
        name => FilterType::from_name(name)
            .map(FilterStrategy::Fixed)
            .ok_or_else(|| anyhow::anyhow!("unknown filter: {}", name))?,
    };
    Ok(PngConfig {
        filter: strategy,
        ..PngConfig::default()
    })
}

/// Whether `path` has the given extension, ignoring case.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
