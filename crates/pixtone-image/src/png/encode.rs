//! PNG writer.

use std::path::Path;

use miniz_oxide::deflate::compress_to_vec_zlib;
use pixtone_spec::Image;

use super::chunk::{write_chunk, ChunkType};
use super::filter::{filter_row, FilterStrategy, FilterType};
use super::header::ImageHeader;
use super::PNG_SIGNATURE;
use crate::error::ImageResult;

/// Largest IDAT payload written in a single chunk.
const MAX_IDAT_LEN: usize = 64 * 1024;

/// PNG writer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngConfig {
    /// Scanline filter selection.
    pub filter: FilterStrategy,
    /// zlib compression level (0-10).
    pub compression_level: u8,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            filter: FilterStrategy::Fixed(FilterType::Paeth),
            compression_level: 6,
        }
    }
}

impl PngConfig {
    /// Unfiltered rows at the default level.
    pub fn none() -> Self {
        Self {
            filter: FilterStrategy::Fixed(FilterType::None),
            ..Default::default()
        }
    }

    /// Per-row adaptive filter selection.
    pub fn adaptive() -> Self {
        Self {
            filter: FilterStrategy::Adaptive,
            ..Default::default()
        }
    }

    /// Adaptive filtering at the highest compression level.
    pub fn best_compression() -> Self {
        Self {
            filter: FilterStrategy::Adaptive,
            compression_level: 10,
        }
    }

    /// Fast encoding with minimal compression.
    pub fn fast() -> Self {
        Self {
            filter: FilterStrategy::Fixed(FilterType::None),
            compression_level: 1,
        }
    }

    /// Same config with a fixed filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = FilterStrategy::Fixed(filter);
        self
    }
}

/// Encodes `image` as PNG: signature, IHDR, one or more IDAT, IEND.
pub fn encode_png(image: &Image, config: &PngConfig) -> ImageResult<Vec<u8>> {
    let header = ImageHeader::for_image(image);
    let filtered = filter_scanlines(image, config.filter);
    let compressed = compress_to_vec_zlib(&filtered, config.compression_level.min(10));

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 25 + compressed.len() + 24);
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, ChunkType::IHDR, &header.to_bytes());
    for part in compressed.chunks(MAX_IDAT_LEN) {
        write_chunk(&mut out, ChunkType::IDAT, part);
    }
    write_chunk(&mut out, ChunkType::IEND, &[]);

    log::debug!(
        "encoded {}x{} {} PNG: {} filtered bytes -> {} compressed",
        image.width(),
        image.height(),
        image.color_type(),
        filtered.len(),
        compressed.len()
    );

    Ok(out)
}

/// Encodes `image` and writes it to `path`.
pub fn write_png(image: &Image, path: &Path, config: &PngConfig) -> ImageResult<()> {
    let bytes = encode_png(image, config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Prefixes each row with its filter byte and filters it.
fn filter_scanlines(image: &Image, strategy: FilterStrategy) -> Vec<u8> {
    let stride = image.stride();
    let bpp = image.color_type().bytes_per_pixel();
    let zero_row = vec![0u8; stride];

    let mut out = Vec::with_capacity((stride + 1) * image.height() as usize);
    let mut scratch = Vec::with_capacity(stride);

    for y in 0..image.height() {
        let raw = image.row(y);
        let prev = if y == 0 {
            zero_row.as_slice()
        } else {
            image.row(y - 1)
        };
        let filter = strategy.choose(raw, prev, bpp, &mut scratch);
        out.push(filter.as_byte());
        filter_row(filter, raw, prev, bpp, &mut out);
    }

    out
}
