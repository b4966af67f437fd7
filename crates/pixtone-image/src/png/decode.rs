//! PNG reader.

use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};
use pixtone_spec::Image;

use super::chunk::{ChunkType, PngChunkReader};
use super::filter::{unfilter_row, FilterType};
use super::header::ImageHeader;
use crate::error::{ImageError, ImageResult};

/// Reads only the IHDR of a PNG buffer.
pub fn read_header(bytes: &[u8]) -> ImageResult<ImageHeader> {
    let mut chunks = PngChunkReader::new(bytes)?;
    let first = chunks
        .next()
        .ok_or_else(|| ImageError::format("no chunks after signature"))??;
    if first.chunk_type != ChunkType::IHDR {
        return Err(ImageError::format(format!(
            "first chunk must be IHDR, found {}",
            first.chunk_type
        )));
    }
    ImageHeader::parse(first.data)
}

/// Decodes an 8-bit, non-interlaced Grayscale, RGB or RGBA PNG.
///
/// Ancillary chunks are skipped. IDAT payloads are concatenated in order and
/// inflated as one zlib stream. Decompressed bytes beyond the expected
/// `height * (1 + stride)` are ignored.
pub fn decode_png(bytes: &[u8]) -> ImageResult<Image> {
    let mut chunks = PngChunkReader::new(bytes)?;

    let first = chunks
        .next()
        .ok_or_else(|| ImageError::format("no chunks after signature"))??;
    if first.chunk_type != ChunkType::IHDR {
        return Err(ImageError::format(format!(
            "first chunk must be IHDR, found {}",
            first.chunk_type
        )));
    }
    let header = ImageHeader::parse(first.data)?;
    let color_type = header.supported_color_type()?;

    let mut compressed = Vec::new();
    let mut idat_count = 0usize;
    let mut saw_iend = false;
    for chunk in chunks {
        let chunk = chunk?;
        match chunk.chunk_type {
            ChunkType::IDAT => {
                compressed.extend_from_slice(chunk.data);
                idat_count += 1;
            }
            ChunkType::IEND => {
                saw_iend = true;
                break;
            }
            ChunkType::IHDR => {
                return Err(ImageError::format("duplicate IHDR chunk"));
            }
            other => {
                log::debug!(
                    "skipping {} chunk ({} bytes) at offset {}",
                    other,
                    chunk.data.len(),
                    chunk.offset
                );
            }
        }
    }

    if idat_count == 0 {
        return Err(ImageError::format("no IDAT chunk"));
    }
    if !saw_iend {
        log::debug!("PNG ends without IEND; decoding available IDAT data");
    }

    let bpp = color_type.bytes_per_pixel();
    let stride = (header.width as usize)
        .checked_mul(bpp)
        .ok_or_else(|| ImageError::format("image row size overflows"))?;
    let expected = stride
        .checked_add(1)
        .and_then(|row| row.checked_mul(header.height as usize))
        .ok_or_else(|| ImageError::format("image data size overflows"))?;

    let raw = inflate(&compressed, expected)?;
    if raw.len() < expected {
        return Err(ImageError::TruncatedData {
            expected,
            actual: raw.len(),
        });
    }

    let data = unfilter_scanlines(&raw[..expected], header.height, stride, bpp)?;
    log::debug!(
        "decoded {}x{} {} PNG from {} IDAT chunk(s)",
        header.width,
        header.height,
        color_type,
        idat_count
    );

    Ok(Image::new(header.width, header.height, color_type, data)?)
}

/// Inflates at most `limit` bytes from a zlib stream.
fn inflate(compressed: &[u8], limit: usize) -> ImageResult<Vec<u8>> {
    match decompress_to_vec_zlib_with_limit(compressed, limit) {
        Ok(raw) => Ok(raw),
        // Stream holds more than we need; the first `limit` bytes are valid.
        Err(e) if e.status == TINFLStatus::HasMoreOutput => Ok(e.output),
        Err(e) => Err(ImageError::Decompression {
            message: format!("{:?}", e.status),
        }),
    }
}

/// Reverses per-row filtering. `raw` holds `height` rows of `1 + stride` bytes.
fn unfilter_scanlines(raw: &[u8], height: u32, stride: usize, bpp: usize) -> ImageResult<Vec<u8>> {
    let mut out = vec![0u8; stride * height as usize];
    let zero_row = vec![0u8; stride];

    for (y, line) in raw.chunks_exact(stride + 1).enumerate() {
        let filter = FilterType::from_byte(line[0]).ok_or(ImageError::InvalidFilterType {
            row: y as u32,
            value: line[0],
        })?;

        let (done, rest) = out.split_at_mut(y * stride);
        let row = &mut rest[..stride];
        row.copy_from_slice(&line[1..]);

        let prev = if y == 0 {
            zero_row.as_slice()
        } else {
            &done[(y - 1) * stride..]
        };
        unfilter_row(filter, row, prev, bpp);
    }

    Ok(out)
}
