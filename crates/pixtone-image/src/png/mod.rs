//! PNG reader and writer for 8-bit Grayscale, RGB and RGBA images.
//!
//! Layout: signature, then `length | type | data | crc` chunks in the order
//! IHDR, IDAT+, IEND. Ancillary chunks are skipped on read and never written.

mod chunk;
mod decode;
mod encode;
mod filter;
mod header;

#[cfg(test)]
mod tests;

pub use chunk::{write_chunk, ChunkType, PngChunk, PngChunkReader};
pub use decode::{decode_png, read_header};
pub use encode::{encode_png, write_png, PngConfig};
pub use filter::{filter_row, paeth_predictor, unfilter_row, FilterStrategy, FilterType};
pub use header::ImageHeader;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
