//! Pixtone Image Codec
//!
//! Reads and writes 8-bit Grayscale, RGB and RGBA PNG files without an
//! external PNG library:
//!
//! - [`crc`] - table-driven CRC-32 used for every chunk
//! - [`png`] - chunk framing, IHDR parsing, scanline filters, decode and encode
//!
//! DEFLATE is delegated to `miniz_oxide`.
//!
//! # Example
//!
//! ```
//! use pixtone_image::{decode_png, encode_png, PngConfig};
//! use pixtone_spec::{ColorType, Image};
//!
//! let image = Image::new(2, 1, ColorType::Rgb, vec![10, 20, 30, 200, 210, 220]).unwrap();
//! let bytes = encode_png(&image, &PngConfig::default()).unwrap();
//! assert_eq!(decode_png(&bytes).unwrap(), image);
//! ```

pub mod crc;
pub mod error;
pub mod png;

pub use crc::{crc32, Crc32};
pub use error::{ImageError, ImageResult};
pub use png::{
    decode_png, encode_png, read_header, write_png, ChunkType, FilterStrategy, FilterType,
    ImageHeader, PngChunk, PngChunkReader, PngConfig, PNG_SIGNATURE,
};
