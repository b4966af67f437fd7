//! Chunk framing: `length(4 BE) | type(4) | data | crc32(4 BE)`.

use std::fmt;

use crate::crc::Crc32;
use crate::error::{ImageError, ImageResult};

use super::PNG_SIGNATURE;

/// Four-byte chunk type tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header.
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Image data.
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image trailer.
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Critical chunks have an uppercase first letter (bit 5 clear).
    pub fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

/// One chunk borrowed from a PNG buffer.
#[derive(Debug, Clone, Copy)]
pub struct PngChunk<'a> {
    /// Chunk type tag.
    pub chunk_type: ChunkType,
    /// Chunk payload.
    pub data: &'a [u8],
    /// CRC stored in the file.
    pub crc: u32,
    /// Byte offset of the length field.
    pub offset: usize,
}

impl PngChunk<'_> {
    /// CRC-32 over type and data.
    pub fn computed_crc(&self) -> u32 {
        chunk_crc(self.chunk_type, self.data)
    }
}

fn chunk_crc(chunk_type: ChunkType, data: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(chunk_type.as_bytes());
    hasher.update(data);
    hasher.finalize()
}

/// Iterates the chunks of a PNG buffer, verifying every CRC.
///
/// Stops after IEND or at the end of the buffer, whichever comes first.
/// A chunk whose declared length runs past the buffer is an error.
#[derive(Debug, Clone)]
pub struct PngChunkReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    finished: bool,
}

impl<'a> PngChunkReader<'a> {
    /// Validates the signature and positions the reader on the first chunk.
    pub fn new(bytes: &'a [u8]) -> ImageResult<Self> {
        if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
            return Err(ImageError::format("invalid PNG signature"));
        }
        Ok(Self {
            bytes,
            pos: PNG_SIGNATURE.len(),
            finished: false,
        })
    }

    fn read_chunk(&mut self) -> ImageResult<PngChunk<'a>> {
        let offset = self.pos;
        let remaining = self.bytes.len() - offset;
        if remaining < 12 {
            return Err(ImageError::format(format!(
                "truncated chunk header at offset {} ({} bytes left)",
                offset, remaining
            )));
        }

        let header = &self.bytes[offset..offset + 8];
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = ChunkType([header[4], header[5], header[6], header[7]]);

        if length > remaining - 12 {
            return Err(ImageError::format(format!(
                "{} chunk at offset {} declares {} bytes but only {} remain",
                chunk_type,
                offset,
                length,
                remaining - 12
            )));
        }

        let data_start = offset + 8;
        let data = &self.bytes[data_start..data_start + length];
        let crc_bytes = &self.bytes[data_start + length..data_start + length + 4];
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        let chunk = PngChunk {
            chunk_type,
            data,
            crc,
            offset,
        };

        let computed = chunk.computed_crc();
        if computed != crc {
            return Err(ImageError::ChecksumMismatch {
                chunk: chunk_type.to_string(),
                expected: crc,
                actual: computed,
            });
        }

        self.pos = data_start + length + 4;
        Ok(chunk)
    }
}

impl<'a> Iterator for PngChunkReader<'a> {
    type Item = ImageResult<PngChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.pos >= self.bytes.len() {
            return None;
        }

        match self.read_chunk() {
            Ok(chunk) => {
                if chunk.chunk_type == ChunkType::IEND {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Appends one complete chunk (length, type, data, CRC) to `out`.
pub fn write_chunk(out: &mut Vec<u8>, chunk_type: ChunkType, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type.as_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(chunk_type, data).to_be_bytes());
}
