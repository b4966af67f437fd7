//! WAV parsing: RIFF/WAVE magic, `fmt ` fields and the `data` byte range.

use super::format::{WavFormat, FORMAT_PCM};
use super::writer::pcm16_to_samples;
use crate::error::{AudioError, AudioResult};

/// A parsed WAV file borrowing its sample bytes from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavData<'a> {
    /// Format from the `fmt ` chunk.
    pub format: WavFormat,
    /// Format code from the `fmt ` chunk (1 = PCM).
    pub format_code: u16,
    /// Byte offset of the sample data within the file.
    pub data_offset: usize,
    /// Sample bytes, trimmed to whole sample frames.
    pub data: &'a [u8],
}

impl WavData<'_> {
    /// Number of sample frames.
    pub fn num_samples(&self) -> usize {
        match self.format.block_align() {
            0 => 0,
            align => self.data.len() / align as usize,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples() as f64 / self.format.sample_rate as f64
    }

    /// Decodes the data chunk as 16-bit samples.
    pub fn samples(&self) -> Vec<i16> {
        pcm16_to_samples(self.data)
    }

    /// BLAKE3 hash of the sample bytes.
    pub fn pcm_hash(&self) -> String {
        blake3::hash(self.data).to_hex().to_string()
    }
}

fn read_u16(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

fn read_u32(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

/// Parses the container without restricting the format.
///
/// Chunks are walked from offset 12 with word alignment until `data` is
/// found. A `data` chunk whose declared size runs past the buffer is cut to
/// the bytes present.
pub fn parse_wav(bytes: &[u8]) -> AudioResult<WavData<'_>> {
    if bytes.len() < 12 {
        return Err(AudioError::invalid_container(format!(
            "file is {} bytes, shorter than the RIFF header",
            bytes.len()
        )));
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(AudioError::invalid_container("missing RIFF magic"));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(AudioError::invalid_container("missing WAVE magic"));
    }

    let mut format: Option<(WavFormat, u16)> = None;
    let mut pos = 12;

    while pos + 8 <= bytes.len() {
        let chunk_id = &bytes[pos..pos + 4];
        let chunk_size = read_u32(bytes, pos + 4) as usize;
        let body = pos + 8;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 || body + 16 > bytes.len() {
                    return Err(AudioError::invalid_container(format!(
                        "fmt chunk is {} bytes, need at least 16",
                        chunk_size
                    )));
                }
                let format_code = read_u16(bytes, body);
                let parsed = WavFormat {
                    channels: read_u16(bytes, body + 2),
                    sample_rate: read_u32(bytes, body + 4),
                    bits_per_sample: read_u16(bytes, body + 14),
                };
                format = Some((parsed, format_code));
            }
            b"data" => {
                let (format, format_code) = format.ok_or(AudioError::MissingFmtChunk)?;
                let available = bytes.len() - body;
                if chunk_size > available {
                    log::warn!(
                        "data chunk declares {} bytes but only {} remain; using what is present",
                        chunk_size,
                        available
                    );
                }
                let mut len = chunk_size.min(available);
                let align = format.block_align() as usize;
                if align > 0 {
                    len -= len % align;
                }
                return Ok(WavData {
                    format,
                    format_code,
                    data_offset: body,
                    data: &bytes[body..body + len],
                });
            }
            other => {
                log::debug!(
                    "skipping WAV chunk {:?} ({} bytes) at offset {}",
                    String::from_utf8_lossy(other),
                    chunk_size,
                    pos
                );
            }
        }

        pos = body.saturating_add(chunk_size);
        // Align to word boundary
        if chunk_size % 2 == 1 {
            pos = pos.saturating_add(1);
        }
    }

    Err(AudioError::MissingDataChunk)
}

/// Parses a WAV file and checks it is 16-bit mono PCM at `sample_rate`.
pub fn read_wav(bytes: &[u8], sample_rate: u32) -> AudioResult<WavData<'_>> {
    let wav = parse_wav(bytes)?;
    if wav.format_code != FORMAT_PCM {
        return Err(AudioError::unsupported(
            "format code",
            FORMAT_PCM as u32,
            wav.format_code as u32,
        ));
    }
    wav.format.ensure_mono16(sample_rate)?;
    Ok(wav)
}

/// BLAKE3 hash of the sample bytes of a WAV file, or `None` if it does not parse.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    parse_wav(wav_data).ok().map(|wav| wav.pcm_hash())
}
