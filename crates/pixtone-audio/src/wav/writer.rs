//! WAV writing and PCM conversion.

use std::io::{self, Write};

use super::format::{WavFormat, FORMAT_PCM};
use super::WAV_HEADER_LEN;

/// Writes a complete WAV file to a writer.
///
/// `pcm_data` is the raw little-endian payload of the `data` chunk.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let block_align = u16::try_from(format.block_align())
        .map_err(|_| header_overflow("block align", format.block_align().into()))?;
    let byte_rate = u32::try_from(format.byte_rate())
        .map_err(|_| header_overflow("byte rate", format.byte_rate()))?;
    let data_size = pcm_data.len() as u32;
    // Everything after the 8-byte RIFF header.
    let riff_size = (WAV_HEADER_LEN as u32 - 8) + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&FORMAT_PCM.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

fn header_overflow(field: &str, value: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} {} does not fit the WAV header", field, value),
    )
}

/// Writes a WAV file to a byte vector.
///
/// # Panics
///
/// Panics if the block align or byte rate of `format` overflow their header
/// fields, which cannot happen for [`WavFormat::mono`] at any rate up to
/// `u32::MAX / 2`.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts 16-bit samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// Converts little-endian PCM bytes to 16-bit samples.
///
/// A trailing odd byte is ignored.
pub fn pcm16_to_samples(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
