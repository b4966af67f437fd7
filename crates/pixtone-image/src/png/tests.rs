//! End-to-end PNG tests, including interop with the `png` crate.

use pixtone_spec::{ColorType, Image};
use pretty_assertions::assert_eq;

use super::*;
use crate::error::ImageError;

fn gradient(width: u32, height: u32, color_type: ColorType) -> Image {
    let len = Image::buffer_len(width, height, color_type);
    let data = (0..len).map(|i| ((i * 37 + i / 7) % 256) as u8).collect();
    Image::new(width, height, color_type, data).unwrap()
}

/// Encodes with the `png` crate.
fn reference_encode(image: &Image) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = ::png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(match image.color_type() {
            ColorType::Grayscale => ::png::ColorType::Grayscale,
            ColorType::Rgb => ::png::ColorType::Rgb,
            ColorType::Rgba => ::png::ColorType::Rgba,
        });
        encoder.set_depth(::png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(image.data()).unwrap();
    }
    out
}

/// Decodes with the `png` crate.
fn reference_decode(bytes: &[u8]) -> (u32, u32, ::png::ColorType, Vec<u8>) {
    let decoder = ::png::Decoder::new(std::io::Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, info.height, info.color_type, buf)
}

#[test]
fn test_roundtrip_all_color_types_and_filters() {
    for color_type in ColorType::ALL {
        let image = gradient(7, 5, color_type);
        for filter in FilterType::ALL {
            let config = PngConfig::default().with_filter(filter);
            let bytes = encode_png(&image, &config).unwrap();
            assert_eq!(decode_png(&bytes).unwrap(), image, "{} {:?}", color_type, filter);
        }
        let bytes = encode_png(&image, &PngConfig::adaptive()).unwrap();
        assert_eq!(decode_png(&bytes).unwrap(), image);
    }
}

#[test]
fn test_single_pixel_image() {
    let image = Image::new(1, 1, ColorType::Rgba, vec![1, 2, 3, 4]).unwrap();
    let bytes = encode_png(&image, &PngConfig::best_compression()).unwrap();
    assert_eq!(decode_png(&bytes).unwrap(), image);
}

#[test]
fn test_chunk_order_and_header() {
    let image = gradient(3, 2, ColorType::Rgb);
    let bytes = encode_png(&image, &PngConfig::default()).unwrap();

    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    let types: Vec<ChunkType> = PngChunkReader::new(&bytes)
        .unwrap()
        .map(|c| c.unwrap().chunk_type)
        .collect();
    assert_eq!(types.first(), Some(&ChunkType::IHDR));
    assert_eq!(types.last(), Some(&ChunkType::IEND));
    assert!(types[1..types.len() - 1].iter().all(|t| *t == ChunkType::IDAT));

    let header = read_header(&bytes).unwrap();
    assert_eq!(header.width, 3);
    assert_eq!(header.height, 2);
    assert_eq!(header.bit_depth, 8);
    assert_eq!(header.color_type, 2);
}

#[test]
fn test_large_image_splits_idat() {
    // Incompressible-ish data larger than one IDAT chunk.
    let len = Image::buffer_len(300, 300, ColorType::Rgb);
    let mut state = 0x1234_5678u32;
    let data = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    let image = Image::new(300, 300, ColorType::Rgb, data).unwrap();
    let bytes = encode_png(&image, &PngConfig::fast()).unwrap();

    let idat_count = PngChunkReader::new(&bytes)
        .unwrap()
        .filter(|c| c.as_ref().unwrap().chunk_type == ChunkType::IDAT)
        .count();
    assert!(idat_count > 1);
    assert_eq!(decode_png(&bytes).unwrap(), image);
}

#[test]
fn test_decodes_reference_encoder_output() {
    for color_type in ColorType::ALL {
        let image = gradient(9, 4, color_type);
        let bytes = reference_encode(&image);
        assert_eq!(decode_png(&bytes).unwrap(), image);
    }
}

#[test]
fn test_reference_decoder_reads_our_output() {
    let image = gradient(6, 6, ColorType::Rgba);
    let bytes = encode_png(&image, &PngConfig::adaptive()).unwrap();
    let (width, height, color_type, data) = reference_decode(&bytes);
    assert_eq!((width, height), (6, 6));
    assert_eq!(color_type, ::png::ColorType::Rgba);
    assert_eq!(data, image.data());
}

#[test]
fn test_skips_ancillary_chunks() {
    let image = gradient(2, 2, ColorType::Grayscale);
    let encoded = encode_png(&image, &PngConfig::none()).unwrap();

    // Insert a tEXt chunk after IHDR (8 signature + 25 IHDR bytes).
    let mut bytes = encoded[..33].to_vec();
    write_chunk(&mut bytes, ChunkType(*b"tEXt"), b"Comment\0hello");
    bytes.extend_from_slice(&encoded[33..]);

    assert_eq!(decode_png(&bytes).unwrap(), image);
}

#[test]
fn test_rejects_bad_signature() {
    let mut bytes = encode_png(&gradient(2, 2, ColorType::Rgb), &PngConfig::default()).unwrap();
    bytes[1] = b'X';
    assert!(matches!(decode_png(&bytes), Err(ImageError::Format { .. })));
}

#[test]
fn test_rejects_corrupted_crc() {
    let mut bytes = encode_png(&gradient(2, 2, ColorType::Rgb), &PngConfig::default()).unwrap();
    // Flip a width byte inside IHDR without fixing its CRC.
    bytes[8 + 8 + 3] ^= 0xFF;
    assert!(matches!(
        decode_png(&bytes),
        Err(ImageError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_rejects_missing_idat() {
    let image = gradient(2, 2, ColorType::Rgb);
    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IEND, &[]);
    assert!(matches!(decode_png(&bytes), Err(ImageError::Format { .. })));
}

#[test]
fn test_rejects_ihdr_not_first() {
    let image = gradient(2, 2, ColorType::Rgb);
    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType(*b"tEXt"), b"a\0b");
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IEND, &[]);
    assert!(matches!(decode_png(&bytes), Err(ImageError::Format { .. })));
}

#[test]
fn test_rejects_invalid_filter_byte() {
    let image = gradient(2, 2, ColorType::Grayscale);
    let raw = vec![0, 1, 2, 7, 3, 4];
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);

    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IDAT, &compressed);
    write_chunk(&mut bytes, ChunkType::IEND, &[]);

    assert!(matches!(
        decode_png(&bytes),
        Err(ImageError::InvalidFilterType { row: 1, value: 7 })
    ));
}

#[test]
fn test_rejects_truncated_image_data() {
    let image = gradient(4, 4, ColorType::Rgb);
    // One full row of four, filter byte included.
    let raw = vec![0u8; 13];
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);

    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IDAT, &compressed);
    write_chunk(&mut bytes, ChunkType::IEND, &[]);

    assert!(matches!(
        decode_png(&bytes),
        Err(ImageError::TruncatedData {
            expected: 52,
            actual: 13
        })
    ));
}

#[test]
fn test_rejects_garbage_idat() {
    let image = gradient(2, 2, ColorType::Rgb);
    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IDAT, &[0xFF, 0xFF, 0xFF, 0xFF]);
    write_chunk(&mut bytes, ChunkType::IEND, &[]);

    assert!(matches!(
        decode_png(&bytes),
        Err(ImageError::Decompression { .. })
    ));
}

#[test]
fn test_extra_decompressed_bytes_are_ignored() {
    let image = Image::new(2, 1, ColorType::Grayscale, vec![5, 6]).unwrap();
    let raw = vec![0, 5, 6, 99, 99, 99];
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);

    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, ChunkType::IHDR, &ImageHeader::for_image(&image).to_bytes());
    write_chunk(&mut bytes, ChunkType::IDAT, &compressed);
    write_chunk(&mut bytes, ChunkType::IEND, &[]);

    assert_eq!(decode_png(&bytes).unwrap(), image);
}

#[test]
fn test_write_png_to_file() {
    let dir = std::env::temp_dir().join(format!("pixtone-image-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.png");

    let image = gradient(4, 3, ColorType::Rgb);
    write_png(&image, &path, &PngConfig::default()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(decode_png(&bytes).unwrap(), image);

    std::fs::remove_dir_all(&dir).ok();
}
