#![no_main]

use libfuzzer_sys::fuzz_target;
use pixtone_image::{decode_png, encode_png, PngConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(image) = decode_png(data) {
        // Anything we accept must re-encode and decode to the same image.
        let bytes = encode_png(&image, &PngConfig::default()).expect("re-encode");
        let again = decode_png(&bytes).expect("decode re-encoded");
        assert_eq!(again, image);
    }
});
