#![no_main]

use libfuzzer_sys::fuzz_target;
use pixtone_spec::CodecParams;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(params) = CodecParams::from_json(s) {
            let json = params.to_json_pretty().expect("serialize");
            let back = CodecParams::from_json(&json).expect("reparse");
            assert_eq!(back.version, params.version);
            assert_eq!(back.sample_rate, params.sample_rate);
            assert_eq!(back.samples_per_component, params.samples_per_component);
        }
    }
});
