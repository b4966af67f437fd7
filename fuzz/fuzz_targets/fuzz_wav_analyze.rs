#![no_main]

use libfuzzer_sys::fuzz_target;
use pixtone_audio::{parse_wav, FrequencyAnalyzer};
use pixtone_codec::analyze_wav;
use pixtone_spec::CodecParams;

fuzz_target!(|data: &[u8]| {
    let params = CodecParams {
        marker_samples: 256,
        samples_per_component: 64,
        ..CodecParams::v1()
    };

    if let Ok(wav) = parse_wav(data) {
        let samples = wav.samples();
        let analyzer = FrequencyAnalyzer::from_params(&params);
        let estimate = analyzer.estimate(&samples, params.nyquist());
        assert!(estimate.hz.is_finite() && estimate.hz >= 0.0);
    }

    if let Ok(report) = analyze_wav(data, &params) {
        assert_eq!(
            report.image.data().len(),
            report.image.width() as usize
                * report.image.height() as usize
                * report.color_type().bytes_per_pixel()
        );
    }
});
