#![no_main]

use libfuzzer_sys::fuzz_target;
use peakfinder::detect::{detect_peaks, ToleranceConfig};
use peakfinder::signal::SamplePoint;

fuzz_target!(|data: &[u8]| {
    // First 32 bytes are the tolerances, the rest are points of 32 bytes each
    if data.len() < 32 {
        return;
    }
    let read = |chunk: &[u8]| {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&chunk[..8]);
        f64::from_le_bytes(bytes)
    };

    let config = ToleranceConfig {
        mz_tolerance: read(&data[0..8]),
        rt_tolerance: read(&data[8..16]),
        dt_tolerance: read(&data[16..24]),
        min_intensity: read(&data[24..32]),
    };
    let points: Vec<SamplePoint> = data[32..]
        .chunks_exact(32)
        .map(|c| SamplePoint::new(read(&c[0..8]), read(&c[8..16]), read(&c[16..24]), read(&c[24..32])))
        .collect();

    // Arbitrary input must be rejected or classified, never panic
    if let Ok(flags) = detect_peaks(&points, &config) {
        assert_eq!(flags.len(), points.len());
    }
});
