#![no_main]

use libfuzzer_sys::fuzz_target;

use peakfinder::loader::{LoaderConfig, SignalLoader};

fuzz_target!(|data: &[u8]| {
    // The loader reads from paths, so stage the bytes in a temp file
    let path = std::env::temp_dir().join(format!("peakfinder-fuzz-{}.parquet", std::process::id()));
    if std::fs::write(&path, data).is_err() {
        return;
    }

    // Malformed Parquet must surface as an error, never a panic
    let loader = SignalLoader::new(LoaderConfig::default().all_ms_levels());
    let _ = loader.load(&path);
    let _ = std::fs::remove_file(&path);
});
