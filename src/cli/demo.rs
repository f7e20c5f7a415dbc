use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use peakfinder::demo::{write_source_parquet, SyntheticRunConfig};

/// Write a synthetic IMS-MS source file
pub fn run(output: PathBuf, mz_bins: usize, rt_scans: usize, dt_bins: usize) -> Result<()> {
    info!("peakfinder - Synthetic IMS-MS Run");
    info!("==================================");

    let config = SyntheticRunConfig {
        mz_bins,
        rt_scans,
        dt_bins,
        ..SyntheticRunConfig::default()
    };
    info!(
        "Grid: {} m/z x {} scans x {} drift bins ({} MS1 rows)",
        mz_bins,
        rt_scans,
        dt_bins,
        config.ms1_rows()
    );

    let rows = write_source_parquet(&output, &config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    println!("Wrote {} rows to {}", rows, output.display());
    info!(
        "  File size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );
    println!("\nDetect its peaks with:");
    println!("  peakfinder detect {}", output.display());

    Ok(())
}
