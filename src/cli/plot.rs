use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use peakfinder::loader::read_peak_table;
use peakfinder::plot::{plot_peaks, save_html, DisplayRange, PlotConfig};

/// Draw a peak table as an HTML plot
pub fn run(
    peaks_file: PathBuf,
    output: PathBuf,
    display_range: Option<DisplayRange>,
    width: u32,
    height: u32,
) -> Result<()> {
    if !peaks_file.exists() {
        anyhow::bail!("Peak table does not exist: {}", peaks_file.display());
    }

    let (signal, flags) = read_peak_table(&peaks_file)
        .with_context(|| format!("Failed to read peak table {}", peaks_file.display()))?;
    info!(
        "Read {} rows ({} peaks) from {}",
        signal.len(),
        flags.peak_count(),
        peaks_file.display()
    );

    let mut config = PlotConfig::default().with_figsize(width, height);
    config.display_range = display_range;

    let plot = plot_peaks(&signal, &flags, &config).context("Failed to build plot")?;
    save_html(&plot, &output)
        .with_context(|| format!("Failed to write plot to {}", output.display()))?;

    println!("Plot written to {}", output.display());
    Ok(())
}
