use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use plotly::common::{Line, Marker, Mode};
use plotly::{Layout, Plot, Scatter};

use crate::detect::PeakFlags;
use crate::signal::SignalArrays;

use super::{DisplayRange, PlotConfig, PlotError};

const SIGNAL_COLOR: &str = "blue";
const PEAK_COLOR: &str = "red";

/// Build a plot of intensity against row position with the peaks marked.
///
/// The first trace is the signal drawn as a line, the second the peak rows
/// drawn as markers. Only rows inside the display range are drawn.
pub fn plot_peaks(
    signal: &SignalArrays,
    flags: &PeakFlags,
    config: &PlotConfig,
) -> Result<Plot, PlotError> {
    if flags.len() != signal.len() {
        return Err(PlotError::LengthMismatch {
            rows: signal.len(),
            flags: flags.len(),
        });
    }

    let range = config
        .display_range
        .unwrap_or_else(|| DisplayRange::new(0, signal.len()));
    range.check(signal.len())?;
    let DisplayRange { start, stop } = range;

    let positions: Vec<usize> = (start..stop).collect();
    let intensities = signal.intensity[start..stop].to_vec();

    let (peak_positions, peak_intensities): (Vec<usize>, Vec<f64>) = (start..stop)
        .filter(|&i| flags[i])
        .map(|i| (i, signal.intensity[i]))
        .unzip();
    debug!(
        "Plotting rows {}..{} with {} peaks",
        start,
        stop,
        peak_positions.len()
    );

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(positions, intensities)
            .mode(Mode::Lines)
            .name("Signal")
            .line(Line::new().color(SIGNAL_COLOR)),
    );
    plot.add_trace(
        Scatter::new(peak_positions, peak_intensities)
            .mode(Mode::Markers)
            .name("Peaks")
            .marker(Marker::new().color(PEAK_COLOR).size(8)),
    );

    let (width, height) = config.pixel_size();
    let layout = Layout::new()
        .title(format!("Signal with peaks (from {} to {})", start, stop))
        .width(width)
        .height(height)
        .x_axis(plotly::layout::Axis::new().title("Position".to_string()))
        .y_axis(plotly::layout::Axis::new().title("Intensity".to_string()));
    plot.set_layout(layout);

    Ok(plot)
}

/// Write a plot as a standalone HTML page
pub fn save_html<P: AsRef<Path>>(plot: &Plot, path: P) -> Result<(), PlotError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(plot.to_html().as_bytes())?;
    file.flush()?;
    Ok(())
}
