//! # Detection Pipeline
//!
//! Loader → detector → (peak table writer, plot), strictly in that order.
//!
//! Loading and detection errors abort the run before anything is written.
//! A plot that cannot be drawn (for example a display range past the end of
//! the signal) is logged and reported in [`PipelineOutput::plot_error`]; the
//! peak table is still written. A peak table whose write fails is removed
//! rather than left truncated.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::detect::{DetectionError, DetectionSummary, PeakDetector, PeakFlags, ToleranceConfig};
use crate::loader::{LoadStats, LoaderConfig, LoaderError, SignalLoader};
use crate::plot::{plot_peaks, save_html, PlotConfig, PlotError};
use crate::signal::{SignalArrays, SortedSignal};
use crate::writer::{PeakTableWriter, TableMetadata, WriterConfig, WriterError, WriterStats};

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The source could not be loaded
    #[error("Loading failed: {0}")]
    Loader(#[from] LoaderError),

    /// The signal or tolerances were rejected
    #[error("Detection failed: {0}")]
    Detection(#[from] DetectionError),

    /// The peak table could not be written
    #[error("Writing failed: {0}")]
    Writer(#[from] WriterError),
}

/// Where and how to draw the plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput {
    /// HTML file to write
    pub path: PathBuf,
    /// Plot appearance
    pub config: PlotConfig,
}

/// Everything one run needs
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Source loading options
    pub loader: LoaderConfig,
    /// Detection tolerances
    pub tolerances: ToleranceConfig,
    /// Scan chunks of the signal in parallel
    pub parallel: bool,
    /// Points per parallel chunk; the detector default when unset
    pub chunk_size: Option<usize>,
    /// Peak table destination; nothing is written when unset
    pub output: Option<PathBuf>,
    /// Peak table encoding
    pub writer: WriterConfig,
    /// Plot destination; nothing is drawn when unset
    pub plot: Option<PlotOutput>,
}

/// Result of a pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    /// The sorted signal
    pub signal: SignalArrays,
    /// One flag per signal row
    pub flags: PeakFlags,
    /// Summary of the detection
    pub summary: DetectionSummary,
    /// Loading counters
    pub load_stats: LoadStats,
    /// Writer statistics, when a peak table was written
    pub writer_stats: Option<WriterStats>,
    /// Why the plot was not drawn, if it was requested and failed
    pub plot_error: Option<PlotError>,
}

/// Run load → detect → write → plot on one input file
pub fn run_pipeline<P: AsRef<Path>>(
    input: P,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let input = input.as_ref();

    let mut detector = PeakDetector::new(config.tolerances)
        .map_err(DetectionError::from)?
        .with_parallel(config.parallel);
    if let Some(chunk_size) = config.chunk_size {
        detector = detector
            .with_chunk_size(chunk_size)
            .map_err(DetectionError::from)?;
    }

    let loaded = SignalLoader::new(config.loader.clone()).load(input)?;
    let sorted = SortedSignal::try_new(loaded.signal).map_err(DetectionError::from)?;
    let flags = detector.detect(&sorted);
    let signal = sorted.into_inner();

    let summary = DetectionSummary::new(&signal, &flags, &config.tolerances);
    info!(
        "Detected {} peaks in {} points",
        summary.peak_count, summary.total_points
    );

    let writer_stats = match &config.output {
        Some(path) => {
            let mut metadata = TableMetadata::new()
                .with_tolerances(config.tolerances)
                .with_source_file(input.display().to_string());
            if let Some(level) = &config.loader.ms_level {
                metadata = metadata.with_ms_level(level.clone());
            }

            let stats = write_peak_table(path, &signal, &flags, &metadata, &config.writer)?;
            info!("{} to {}", stats, path.display());
            Some(stats)
        }
        None => None,
    };

    let plot_error = match &config.plot {
        Some(output) => match render_plot(&signal, &flags, output) {
            Ok(()) => {
                info!("Plot written to {}", output.path.display());
                None
            }
            Err(e) => {
                warn!("Plot not written: {}", e);
                Some(e)
            }
        },
        None => None,
    };

    Ok(PipelineOutput {
        signal,
        flags,
        summary,
        load_stats: loaded.stats,
        writer_stats,
        plot_error,
    })
}

/// Write the peak table, removing the file again if any step fails.
fn write_peak_table(
    path: &Path,
    signal: &SignalArrays,
    flags: &PeakFlags,
    metadata: &TableMetadata,
    writer_config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let mut writer = PeakTableWriter::new_file(path, metadata, writer_config.clone())?;
    let result = writer.write(signal, flags).and_then(|()| writer.finish());
    if let Err(e) = &result {
        warn!("Removing incomplete peak table {}: {}", path.display(), e);
        if let Err(remove_error) = std::fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), remove_error);
        }
    }
    result
}

fn render_plot(signal: &SignalArrays, flags: &PeakFlags, output: &PlotOutput) -> Result<(), PlotError> {
    let plot = plot_peaks(signal, flags, &output.config)?;
    save_html(&plot, &output.path)
}
