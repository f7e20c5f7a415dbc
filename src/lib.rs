//! # peakfinder - Peak Detection for IMS-MS Signals
//!
//! `peakfinder` marks every sample point of an ion-mobility mass spectrometry
//! signal as peak or non-peak. A point is a peak when it reaches a minimum
//! intensity and no point within the m/z, retention time and drift time
//! tolerance windows around it is more intense.
//!
//! ## Key Features
//!
//! - **Deterministic Engine**: the same signal and tolerances always give the
//!   same flags, whether the scan runs on one thread or on the rayon pool.
//!
//! - **Parse, Don't Validate**: a signal is checked once into a
//!   [`signal::SortedSignal`]; the detector never re-checks it.
//!
//! - **Parquet In, Parquet Out**: raw exports are loaded from Parquet,
//!   filtered by MS level and sorted; results are written as a peak table with
//!   the detection provenance in the footer.
//!
//! - **Plot as a Value**: [`plot::plot_peaks`] returns a `plotly::Plot` that can
//!   be saved as HTML or inspected headlessly.
//!
//! ## Quick Start
//!
//! ```rust
//! use peakfinder::prelude::*;
//!
//! let points = [
//!     SamplePoint::new(0.0, 0.0, 0.0, 1.0),
//!     SamplePoint::new(0.0, 0.0, 0.0, 5.0),
//!     SamplePoint::new(0.0, 0.0, 0.0, 1.0),
//! ];
//! let config = ToleranceConfig::uniform(0.5, 0.0)?;
//! let flags = detect_peaks(&points, &config)?;
//! assert_eq!(flags.peak_indices().collect::<Vec<_>>(), vec![1]);
//! # Ok::<(), DetectionError>(())
//! ```
//!
//! ## From File to File
//!
//! ```rust,no_run
//! use peakfinder::pipeline::{run_pipeline, PipelineConfig};
//!
//! let config = PipelineConfig {
//!     output: Some("run.peaks.parquet".into()),
//!     ..PipelineConfig::default()
//! };
//! let output = run_pipeline("run.parquet", &config)?;
//! println!("{}", output.summary);
//! # Ok::<(), peakfinder::pipeline::PipelineError>(())
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly one way: loader → detector → (writer, plot).
//!
//! - [`schema`]: column names, Arrow schemas and footer metadata keys
//! - [`signal`]: sample points and the validated sorted signal
//! - [`detect`]: tolerance configuration and the peak detector
//! - [`loader`]: Parquet source loading, MS level filtering, peak table read-back
//! - [`writer`]: streaming peak table writer
//! - [`plot`]: plot description of a signal and its peaks
//! - [`pipeline`]: one-call load, detect, write and plot
//! - [`demo`]: deterministic synthetic runs
//!
//! ### Peak Table Format
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | mz | Float64 | Mass-to-charge ratio |
//! | retention_time | Float64 | Retention time |
//! | drift_time | Float64 | Drift time |
//! | intensity | Float64 | Signal intensity |
//! | peaks | Boolean | Local maximum flag |
//!
//! Footer keys: `peakfinder:format_version`, `peakfinder:tolerances`,
//! `peakfinder:detection_timestamp`, `peakfinder:source_file`,
//! `peakfinder:ms_level`, `peakfinder:software`, `peakfinder:peak_count`.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod demo;
pub mod detect;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod schema;
pub mod signal;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::detect::{
        detect_peaks, detect_peaks_arrays, DetectionError, DetectionSummary, InvalidConfigError,
        InvalidInputError, PeakDetector, PeakFlags, ToleranceConfig,
    };
    pub use crate::loader::{read_peak_table, LoadedSignal, LoaderConfig, LoaderError, SignalLoader};
    pub use crate::pipeline::{run_pipeline, PipelineConfig, PipelineError, PipelineOutput};
    pub use crate::plot::{plot_peaks, DisplayRange, PlotConfig, PlotError};
    pub use crate::schema::{columns, create_peak_table_schema, create_signal_schema};
    pub use crate::signal::{SamplePoint, SignalArrays, SortedSignal};
    pub use crate::writer::{
        CompressionType, PeakTableWriter, TableMetadata, WriterConfig, WriterStats,
    };
}
