//! # Signal Loader
//!
//! Reads raw IMS-MS exports from Parquet and produces the sorted,
//! dense-indexed [`SignalArrays`](crate::signal::SignalArrays) the detection
//! engine consumes.
//!
//! Source tables come in many shapes. The loader:
//!
//! - keeps only rows of the requested acquisition level (`mslevel == "1"` by default)
//! - maps source names such as `rt` and `dt` onto the canonical columns
//! - casts numeric or text columns to `f64`, rejecting unparsable values
//! - drops every other column
//! - sorts stably by (mz, retention_time, drift_time)
//!
//! Peak tables written by [`crate::writer`] can be read back with
//! [`read_peak_table`].

mod config;
mod error;
mod peak_table;
mod signal_loader;
mod utils;

#[cfg(test)]
mod tests;

pub use config::LoaderConfig;
pub use error::{LoaderError, SchemaError};
pub use peak_table::read_peak_table;
pub use signal_loader::{LoadStats, LoadedSignal, SignalLoader};
