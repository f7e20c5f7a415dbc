//! # Peak Table Writer
//!
//! Persists a sorted signal together with its boolean `peaks` column to
//! Parquet. This is the contract between detection and presentation: every
//! row of the file is one sample point, in sorted order, with its flag.
//!
//! ## Design Principles
//!
//! 1. **Streaming**: signals can be appended in several slices.
//!
//! 2. **Self-Contained Files**: tolerances, source file, acquisition level and
//!    detection time are embedded in the Parquet footer's key_value_metadata.
//!
//! 3. **Configurable Compression**: ZSTD (default), Snappy, or uncompressed,
//!    with BYTE_STREAM_SPLIT on the float columns.

mod config;
mod error;
mod metadata;
mod stats;
mod writer_impl;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use metadata::TableMetadata;
pub use stats::WriterStats;
pub use writer_impl::PeakTableWriter;
