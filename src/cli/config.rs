//! TOML configuration file support for repeatable runs.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # peakfinder.toml
//! [loader]
//! ms_level = "1"          # or 1, or "all"
//! batch_size = 65536
//!
//! [loader.column_aliases]
//! rt = "retention_time"
//! dt = "drift_time"
//!
//! [detection]
//! mz_tolerance = 0.01
//! rt_tolerance = 1.0
//! dt_tolerance = 0.5
//! min_intensity = 100.0
//! parallel = true
//! chunk_size = 16384
//!
//! [output]
//! compression = "snappy"  # zstd, zstd:N, snappy or none
//! compression_level = 9    # ZSTD level, overrides `compression`
//! row_group_size = 100000
//! plot = "peaks.html"
//! display_range = "0:5000"
//! width = 12
//! height = 8
//! ```
//!
//! Command-line flags take precedence over the file, which takes precedence
//! over the built-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure for peakfinder.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Source loading settings.
    #[serde(default)]
    pub loader: LoaderSection,

    /// Detection settings.
    #[serde(default)]
    pub detection: DetectionSection,

    /// Peak table and plot settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// An MS level written either as text or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MsLevelValue {
    /// `ms_level = 1`
    Number(i64),
    /// `ms_level = "1"` or `ms_level = "all"`
    Text(String),
}

impl MsLevelValue {
    /// The level as the loader compares it
    pub fn as_level(&self) -> String {
        match self {
            MsLevelValue::Number(n) => n.to_string(),
            MsLevelValue::Text(s) => s.clone(),
        }
    }
}

/// `[loader]` section.
#[derive(Debug, Default, Deserialize)]
pub struct LoaderSection {
    /// Acquisition level to keep; `"all"` keeps every row.
    pub ms_level: Option<MsLevelValue>,

    /// Column holding the acquisition level.
    pub ms_level_column: Option<String>,

    /// Extra source-to-canonical column renames.
    pub column_aliases: Option<BTreeMap<String, String>>,

    /// Parquet record batch size.
    pub batch_size: Option<usize>,
}

/// `[detection]` section.
#[derive(Debug, Default, Deserialize)]
pub struct DetectionSection {
    /// m/z tolerance.
    pub mz_tolerance: Option<f64>,

    /// Retention time tolerance.
    pub rt_tolerance: Option<f64>,

    /// Drift time tolerance.
    pub dt_tolerance: Option<f64>,

    /// Minimum peak intensity.
    pub min_intensity: Option<f64>,

    /// Scan chunks in parallel.
    pub parallel: Option<bool>,

    /// Points per parallel chunk.
    pub chunk_size: Option<usize>,
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Codec name: `zstd`, `zstd:N`, `snappy` or `none`.
    pub compression: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,

    /// HTML plot destination.
    pub plot: Option<PathBuf>,

    /// Rows to plot, as `START:STOP`.
    pub display_range: Option<String>,

    /// Plot width in inches.
    pub width: Option<u32>,

    /// Plot height in inches.
    pub height: Option<u32>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file at `path`, or the defaults when no file is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
