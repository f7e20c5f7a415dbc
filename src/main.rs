//! # peakfinder
//!
//! Command-line peak detection for ion-mobility mass spectrometry signals.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a synthetic run
//! peakfinder demo run.parquet
//!
//! # Detect MS1 peaks and plot the first 5000 rows
//! peakfinder -v detect run.parquet --plot run.html --display-range 0:5000
//!
//! # Inspect the peak table
//! peakfinder info run.peaks.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
