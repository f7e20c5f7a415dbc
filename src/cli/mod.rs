use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use peakfinder::plot::DisplayRange;
use peakfinder::writer::WriterConfig;

mod config;
mod demo;
mod detect;
mod info;
mod plot;

/// peakfinder - Peak detection for ion-mobility mass spectrometry signals
#[derive(Parser)]
#[command(name = "peakfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Peak table encoding profile, trading write speed for file size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower writes
    MaxCompression,
}

impl From<ProfileArg> for WriterConfig {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => WriterConfig::fast_write(),
            ProfileArg::Balanced => WriterConfig::balanced(),
            ProfileArg::MaxCompression => WriterConfig::max_compression(),
        }
    }
}

/// Arguments of the `detect` command.
#[derive(Args, Debug, Default)]
pub struct DetectArgs {
    /// Input Parquet file with mz, rt, dt, intensity and mslevel columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output peak table (defaults to INPUT with a .peaks.parquet extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Acquisition level to keep ("all" keeps every row)
    #[arg(long, value_name = "LEVEL")]
    pub ms_level: Option<String>,

    /// m/z tolerance
    #[arg(long, value_name = "X")]
    pub mz_tolerance: Option<f64>,

    /// Retention time tolerance
    #[arg(long, value_name = "X")]
    pub rt_tolerance: Option<f64>,

    /// Drift time tolerance
    #[arg(long, value_name = "X")]
    pub dt_tolerance: Option<f64>,

    /// Minimum intensity for a point to be a peak
    #[arg(long, value_name = "X")]
    pub min_intensity: Option<f64>,

    /// Scan on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Peak table encoding profile (fast, balanced, max-compression)
    #[arg(short = 'p', long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Also write an HTML plot of the signal and its peaks
    #[arg(long, value_name = "FILE.html")]
    pub plot: Option<PathBuf>,

    /// Rows to plot, as START:STOP
    #[arg(long, value_name = "START:STOP")]
    pub display_range: Option<DisplayRange>,

    /// Peak table codec (zstd, zstd:N, snappy, none); overrides the profile
    #[arg(long, value_name = "CODEC")]
    pub compression: Option<String>,

    // === Advanced tuning flags (hidden from --help) ===
    /// Compression level for ZSTD (1-22)
    #[arg(short = 'c', long, hide = true)]
    pub compression_level: Option<i32>,

    /// Row group size (rows per row group)
    #[arg(short = 'r', long, hide = true)]
    pub row_group_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect peaks in a Parquet signal and write a peak table
    Detect(DetectArgs),

    /// Draw a peak table as an HTML plot
    Plot {
        /// Peak table written by `detect`
        #[arg(value_name = "PEAKS_FILE")]
        peaks_file: PathBuf,

        /// Output HTML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Rows to plot, as START:STOP
        #[arg(long, value_name = "START:STOP")]
        display_range: Option<DisplayRange>,

        /// Plot width in inches
        #[arg(long, default_value_t = 12)]
        width: u32,

        /// Plot height in inches
        #[arg(long, default_value_t = 8)]
        height: u32,
    },

    /// Write a synthetic IMS-MS source file
    Demo {
        /// Output Parquet file
        #[arg(value_name = "OUTPUT", default_value = "demo_signal.parquet")]
        output: PathBuf,

        /// Number of m/z bins per scan
        #[arg(long, default_value_t = 200)]
        mz_bins: usize,

        /// Number of retention time scans
        #[arg(long, default_value_t = 60)]
        rt_scans: usize,

        /// Number of drift time bins per scan
        #[arg(long, default_value_t = 20)]
        dt_bins: usize,
    },

    /// Display information about a Parquet file
    Info {
        /// Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect(args) => detect::run(args),
        Commands::Plot {
            peaks_file,
            output,
            display_range,
            width,
            height,
        } => plot::run(peaks_file, output, display_range, width, height),
        Commands::Demo {
            output,
            mz_bins,
            rt_scans,
            dt_bins,
        } => demo::run(output, mz_bins, rt_scans, dt_bins),
        Commands::Info { file } => info::run(file),
    }
}
