use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use peakfinder::detect::ToleranceConfig;
use peakfinder::loader::LoaderConfig;
use peakfinder::pipeline::{run_pipeline, PipelineConfig, PlotOutput};
use peakfinder::plot::{DisplayRange, PlotConfig};
use peakfinder::schema::PEAK_TABLE_EXTENSION;
use peakfinder::writer::{CompressionType, WriterConfig};

use super::config::Config;
use super::DetectArgs;

/// Value of `--ms-level` that disables filtering
const ALL_LEVELS: &str = "all";

/// Detect peaks in a Parquet signal and write a peak table
pub fn run(args: DetectArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let file_config = Config::load_optional(args.config.as_deref())?;
    let config = build_pipeline_config(&args, &file_config)?;

    info!("peakfinder - Peak Detection");
    info!("===========================");
    info!("Input:  {}", args.input.display());
    if let Some(output) = &config.output {
        info!("Output: {}", output.display());
    }
    match &config.loader.ms_level {
        Some(level) => info!("MS level: {}", level),
        None => info!("MS level: all"),
    }
    info!(
        "Tolerances: mz={} rt={} dt={} min_intensity={}",
        config.tolerances.mz_tolerance,
        config.tolerances.rt_tolerance,
        config.tolerances.dt_tolerance,
        config.tolerances.min_intensity
    );
    if config.parallel {
        info!("Parallel scan: enabled");
    }

    let output = run_pipeline(&args.input, &config).context("Peak detection failed")?;

    println!("{}", output.summary.format_colored());
    println!("{}", output.load_stats);
    if let (Some(stats), Some(path)) = (&output.writer_stats, &config.output) {
        println!("{}", stats);
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        info!(
            "  Output file size: {} bytes ({:.2} MB)",
            file_size,
            file_size as f64 / 1024.0 / 1024.0
        );
    }

    Ok(())
}

/// `run.parquet` becomes `run.peaks.parquet` next to the input
fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}{}", stem, PEAK_TABLE_EXTENSION))
}

/// Merge flags over the config file over the defaults.
pub(super) fn build_pipeline_config(args: &DetectArgs, file: &Config) -> Result<PipelineConfig> {
    let mut loader = LoaderConfig::default();
    if let Some(column) = &file.loader.ms_level_column {
        loader.ms_level_column = column.clone();
    }
    if let Some(aliases) = &file.loader.column_aliases {
        for (source, canonical) in aliases {
            loader = loader.with_alias(source.clone(), canonical.clone());
        }
    }
    if let Some(batch_size) = file.loader.batch_size {
        loader = loader.with_batch_size(batch_size);
    }
    let level = args
        .ms_level
        .clone()
        .or_else(|| file.loader.ms_level.as_ref().map(|l| l.as_level()));
    loader = match level {
        Some(level) if level.eq_ignore_ascii_case(ALL_LEVELS) => loader.all_ms_levels(),
        Some(level) => loader.with_ms_level(level),
        None => loader,
    };

    let defaults = ToleranceConfig::default();
    let detection = &file.detection;
    let tolerances = ToleranceConfig {
        mz_tolerance: args
            .mz_tolerance
            .or(detection.mz_tolerance)
            .unwrap_or(defaults.mz_tolerance),
        rt_tolerance: args
            .rt_tolerance
            .or(detection.rt_tolerance)
            .unwrap_or(defaults.rt_tolerance),
        dt_tolerance: args
            .dt_tolerance
            .or(detection.dt_tolerance)
            .unwrap_or(defaults.dt_tolerance),
        min_intensity: args
            .min_intensity
            .or(detection.min_intensity)
            .unwrap_or(defaults.min_intensity),
    };
    tolerances
        .validate()
        .context("Invalid detection tolerances")?;

    let parallel = !args.sequential && detection.parallel.unwrap_or(true);

    let mut writer = WriterConfig::from(args.profile.unwrap_or_default());
    if let Some(codec) = args
        .compression
        .as_deref()
        .or(file.output.compression.as_deref())
    {
        writer.compression = CompressionType::parse(codec)
            .with_context(|| format!("Unknown compression codec: {}", codec))?;
    }
    if let Some(level) = args.compression_level.or(file.output.compression_level) {
        writer.compression = CompressionType::Zstd(level);
    }
    if let Some(row_group_size) = args.row_group_size.or(file.output.row_group_size) {
        writer.row_group_size = row_group_size;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));

    let display_range = match (&args.display_range, &file.output.display_range) {
        (Some(range), _) => Some(*range),
        (None, Some(text)) => Some(
            text.parse::<DisplayRange>()
                .context("Invalid display_range in config file")?,
        ),
        (None, None) => None,
    };
    let plot = args.plot.clone().or_else(|| file.output.plot.clone()).map(|path| {
        let defaults = PlotConfig::default();
        PlotOutput {
            path,
            config: PlotConfig {
                figsize: (
                    file.output.width.unwrap_or(defaults.figsize.0),
                    file.output.height.unwrap_or(defaults.figsize.1),
                ),
                display_range,
            },
        }
    });

    Ok(PipelineConfig {
        loader,
        tolerances,
        parallel,
        chunk_size: detection.chunk_size,
        output: Some(output),
        writer,
        plot,
    })
}
