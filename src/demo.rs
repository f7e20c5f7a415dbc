//! # Synthetic IMS-MS Runs
//!
//! Deterministic source tables shaped like a raw instrument export: columns
//! `mz`, `rt`, `dt`, `intensity` and a text `mslevel`, rows in acquisition
//! order rather than sorted order. Used by the `demo` subcommand, the tests
//! and the benchmarks.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};

use crate::schema::columns;
use crate::writer::{WriterConfig, WriterError};

/// Shape of a synthetic run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticRunConfig {
    /// Number of m/z bins per scan
    pub mz_bins: usize,
    /// Number of MS1 retention time scans
    pub rt_scans: usize,
    /// Number of drift time bins per scan
    pub dt_bins: usize,
    /// First m/z bin
    pub base_mz: f64,
    /// m/z bin width
    pub mz_step: f64,
    /// Seconds between scans
    pub rt_step: f64,
    /// Milliseconds between drift bins
    pub dt_step: f64,
    /// Number of Gaussian features spread over the grid
    pub features: usize,
    /// Emit an MS2 scan after every this many MS1 scans (0 disables MS2)
    pub ms2_every: usize,
}

impl Default for SyntheticRunConfig {
    fn default() -> Self {
        Self {
            mz_bins: 200,
            rt_scans: 60,
            dt_bins: 20,
            base_mz: 400.0,
            mz_step: 0.005,
            rt_step: 0.5,
            dt_step: 0.25,
            features: 8,
            ms2_every: 5,
        }
    }
}

impl SyntheticRunConfig {
    /// Number of MS1 rows the run produces
    pub fn ms1_rows(&self) -> usize {
        self.mz_bins * self.rt_scans * self.dt_bins
    }
}

struct Feature {
    mz: f64,
    rt: f64,
    dt: f64,
    height: f64,
}

fn features(config: &SyntheticRunConfig) -> Vec<Feature> {
    let mz_span = config.mz_step * config.mz_bins as f64;
    let rt_span = config.rt_step * config.rt_scans as f64;
    let dt_span = config.dt_step * config.dt_bins as f64;

    (0..config.features)
        .map(|i| {
            let f = i as f64;
            Feature {
                mz: config.base_mz + mz_span * (0.1 + 0.8 * (f * 0.618).fract()),
                rt: rt_span * (0.1 + 0.8 * (f * 0.414).fract()),
                dt: dt_span * (0.1 + 0.8 * (f * 0.732).fract()),
                height: 1e5 * (0.2 + (f * 0.321).sin().abs() * 0.8),
            }
        })
        .collect()
}

fn intensity_at(config: &SyntheticRunConfig, features: &[Feature], mz: f64, rt: f64, dt: f64, i: usize) -> f64 {
    let sigma_mz = config.mz_step * 3.0;
    let sigma_rt = config.rt_step * 3.0;
    let sigma_dt = config.dt_step * 2.0;

    let signal: f64 = features
        .iter()
        .map(|f| {
            let z = ((mz - f.mz) / sigma_mz).powi(2)
                + ((rt - f.rt) / sigma_rt).powi(2)
                + ((dt - f.dt) / sigma_dt).powi(2);
            f.height * (-0.5 * z).exp()
        })
        .sum();
    let noise = 50.0 * (0.1 + (i as f64 * 0.456).sin().abs() * 0.9);
    signal + noise
}

/// Schema of the synthetic source table
pub fn source_schema() -> Schema {
    Schema::new(vec![
        Field::new(columns::MZ, DataType::Float64, false),
        Field::new(columns::SOURCE_RT, DataType::Float64, false),
        Field::new(columns::SOURCE_DT, DataType::Float64, false),
        Field::new(columns::INTENSITY, DataType::Float64, false),
        Field::new(columns::SOURCE_MS_LEVEL, DataType::Utf8, false),
    ])
}

/// Generate a synthetic run as one record batch, in acquisition order.
///
/// Scans are emitted by retention time. Within a scan, drift bins come
/// first and m/z bins run high to low, so the table is never already sorted.
pub fn generate_source_table(config: &SyntheticRunConfig) -> Result<RecordBatch, ArrowError> {
    let features = features(config);
    let ms2_scans = if config.ms2_every == 0 {
        0
    } else {
        config.rt_scans / config.ms2_every
    };
    let capacity = config.ms1_rows() + ms2_scans * config.mz_bins;

    let mut mz_col = Float64Builder::with_capacity(capacity);
    let mut rt_col = Float64Builder::with_capacity(capacity);
    let mut dt_col = Float64Builder::with_capacity(capacity);
    let mut intensity_col = Float64Builder::with_capacity(capacity);
    let mut level_col = StringBuilder::with_capacity(capacity, capacity);

    let mut row = 0usize;
    for scan in 0..config.rt_scans {
        let rt = scan as f64 * config.rt_step;
        for bin in 0..config.dt_bins {
            let dt = bin as f64 * config.dt_step;
            for k in (0..config.mz_bins).rev() {
                let mz = config.base_mz + k as f64 * config.mz_step;
                mz_col.append_value(mz);
                rt_col.append_value(rt);
                dt_col.append_value(dt);
                intensity_col.append_value(intensity_at(config, &features, mz, rt, dt, row));
                level_col.append_value("1");
                row += 1;
            }
        }

        if config.ms2_every > 0 && (scan + 1) % config.ms2_every == 0 {
            // Fragment scan: fewer, sparser ions at the same retention time
            for k in 0..config.mz_bins {
                let mz = config.base_mz / 2.0 + k as f64 * config.mz_step * 10.0;
                mz_col.append_value(mz);
                rt_col.append_value(rt + config.rt_step / 2.0);
                dt_col.append_value(0.0);
                intensity_col.append_value(1e3 * (0.1 + (row as f64 * 0.789).sin().abs()));
                level_col.append_value("2");
                row += 1;
            }
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(mz_col.finish()),
        Arc::new(rt_col.finish()),
        Arc::new(dt_col.finish()),
        Arc::new(intensity_col.finish()),
        Arc::new(level_col.finish()),
    ];
    RecordBatch::try_new(Arc::new(source_schema()), columns)
}

/// Write a synthetic run to a Parquet file and return the number of rows
pub fn write_source_parquet<P: AsRef<Path>>(
    path: P,
    config: &SyntheticRunConfig,
) -> Result<usize, WriterError> {
    let path = path.as_ref();
    let batch = generate_source_table(config)?;

    let props = WriterConfig::fast_write().to_writer_properties(&HashMap::new());
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    info!(
        "Wrote synthetic run of {} rows to {}",
        batch.num_rows(),
        path.display()
    );
    Ok(batch.num_rows())
}
