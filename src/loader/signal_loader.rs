use std::fmt;
use std::fs::File;
use std::path::Path;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::schema::{columns, is_float_castable, validate_signal_schema};
use crate::signal::SignalArrays;

use super::utils::{column_to_f64, ms_level_mask};
use super::{LoaderConfig, LoaderError, SchemaError};

/// Counters collected while loading a signal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Record batches read from the source
    pub batches_read: usize,
    /// Rows read before filtering
    pub rows_read: usize,
    /// Rows kept after filtering by acquisition level
    pub rows_kept: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kept {} of {} rows from {} batches",
            self.rows_kept, self.rows_read, self.batches_read
        )
    }
}

/// A signal ready for detection, with loading counters
#[derive(Debug, Clone)]
pub struct LoadedSignal {
    /// Points sorted by (mz, retention_time, drift_time)
    pub signal: SignalArrays,
    /// Loading counters
    pub stats: LoadStats,
}

/// Loads raw IMS-MS exports into the canonical signal layout.
///
/// Loading keeps the rows of one acquisition level, maps source column names
/// onto `mz`, `retention_time`, `drift_time` and `intensity`, converts the
/// values to `f64`, and sorts the points stably by (mz, retention_time,
/// drift_time).
///
/// # Example
///
/// ```rust,no_run
/// use peakfinder::loader::{LoaderConfig, SignalLoader};
///
/// let loader = SignalLoader::new(LoaderConfig::default().with_ms_level("1"));
/// let loaded = loader.load("run.parquet")?;
/// println!("{} points ({})", loaded.signal.len(), loaded.stats);
/// # Ok::<(), peakfinder::loader::LoaderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignalLoader {
    config: LoaderConfig,
}

impl SignalLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a signal from a Parquet file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedSignal, LoaderError> {
        let path = path.as_ref();
        info!("Loading signal from {}", path.display());

        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.config.batch_size);
        self.check_schema(builder.schema())?;
        let reader = builder.build()?;

        self.load_batches(reader)
    }

    /// Load a signal from a single in-memory record batch
    pub fn load_record_batch(&self, batch: &RecordBatch) -> Result<LoadedSignal, LoaderError> {
        self.check_schema(&batch.schema())?;
        let mut signal = SignalArrays::default();
        let mut stats = LoadStats::default();
        self.append_batch(batch, &mut signal, &mut stats)?;
        self.finish(signal, stats)
    }

    /// Load a signal from a stream of record batches
    pub fn load_batches<I, E>(&self, batches: I) -> Result<LoadedSignal, LoaderError>
    where
        I: IntoIterator<Item = Result<RecordBatch, E>>,
        LoaderError: From<E>,
    {
        let mut signal = SignalArrays::default();
        let mut stats = LoadStats::default();
        for batch in batches {
            let batch = batch?;
            if stats.batches_read == 0 {
                self.check_schema(&batch.schema())?;
            }
            self.append_batch(&batch, &mut signal, &mut stats)?;
        }
        self.finish(signal, stats)
    }

    /// Check column presence and types after applying aliases.
    fn check_schema(&self, schema: &Schema) -> Result<(), SchemaError> {
        let renamed: Vec<Field> = schema
            .fields()
            .iter()
            .map(|field| match self.config.column_aliases.get(field.name()) {
                Some(canonical) if schema.field_with_name(canonical).is_err() => {
                    field.as_ref().clone().with_name(canonical.clone())
                }
                _ => field.as_ref().clone(),
            })
            .collect();
        validate_signal_schema(&Schema::new(renamed))?;

        if self.config.ms_level.is_some() {
            let level_column = &self.config.ms_level_column;
            let field = schema
                .field_with_name(level_column)
                .map_err(|_| SchemaError::MissingColumn(level_column.clone()))?;
            if !is_float_castable(field.data_type()) {
                return Err(SchemaError::UnsupportedType {
                    column: level_column.clone(),
                    found: format!("{:?}", field.data_type()),
                });
            }
        }
        Ok(())
    }

    fn resolve_column<'a>(
        &self,
        batch: &'a RecordBatch,
        canonical: &str,
    ) -> Result<&'a ArrayRef, SchemaError> {
        self.config
            .candidates(canonical)
            .find_map(|name| batch.column_by_name(name))
            .ok_or_else(|| SchemaError::MissingColumn(canonical.to_string()))
    }

    fn append_batch(
        &self,
        batch: &RecordBatch,
        signal: &mut SignalArrays,
        stats: &mut LoadStats,
    ) -> Result<(), LoaderError> {
        stats.batches_read += 1;
        stats.rows_read += batch.num_rows();

        let mask: Option<BooleanArray> = match &self.config.ms_level {
            Some(level) => {
                let column = batch
                    .column_by_name(&self.config.ms_level_column)
                    .ok_or_else(|| SchemaError::MissingColumn(self.config.ms_level_column.clone()))?;
                Some(ms_level_mask(column, level)?)
            }
            None => None,
        };

        let mut values = Vec::with_capacity(columns::SIGNAL_COLUMNS.len());
        for name in columns::SIGNAL_COLUMNS {
            let column = self.resolve_column(batch, name)?;
            let column = match &mask {
                Some(mask) => filter(column.as_ref(), mask)?,
                None => column.clone(),
            };
            values.push(column_to_f64(&column, name)?);
        }

        let kept = values.first().map_or(0, Vec::len);
        stats.rows_kept += kept;
        debug!(
            "Batch {}: kept {} of {} rows",
            stats.batches_read,
            kept,
            batch.num_rows()
        );

        let mut values = values.into_iter();
        if let (Some(mz), Some(rt), Some(dt), Some(intensity)) =
            (values.next(), values.next(), values.next(), values.next())
        {
            signal.mz.extend(mz);
            signal.retention_time.extend(rt);
            signal.drift_time.extend(dt);
            signal.intensity.extend(intensity);
        }
        Ok(())
    }

    fn finish(&self, mut signal: SignalArrays, stats: LoadStats) -> Result<LoadedSignal, LoaderError> {
        if signal.is_empty() {
            return Err(match &self.config.ms_level {
                Some(level) if stats.rows_read > 0 => SchemaError::NoMatchingRows {
                    ms_level: level.clone(),
                },
                _ => SchemaError::EmptySource,
            }
            .into());
        }

        signal.sort_canonical();
        info!("{}", stats);
        Ok(LoadedSignal { signal, stats })
    }
}
