use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Builder};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::format::KeyValue;

use crate::detect::PeakFlags;
use crate::schema::{create_peak_table_schema_arc, KEY_PEAK_COUNT};
use crate::signal::SignalArrays;

use super::config::WriterConfig;
use super::error::WriterError;
use super::metadata::TableMetadata;
use super::stats::WriterStats;

/// Streaming writer for peak tables
///
/// Each call to [`write`](Self::write) appends one aligned slice of signal
/// rows and their peak flags. The footer records how the peaks were detected.
pub struct PeakTableWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    rows_written: usize,
    peaks_written: usize,
}

impl PeakTableWriter<File> {
    /// Create a new writer to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        metadata: &TableMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, metadata, config)
    }
}

impl<W: Write + Send> PeakTableWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        metadata: &TableMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = create_peak_table_schema_arc();
        let parquet_metadata = metadata.to_parquet_metadata()?;
        let props = config.to_writer_properties(&parquet_metadata);

        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            rows_written: 0,
            peaks_written: 0,
        })
    }

    /// Build a Float64 array using append_slice for memcpy speed
    #[inline]
    fn build_f64_array(data: &[f64]) -> ArrayRef {
        let mut builder = Float64Builder::with_capacity(data.len());
        builder.append_slice(data);
        Arc::new(builder.finish())
    }

    /// Write a signal and its aligned peak flags
    pub fn write(&mut self, signal: &SignalArrays, flags: &PeakFlags) -> Result<(), WriterError> {
        signal
            .validate_lengths()
            .map_err(|e| WriterError::InvalidData(e.to_string()))?;
        if flags.len() != signal.len() {
            return Err(WriterError::InvalidData(format!(
                "{} peak flags for {} signal rows",
                flags.len(),
                signal.len()
            )));
        }
        if signal.is_empty() {
            return Ok(());
        }

        let columns: Vec<ArrayRef> = vec![
            Self::build_f64_array(&signal.mz),
            Self::build_f64_array(&signal.retention_time),
            Self::build_f64_array(&signal.drift_time),
            Self::build_f64_array(&signal.intensity),
            Arc::new(BooleanArray::from(flags.as_slice().to_vec())),
        ];
        let batch = RecordBatch::try_new(self.schema.clone(), columns)?;
        self.writer.write(&batch)?;

        self.rows_written += signal.len();
        self.peaks_written += flags.peak_count();
        debug!(
            "Wrote batch of {} rows ({} total)",
            signal.len(),
            self.rows_written
        );
        Ok(())
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(mut self) -> Result<WriterStats, WriterError> {
        self.writer.append_key_value_metadata(KeyValue {
            key: KEY_PEAK_COUNT.to_string(),
            value: Some(self.peaks_written.to_string()),
        });
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            rows_written: self.rows_written,
            peaks_written: self.peaks_written,
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size.max(0) as u64)
                .sum(),
        })
    }
}
