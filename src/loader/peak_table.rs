use std::fs::File;
use std::path::Path;

use arrow::array::Array;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::detect::PeakFlags;
use crate::schema::{columns, validate_peak_table_schema};
use crate::signal::SignalArrays;

use super::utils::{get_boolean_column, get_float64_column};
use super::{LoaderError, SchemaError};

/// Read a peak table written by [`crate::writer::PeakTableWriter`].
///
/// Rows come back in file order, which is the sorted order they were written in.
/// A table with null values is rejected.
pub fn read_peak_table<P: AsRef<Path>>(path: P) -> Result<(SignalArrays, PeakFlags), LoaderError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    validate_peak_table_schema(builder.schema()).map_err(SchemaError::from)?;

    let total_rows = usize::try_from(builder.metadata().file_metadata().num_rows()).unwrap_or(0);
    let mut signal = SignalArrays::with_capacity(total_rows);
    let mut flags = Vec::with_capacity(total_rows);

    for batch in builder.build()? {
        let batch = batch?;
        let mz = get_float64_column(&batch, columns::MZ)?;
        let rt = get_float64_column(&batch, columns::RETENTION_TIME)?;
        let dt = get_float64_column(&batch, columns::DRIFT_TIME)?;
        let intensity = get_float64_column(&batch, columns::INTENSITY)?;
        let peaks = get_boolean_column(&batch, columns::PEAKS)?;

        let all: [(&str, &dyn Array); 5] = [
            (columns::MZ, mz as &dyn Array),
            (columns::RETENTION_TIME, rt as &dyn Array),
            (columns::DRIFT_TIME, dt as &dyn Array),
            (columns::INTENSITY, intensity as &dyn Array),
            (columns::PEAKS, peaks as &dyn Array),
        ];
        if let Some((name, column)) = all.iter().find(|(_, column)| column.null_count() > 0) {
            return Err(LoaderError::InvalidFormat(format!(
                "{} has {} null values",
                name,
                column.null_count()
            )));
        }

        signal.mz.extend(mz.values().iter().copied());
        signal.retention_time.extend(rt.values().iter().copied());
        signal.drift_time.extend(dt.values().iter().copied());
        signal.intensity.extend(intensity.values().iter().copied());
        flags.extend(peaks.values().iter());
    }

    info!(
        "Read {} rows from peak table {}",
        signal.len(),
        path.display()
    );
    Ok((signal, PeakFlags::from(flags)))
}
