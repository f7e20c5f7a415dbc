use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use super::LoaderError;

/// Get a required Float64 column by name.
pub(super) fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, LoaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoaderError::InvalidFormat(format!("Column not found: {}", name)))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| LoaderError::InvalidFormat(format!("{} is not Float64", name)))
}

/// Get a required Boolean column by name.
pub(super) fn get_boolean_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a BooleanArray, LoaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoaderError::InvalidFormat(format!("Column not found: {}", name)))?
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| LoaderError::InvalidFormat(format!("{} is not Boolean", name)))
}

/// Convert any numeric or string column to `f64` values.
///
/// Unparsable strings are an error; nulls become NaN and `-0.0` becomes `0.0`.
pub(super) fn column_to_f64(column: &ArrayRef, name: &str) -> Result<Vec<f64>, LoaderError> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let converted = cast_with_options(column.as_ref(), &DataType::Float64, &options)?;
    let values = converted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| LoaderError::InvalidFormat(format!("{} did not cast to Float64", name)))?;
    Ok(values
        .iter()
        .map(|v| v.map_or(f64::NAN, |v| v + 0.0))
        .collect())
}

/// Rows whose acquisition level equals `wanted`.
///
/// Levels are compared as text, falling back to numeric equality so that
/// `"1"`, `1` and `1.0` all select MS1 rows. Null levels never match.
pub(super) fn ms_level_mask(column: &ArrayRef, wanted: &str) -> Result<BooleanArray, LoaderError> {
    let as_text = cast(column.as_ref(), &DataType::Utf8)?;
    let text = as_text
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| LoaderError::InvalidFormat("MS level did not cast to Utf8".to_string()))?;

    let wanted = wanted.trim();
    let wanted_number = wanted.parse::<f64>().ok();
    Ok(text
        .iter()
        .map(|level| Some(level.is_some_and(|level| level_matches(level, wanted, wanted_number))))
        .collect())
}

fn level_matches(level: &str, wanted: &str, wanted_number: Option<f64>) -> bool {
    let level = level.trim();
    if level == wanted {
        return true;
    }
    match (level.parse::<f64>(), wanted_number) {
        (Ok(level), Some(wanted)) => level == wanted,
        _ => false,
    }
}
