use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{KEY_FORMAT_VERSION, PEAK_TABLE_FORMAT_VERSION};

/// Creates a Field with CV term metadata annotation
fn field_with_cv(name: &str, data_type: DataType, nullable: bool, cv_accession: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("cv_accession".to_string(), cv_accession.to_string());
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

fn push_signal_fields(builder: &mut SchemaBuilder) {
    builder.push(field_with_cv(
        columns::MZ,
        DataType::Float64,
        false,
        "MS:1000040", // m/z
    ));

    builder.push(field_with_cv(
        columns::RETENTION_TIME,
        DataType::Float64,
        false,
        "MS:1000016", // scan start time
    ));

    builder.push(field_with_cv(
        columns::DRIFT_TIME,
        DataType::Float64,
        false,
        "MS:1002476", // ion mobility drift time
    ));

    builder.push(field_with_cv(
        columns::INTENSITY,
        DataType::Float64,
        false,
        "MS:1000042", // peak intensity
    ));
}

/// Creates the canonical signal schema consumed by the peak detector.
///
/// # Example
///
/// ```
/// use peakfinder::schema::create_signal_schema;
///
/// let schema = create_signal_schema();
/// assert_eq!(schema.fields().len(), 4);
/// ```
pub fn create_signal_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    push_signal_fields(&mut builder);
    builder.finish()
}

/// Creates the peak table schema: the signal columns plus the boolean `peaks` flag.
///
/// Rows are aligned 1:1 with the sorted signal, so row position is the
/// point index the flag refers to.
///
/// ```
/// use peakfinder::schema::{columns, create_peak_table_schema};
///
/// let schema = create_peak_table_schema();
/// assert!(schema.field_with_name(columns::PEAKS).is_ok());
/// ```
pub fn create_peak_table_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    push_signal_fields(&mut builder);
    builder.push(Field::new(columns::PEAKS, DataType::Boolean, false));

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        PEAK_TABLE_FORMAT_VERSION.to_string(),
    );
    metadata.insert(
        "peakfinder:schema_description".to_string(),
        "Sorted IMS-MS signal with per-point local-maximum flags".to_string(),
    );
    builder.finish().with_metadata(metadata)
}

/// Returns an Arc-wrapped peak table schema for shared ownership
pub fn create_peak_table_schema_arc() -> Arc<Schema> {
    Arc::new(create_peak_table_schema())
}
