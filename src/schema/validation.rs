use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema carries the canonical signal columns.
///
/// Signal columns must be numeric or string typed (strings are parsed as
/// floats by the loader). Extra columns are ignored.
pub fn validate_signal_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    for name in columns::SIGNAL_COLUMNS {
        let field = schema
            .field_with_name(name)
            .map_err(|_| SchemaValidationError::MissingColumn(name.to_string()))?;
        if !is_float_castable(field.data_type()) {
            return Err(SchemaValidationError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric or string".to_string(),
                found: format!("{:?}", field.data_type()),
            });
        }
    }
    Ok(())
}

/// Validates that a schema is a peak table written by this crate.
pub fn validate_peak_table_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let required_columns = [
        (columns::MZ, DataType::Float64),
        (columns::RETENTION_TIME, DataType::Float64),
        (columns::DRIFT_TIME, DataType::Float64),
        (columns::INTENSITY, DataType::Float64),
        (columns::PEAKS, DataType::Boolean),
    ];

    for (name, expected_type) in required_columns {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != &expected_type {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Whether values of this type can be converted to `f64`.
///
/// Dictionary columns (pandas categoricals) qualify when their values do.
pub(crate) fn is_float_castable(data_type: &DataType) -> bool {
    match data_type {
        DataType::Dictionary(_, values) => is_float_castable(values),
        other => other.is_numeric() || matches!(other, DataType::Utf8 | DataType::LargeUtf8),
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
