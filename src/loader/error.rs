use crate::schema::SchemaValidationError;

/// Errors raised when a source table does not fit the signal schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A required column is absent after applying the column aliases
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column cannot be converted to floating point
    #[error("Column '{column}' has unsupported type {found}")]
    UnsupportedType {
        /// Name of the column
        column: String,
        /// Arrow type found in the source
        found: String,
    },

    /// Filtering by acquisition level removed every row
    #[error("No rows match MS level {ms_level}")]
    NoMatchingRows {
        /// The requested MS level
        ms_level: String,
    },

    /// The source has no rows at all
    #[error("Source table has no rows")]
    EmptySource,
}

impl From<SchemaValidationError> for SchemaError {
    fn from(err: SchemaValidationError) -> Self {
        match err {
            SchemaValidationError::MissingColumn(column) => SchemaError::MissingColumn(column),
            SchemaValidationError::TypeMismatch { column, found, .. } => {
                SchemaError::UnsupportedType { column, found }
            }
        }
    }
}

/// Errors that can occur during loading
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// The source does not fit the signal schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
