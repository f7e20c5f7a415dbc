use crate::signal::InvalidInputError;

/// Errors raised for tolerance configurations the detector cannot use
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidConfigError {
    /// A parameter is below zero
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Name of the parameter
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A parameter is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the parameter
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A parallel chunk size of zero
    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,
}

/// Errors that can occur during peak detection
///
/// Detection either returns a complete flag sequence or one of these errors;
/// partial results are never produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    /// The signal violates the input contract
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The tolerance configuration is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] InvalidConfigError),
}
