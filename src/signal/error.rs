/// Errors raised when a signal violates the detector's input contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    /// The signal has no points
    #[error("Signal is empty")]
    Empty,

    /// A column does not have as many values as the `mz` column
    #[error("Column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column
        column: &'static str,
        /// Length of the `mz` column
        expected: usize,
        /// Length of the offending column
        found: usize,
    },

    /// A point sorts before its predecessor
    #[error("Signal is not sorted by (mz, retention_time, drift_time) at row {index}")]
    Unsorted {
        /// Row of the first out-of-order point
        index: usize,
    },

    /// A coordinate is NaN or infinite, or an intensity is NaN
    #[error("Non-finite value {value} in column '{column}' at row {index}")]
    NonFinite {
        /// Name of the offending column
        column: &'static str,
        /// Row of the offending value
        index: usize,
        /// The offending value
        value: f64,
    },
}
