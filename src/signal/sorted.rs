use crate::schema::columns;

use super::arrays::{SamplePoint, SignalArrays};
use super::error::InvalidInputError;

/// A signal that satisfies the detector's input contract.
///
/// Holding a `SortedSignal` proves the signal is non-empty, its columns have
/// equal lengths, every coordinate is finite, no intensity is NaN, and rows
/// are ordered ascending by (mz, retention_time, drift_time).
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSignal(SignalArrays);

impl SortedSignal {
    /// Validate a signal and take ownership of it.
    pub fn try_new(signal: SignalArrays) -> Result<Self, InvalidInputError> {
        validate_signal(&signal)?;
        Ok(Self(signal))
    }

    /// Validate a point sequence in its given order.
    pub fn from_points(points: &[SamplePoint]) -> Result<Self, InvalidInputError> {
        Self::try_new(SignalArrays::from_points(points))
    }

    /// Borrow the underlying columns.
    pub fn as_arrays(&self) -> &SignalArrays {
        &self.0
    }

    /// Release the underlying columns.
    pub fn into_inner(self) -> SignalArrays {
        self.0
    }

    /// Number of points (never zero).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with [`SignalArrays`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<SignalArrays> for SortedSignal {
    type Error = InvalidInputError;

    fn try_from(signal: SignalArrays) -> Result<Self, Self::Error> {
        Self::try_new(signal)
    }
}

impl AsRef<SignalArrays> for SortedSignal {
    fn as_ref(&self) -> &SignalArrays {
        &self.0
    }
}

/// Check a signal against the detector's input contract without copying it.
pub fn validate_signal(signal: &SignalArrays) -> Result<(), InvalidInputError> {
    signal.validate_lengths()?;
    if signal.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let coordinates = [
        (columns::MZ, &signal.mz),
        (columns::RETENTION_TIME, &signal.retention_time),
        (columns::DRIFT_TIME, &signal.drift_time),
    ];
    for (column, values) in coordinates {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidInputError::NonFinite {
                column,
                index,
                value,
            });
        }
    }
    if let Some((index, &value)) = signal
        .intensity
        .iter()
        .enumerate()
        .find(|(_, v)| v.is_nan())
    {
        return Err(InvalidInputError::NonFinite {
            column: columns::INTENSITY,
            index,
            value,
        });
    }

    for index in 1..signal.len() {
        let previous = (
            signal.mz[index - 1],
            signal.retention_time[index - 1],
            signal.drift_time[index - 1],
        );
        let current = (
            signal.mz[index],
            signal.retention_time[index],
            signal.drift_time[index],
        );
        // Finite values: tuple comparison is a total lexicographic order.
        if previous > current {
            return Err(InvalidInputError::Unsorted { index });
        }
    }

    Ok(())
}
