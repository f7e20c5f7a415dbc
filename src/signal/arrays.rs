use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::schema::columns;

use super::error::InvalidInputError;

/// One row of an IMS-MS signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Retention time
    pub retention_time: f64,
    /// Ion mobility drift time
    pub drift_time: f64,
    /// Signal intensity
    pub intensity: f64,
}

impl SamplePoint {
    /// Create a new sample point
    pub fn new(mz: f64, retention_time: f64, drift_time: f64, intensity: f64) -> Self {
        Self {
            mz,
            retention_time,
            drift_time,
            intensity,
        }
    }

    /// Compare two points by their (mz, retention_time, drift_time) sort key.
    ///
    /// Uses IEEE total ordering so the comparison is defined for every input;
    /// NaN sorts after all numbers. `-0.0` and `0.0` compare equal.
    pub fn cmp_sort_key(&self, other: &Self) -> Ordering {
        coordinate_cmp(self.mz, other.mz)
            .then_with(|| coordinate_cmp(self.retention_time, other.retention_time))
            .then_with(|| coordinate_cmp(self.drift_time, other.drift_time))
    }
}

impl From<(f64, f64, f64, f64)> for SamplePoint {
    fn from((mz, retention_time, drift_time, intensity): (f64, f64, f64, f64)) -> Self {
        Self::new(mz, retention_time, drift_time, intensity)
    }
}

/// SoA storage for a signal: four parallel columns, one entry per point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalArrays {
    /// Mass-to-charge ratios
    pub mz: Vec<f64>,
    /// Retention times
    pub retention_time: Vec<f64>,
    /// Drift times
    pub drift_time: Vec<f64>,
    /// Intensities
    pub intensity: Vec<f64>,
}

impl SignalArrays {
    /// Create a signal from columns, checking that their lengths agree.
    pub fn new(
        mz: Vec<f64>,
        retention_time: Vec<f64>,
        drift_time: Vec<f64>,
        intensity: Vec<f64>,
    ) -> Result<Self, InvalidInputError> {
        let signal = Self {
            mz,
            retention_time,
            drift_time,
            intensity,
        };
        signal.validate_lengths()?;
        Ok(signal)
    }

    /// Create an empty signal with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mz: Vec::with_capacity(capacity),
            retention_time: Vec::with_capacity(capacity),
            drift_time: Vec::with_capacity(capacity),
            intensity: Vec::with_capacity(capacity),
        }
    }

    /// Build the SoA form of a point sequence, keeping its order.
    pub fn from_points(points: &[SamplePoint]) -> Self {
        let mut signal = Self::with_capacity(points.len());
        for point in points {
            signal.push(*point);
        }
        signal
    }

    /// Append a point.
    pub fn push(&mut self, point: SamplePoint) {
        self.mz.push(point.mz);
        self.retention_time.push(point.retention_time);
        self.drift_time.push(point.drift_time);
        self.intensity.push(point.intensity);
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Point at row `index`, if any.
    pub fn point(&self, index: usize) -> Option<SamplePoint> {
        Some(SamplePoint {
            mz: *self.mz.get(index)?,
            retention_time: *self.retention_time.get(index)?,
            drift_time: *self.drift_time.get(index)?,
            intensity: *self.intensity.get(index)?,
        })
    }

    /// Iterate over the points in row order.
    pub fn iter(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    /// Validate that all columns have the length of `mz`.
    pub fn validate_lengths(&self) -> Result<(), InvalidInputError> {
        let expected = self.mz.len();
        let others = [
            (columns::RETENTION_TIME, self.retention_time.len()),
            (columns::DRIFT_TIME, self.drift_time.len()),
            (columns::INTENSITY, self.intensity.len()),
        ];
        for (column, found) in others {
            if found != expected {
                return Err(InvalidInputError::LengthMismatch {
                    column,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Stable sort by (mz, retention_time, drift_time).
    ///
    /// Points with equal keys keep their relative order.
    pub fn sort_canonical(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            coordinate_cmp(self.mz[a], self.mz[b])
                .then_with(|| coordinate_cmp(self.retention_time[a], self.retention_time[b]))
                .then_with(|| coordinate_cmp(self.drift_time[a], self.drift_time[b]))
        });
        if order.iter().enumerate().all(|(i, &j)| i == j) {
            return;
        }
        self.mz = permute(&self.mz, &order);
        self.retention_time = permute(&self.retention_time, &order);
        self.drift_time = permute(&self.drift_time, &order);
        self.intensity = permute(&self.intensity, &order);
    }
}

/// Total order on coordinates that agrees with `<` on finite values.
///
/// Adding `0.0` folds `-0.0` onto `0.0`, which `total_cmp` alone keeps apart.
fn coordinate_cmp(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

fn permute(values: &[f64], order: &[usize]) -> Vec<f64> {
    order.iter().map(|&i| values[i]).collect()
}

impl FromIterator<SamplePoint> for SignalArrays {
    fn from_iter<I: IntoIterator<Item = SamplePoint>>(iter: I) -> Self {
        let mut signal = Self::default();
        for point in iter {
            signal.push(point);
        }
        signal
    }
}
