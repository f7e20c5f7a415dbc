use serde::{Deserialize, Serialize};

use super::error::InvalidConfigError;

/// Tolerance windows and intensity threshold for one detection run.
///
/// Two points are neighbors when their absolute difference is within the
/// tolerance on every axis. Points below `min_intensity` are never peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Neighbor window on the m/z axis
    pub mz_tolerance: f64,
    /// Neighbor window on the retention time axis
    pub rt_tolerance: f64,
    /// Neighbor window on the drift time axis
    pub dt_tolerance: f64,
    /// Minimum intensity a peak must reach
    pub min_intensity: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            mz_tolerance: 0.01,
            rt_tolerance: 1.0,
            dt_tolerance: 0.5,
            min_intensity: 0.0,
        }
    }
}

impl ToleranceConfig {
    /// Create a validated configuration.
    pub fn new(
        mz_tolerance: f64,
        rt_tolerance: f64,
        dt_tolerance: f64,
        min_intensity: f64,
    ) -> Result<Self, InvalidConfigError> {
        let config = Self {
            mz_tolerance,
            rt_tolerance,
            dt_tolerance,
            min_intensity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Same tolerance on all three axes.
    pub fn uniform(tolerance: f64, min_intensity: f64) -> Result<Self, InvalidConfigError> {
        Self::new(tolerance, tolerance, tolerance, min_intensity)
    }

    /// Check that every parameter is finite and non-negative.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        let fields = [
            ("mz_tolerance", self.mz_tolerance),
            ("rt_tolerance", self.rt_tolerance),
            ("dt_tolerance", self.dt_tolerance),
            ("min_intensity", self.min_intensity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InvalidConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(InvalidConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Serialize as JSON for embedding in file metadata.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
