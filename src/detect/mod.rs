//! # Peak Detection Engine
//!
//! Classifies every point of a sorted IMS-MS signal as peak or non-peak.
//!
//! ## Neighborhood
//!
//! Point `q` is a neighbor of `p` when
//! `|q.mz - p.mz| <= mz_tolerance`,
//! `|q.retention_time - p.retention_time| <= rt_tolerance` and
//! `|q.drift_time - p.drift_time| <= dt_tolerance`.
//!
//! ## Peak Rule
//!
//! `p` is a peak when `p.intensity >= min_intensity` and no neighbor is more
//! intense. Among equally intense neighbors only the earliest in sort order
//! can be a peak, so a plateau yields at most one peak. Points at the edges
//! of the signal are judged by the neighbors they have.
//!
//! ## Performance
//!
//! The signal is sorted by m/z first, so each point's m/z window is located
//! by binary search and only that window is filtered on the other two axes.
//! With the `parallel` feature, chunks of points are scanned on the rayon
//! thread pool; results are identical to the sequential scan.
//!
//! ```
//! use peakfinder::detect::{detect_peaks, ToleranceConfig};
//! use peakfinder::signal::SamplePoint;
//!
//! let points = [
//!     SamplePoint::new(0.0, 0.0, 0.0, 1.0),
//!     SamplePoint::new(0.0, 0.0, 0.0, 5.0),
//!     SamplePoint::new(0.0, 0.0, 0.0, 1.0),
//! ];
//! let config = ToleranceConfig::uniform(0.5, 0.0)?;
//! let flags = detect_peaks(&points, &config)?;
//! assert_eq!(flags.as_slice(), &[false, true, false]);
//! # Ok::<(), peakfinder::detect::DetectionError>(())
//! ```

mod config;
mod engine;
mod error;
mod flags;
mod summary;

#[cfg(test)]
mod tests;

pub use config::ToleranceConfig;
pub use engine::{detect_peaks, detect_peaks_arrays, PeakDetector, DEFAULT_CHUNK_SIZE};
pub use error::{DetectionError, InvalidConfigError};
pub use flags::PeakFlags;
pub use summary::DetectionSummary;

pub use crate::signal::InvalidInputError;
