use std::ops::Range;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::signal::{validate_signal, SamplePoint, SignalArrays, SortedSignal};

use super::config::ToleranceConfig;
use super::error::{DetectionError, InvalidConfigError};
use super::flags::PeakFlags;

/// Number of points each parallel worker handles at a time
pub const DEFAULT_CHUNK_SIZE: usize = 16_384;

/// Local-maximum peak detector over a sorted signal.
///
/// The detector is stateless between calls: the same signal and
/// configuration always yield the same flags, whether the scan runs on one
/// thread or many.
///
/// # Example
///
/// ```
/// use peakfinder::detect::{PeakDetector, ToleranceConfig};
/// use peakfinder::signal::{SamplePoint, SortedSignal};
///
/// let config = ToleranceConfig::new(0.5, 1.0, 0.5, 0.0)?;
/// let detector = PeakDetector::new(config)?;
///
/// let signal = SortedSignal::from_points(&[
///     SamplePoint::new(100.0, 0.0, 1.0, 1.0),
///     SamplePoint::new(100.0, 1.0, 1.0, 5.0),
///     SamplePoint::new(100.0, 2.0, 1.0, 1.0),
/// ])?;
/// let flags = detector.detect(&signal);
/// assert_eq!(flags.as_slice(), &[false, true, false]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PeakDetector {
    config: ToleranceConfig,
    parallel: bool,
    chunk_size: usize,
}

impl PeakDetector {
    /// Create a detector, validating the configuration once.
    pub fn new(config: ToleranceConfig) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            parallel: cfg!(feature = "parallel"),
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Enable or disable the parallel scan.
    ///
    /// Without the `parallel` feature the scan is always sequential.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of points per parallel work unit.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, InvalidConfigError> {
        if chunk_size == 0 {
            return Err(InvalidConfigError::ZeroChunkSize);
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// The tolerance configuration in use
    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Flag the peaks of an already validated signal.
    pub fn detect(&self, signal: &SortedSignal) -> PeakFlags {
        self.scan(signal.as_arrays())
    }

    /// Validate a borrowed signal, then flag its peaks.
    pub fn detect_arrays(&self, signal: &SignalArrays) -> Result<PeakFlags, DetectionError> {
        validate_signal(signal)?;
        Ok(self.scan(signal))
    }

    /// Validate a point sequence, then flag its peaks.
    pub fn detect_points(&self, points: &[SamplePoint]) -> Result<PeakFlags, DetectionError> {
        let signal = SortedSignal::from_points(points)?;
        Ok(self.detect(&signal))
    }

    fn scan(&self, signal: &SignalArrays) -> PeakFlags {
        let mut flags = vec![false; signal.len()];
        if self.parallel && signal.len() > self.chunk_size {
            debug!(
                "Scanning {} points in chunks of {}",
                signal.len(),
                self.chunk_size
            );
            self.scan_parallel(signal, &mut flags);
        } else {
            debug!("Scanning {} points sequentially", signal.len());
            self.scan_range(signal, 0, &mut flags);
        }
        PeakFlags::from(flags)
    }

    /// Fill `out` with the flags of rows `offset..offset + out.len()`.
    ///
    /// Neighbors are looked up in the whole signal, so rows near the edge of
    /// a chunk see their full window.
    fn scan_range(&self, signal: &SignalArrays, offset: usize, out: &mut [bool]) {
        for (k, flag) in out.iter_mut().enumerate() {
            *flag = self.is_peak(signal, offset + k);
        }
    }

    #[cfg(feature = "parallel")]
    fn scan_parallel(&self, signal: &SignalArrays, out: &mut [bool]) {
        let chunk_size = self.chunk_size;
        out.par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(chunk, flags)| self.scan_range(signal, chunk * chunk_size, flags));
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_parallel(&self, signal: &SignalArrays, out: &mut [bool]) {
        self.scan_range(signal, 0, out);
    }

    fn is_peak(&self, signal: &SignalArrays, index: usize) -> bool {
        let config = &self.config;
        let intensity = signal.intensity[index];
        if intensity < config.min_intensity {
            return false;
        }

        let rt = signal.retention_time[index];
        let dt = signal.drift_time[index];
        for other in mz_window(&signal.mz, index, config.mz_tolerance) {
            if other == index
                || (signal.retention_time[other] - rt).abs() > config.rt_tolerance
                || (signal.drift_time[other] - dt).abs() > config.dt_tolerance
            {
                continue;
            }
            let other_intensity = signal.intensity[other];
            // Equal maxima: the earliest point in sort order keeps the peak.
            if other_intensity > intensity || (other_intensity == intensity && other < index) {
                return false;
            }
        }
        true
    }
}

/// Rows whose m/z lies within `tolerance` of row `index`.
///
/// `mz` must be ascending. The distance to the center is monotone on each
/// side of `index`, so both bounds are found by binary search and the range
/// always contains `index`.
pub(crate) fn mz_window(mz: &[f64], index: usize, tolerance: f64) -> Range<usize> {
    let center = mz[index];
    let start = mz[..index].partition_point(|&m| center - m > tolerance);
    let end = index + 1 + mz[index + 1..].partition_point(|&m| m - center <= tolerance);
    start..end
}

/// Flag the local-maximum peaks of a sorted point sequence.
///
/// The configuration is checked first, then the points; on any violation
/// an error is returned and no flags are produced.
pub fn detect_peaks(
    points: &[SamplePoint],
    config: &ToleranceConfig,
) -> Result<PeakFlags, DetectionError> {
    PeakDetector::new(*config)?.detect_points(points)
}

/// Flag the local-maximum peaks of a signal in SoA form.
pub fn detect_peaks_arrays(
    signal: &SignalArrays,
    config: &ToleranceConfig,
) -> Result<PeakFlags, DetectionError> {
    PeakDetector::new(*config)?.detect_arrays(signal)
}
