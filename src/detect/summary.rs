use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::signal::SignalArrays;

use super::config::ToleranceConfig;
use super::flags::PeakFlags;

/// Summary statistics about one detection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSummary {
    /// Number of signal points scanned
    pub total_points: usize,
    /// Number of points flagged as peaks
    pub peak_count: usize,
    /// m/z range (min, max)
    pub mz_range: Option<(f64, f64)>,
    /// Retention time range (min, max)
    pub rt_range: Option<(f64, f64)>,
    /// Drift time range (min, max)
    pub dt_range: Option<(f64, f64)>,
    /// Intensity of the most intense peak
    pub max_peak_intensity: Option<f64>,
    /// Configuration the run used
    pub tolerances: ToleranceConfig,
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

impl DetectionSummary {
    /// Summarize the flags produced for `signal`.
    pub fn new(signal: &SignalArrays, flags: &PeakFlags, tolerances: &ToleranceConfig) -> Self {
        let max_peak_intensity = flags
            .peak_indices()
            .filter_map(|index| signal.intensity.get(index).copied())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

        Self {
            total_points: signal.len(),
            peak_count: flags.peak_count(),
            mz_range: value_range(&signal.mz),
            rt_range: value_range(&signal.retention_time),
            dt_range: value_range(&signal.drift_time),
            max_peak_intensity,
            tolerances: *tolerances,
        }
    }

    /// Fraction of points flagged as peaks
    pub fn peak_fraction(&self) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            self.peak_count as f64 / self.total_points as f64
        }
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Peak Detection Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("======================").cyan()));
            output.push_str(&format!(
                "{}: {}\n",
                style("Points").bold(),
                self.total_points
            ));
            output.push_str(&format!(
                "{}: {} ({:.3}%)\n",
                style("Peaks").bold(),
                style(self.peak_count).green(),
                self.peak_fraction() * 100.0
            ));
            output.push_str(&self.format_ranges());
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn format_ranges(&self) -> String {
        let mut output = String::new();
        if let Some((min, max)) = self.mz_range {
            output.push_str(&format!("m/z range: {:.4} - {:.4}\n", min, max));
        }
        if let Some((min, max)) = self.rt_range {
            output.push_str(&format!("RT range: {:.2} - {:.2}\n", min, max));
        }
        if let Some((min, max)) = self.dt_range {
            output.push_str(&format!("DT range: {:.3} - {:.3}\n", min, max));
        }
        if let Some(max) = self.max_peak_intensity {
            output.push_str(&format!("Max peak intensity: {:.1}\n", max));
        }
        output.push_str(&format!(
            "Tolerances: mz={} rt={} dt={} min_intensity={}\n",
            self.tolerances.mz_tolerance,
            self.tolerances.rt_tolerance,
            self.tolerances.dt_tolerance,
            self.tolerances.min_intensity
        ));
        output
    }
}

impl fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Peak Detection Summary")?;
        writeln!(f, "======================")?;
        writeln!(f, "Points: {}", self.total_points)?;
        writeln!(
            f,
            "Peaks: {} ({:.3}%)",
            self.peak_count,
            self.peak_fraction() * 100.0
        )?;
        write!(f, "{}", self.format_ranges())
    }
}
