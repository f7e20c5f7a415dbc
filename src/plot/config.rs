use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PlotError;

/// Pixels per inch used to turn the figure size into a layout size
pub const PIXELS_PER_INCH: u32 = 100;

/// Half-open window `[start, stop)` of row positions to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRange {
    /// First row shown
    pub start: usize,
    /// One past the last row shown
    pub stop: usize,
}

impl DisplayRange {
    /// Create a window over rows `start..stop`
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Check the window against a signal of `len` rows
    pub fn check(&self, len: usize) -> Result<(), PlotError> {
        if self.start >= self.stop || self.stop > len {
            return Err(PlotError::DisplayRange {
                start: self.start,
                stop: self.stop,
                len,
            });
        }
        Ok(())
    }
}

impl FromStr for DisplayRange {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, stop) = s
            .split_once(':')
            .ok_or_else(|| PlotError::ParseRange(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| PlotError::ParseRange(s.to_string()))
        };
        Ok(Self::new(parse(start)?, parse(stop)?))
    }
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.stop)
    }
}

/// Plot appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure size in inches (width, height)
    pub figsize: (u32, u32),
    /// Rows to draw; the whole signal when unset
    pub display_range: Option<DisplayRange>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figsize: (12, 8),
            display_range: None,
        }
    }
}

impl PlotConfig {
    /// Restrict the plot to a window of rows
    pub fn with_display_range(mut self, range: DisplayRange) -> Self {
        self.display_range = Some(range);
        self
    }

    /// Set the figure size in inches
    pub fn with_figsize(mut self, width: u32, height: u32) -> Self {
        self.figsize = (width, height);
        self
    }

    /// Layout size in pixels
    pub fn pixel_size(&self) -> (usize, usize) {
        let (w, h) = self.figsize;
        (
            (w.saturating_mul(PIXELS_PER_INCH)) as usize,
            (h.saturating_mul(PIXELS_PER_INCH)) as usize,
        )
    }
}
