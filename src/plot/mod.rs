//! # Presentation Layer
//!
//! Turns a signal and its peak flags into a [`plotly::Plot`]: intensity
//! against row position as a line, peaks as markers. The plot is a plain
//! value, so it can be rendered to HTML or JSON, embedded in other pages, or
//! inspected in tests without any display.
//!
//! ```
//! use peakfinder::detect::PeakFlags;
//! use peakfinder::plot::{plot_peaks, DisplayRange, PlotConfig};
//! use peakfinder::signal::SignalArrays;
//!
//! let signal = SignalArrays::new(
//!     vec![1.0, 2.0, 3.0],
//!     vec![0.0; 3],
//!     vec![0.0; 3],
//!     vec![1.0, 4.0, 2.0],
//! )?;
//! let flags = PeakFlags::from(vec![false, true, false]);
//! let config = PlotConfig::default().with_display_range(DisplayRange::new(0, 2));
//! let plot = plot_peaks(&signal, &flags, &config)?;
//! assert!(plot.to_json().contains("Signal with peaks (from 0 to 2)"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod render;


pub use config::{DisplayRange, PlotConfig, PIXELS_PER_INCH};
pub use error::PlotError;
pub use render::{plot_peaks, save_html};
