//! # Signal Model
//!
//! Strongly typed, fixed-schema point arrays for IMS-MS signals.
//!
//! A signal enters the crate as [`SignalArrays`] (from the loader, from
//! columns, or from [`SamplePoint`]s) and is validated exactly once into a
//! [`SortedSignal`], which the peak detector consumes without re-checking.
//!
//! ```
//! use peakfinder::signal::{SamplePoint, SortedSignal};
//!
//! let points = [
//!     SamplePoint::new(100.0, 1.0, 2.0, 10.0),
//!     SamplePoint::new(100.0, 1.5, 2.0, 30.0),
//!     SamplePoint::new(100.5, 1.0, 2.0, 20.0),
//! ];
//! let signal = SortedSignal::from_points(&points)?;
//! assert_eq!(signal.len(), 3);
//! # Ok::<(), peakfinder::signal::InvalidInputError>(())
//! ```

mod arrays;
mod error;
mod sorted;


pub use arrays::{SamplePoint, SignalArrays};
pub use error::InvalidInputError;
pub use sorted::{validate_signal, SortedSignal};
