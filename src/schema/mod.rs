//! # Signal and Peak Table Schemas
//!
//! Arrow schema definitions for the two tables this crate works with.
//!
//! ## Signal Table
//!
//! | Column | Type | Description | CV Term |
//! |--------|------|-------------|---------|
//! | mz | Float64 | Mass-to-charge ratio (primary sort key) | MS:1000040 |
//! | retention_time | Float64 | Retention time (secondary sort key) | MS:1000016 |
//! | drift_time | Float64 | Ion mobility drift time (tertiary sort key) | MS:1002476 |
//! | intensity | Float64 | Signal intensity | MS:1000042 |
//!
//! ## Peak Table
//!
//! The signal table plus a non-nullable Boolean `peaks` column, aligned row
//! for row with the sorted signal.
//!
//! Raw exports use `rt`, `dt` and `mslevel`; see [`columns::SOURCE_RT`] and
//! friends for the names the loader understands.

mod builders;
/// Column name constants.
pub mod columns;
mod constants;
mod validation;


pub use builders::{
    create_peak_table_schema, create_peak_table_schema_arc, create_signal_schema,
};
pub use columns::*;
pub use constants::*;
pub(crate) use validation::is_float_castable;
pub use validation::{validate_peak_table_schema, validate_signal_schema, SchemaValidationError};
