/// Column names as constants for type safety
/// Mass-to-charge ratio (MS:1000040)
pub const MZ: &str = "mz";
/// Retention time (MS:1000016)
pub const RETENTION_TIME: &str = "retention_time";
/// Ion mobility drift time (MS:1002476)
pub const DRIFT_TIME: &str = "drift_time";
/// Signal intensity (MS:1000042)
pub const INTENSITY: &str = "intensity";
/// Peak flag written next to the signal columns
pub const PEAKS: &str = "peaks";

/// Canonical signal columns, in sort-key order followed by intensity
pub const SIGNAL_COLUMNS: [&str; 4] = [MZ, RETENTION_TIME, DRIFT_TIME, INTENSITY];

// =============================================================================
// Source table columns
// =============================================================================
// Raw exports name the separation axes with short names and carry the
// acquisition level of every row; the loader maps them onto the columns above.

/// Retention time as named in raw exports
pub const SOURCE_RT: &str = "rt";
/// Drift time as named in raw exports
pub const SOURCE_DT: &str = "dt";
/// Acquisition (MS) level of the scan a row belongs to
pub const SOURCE_MS_LEVEL: &str = "mslevel";
