/// Peak table format version - follows semantic versioning
pub const PEAK_TABLE_FORMAT_VERSION: &str = "1.0.0";

/// File extension for peak tables
pub const PEAK_TABLE_EXTENSION: &str = ".peaks.parquet";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "peakfinder:format_version";

/// Metadata key for the tolerance configuration (JSON) in Parquet footer
pub const KEY_TOLERANCES: &str = "peakfinder:tolerances";

/// Metadata key for the detection timestamp
pub const KEY_DETECTION_TIMESTAMP: &str = "peakfinder:detection_timestamp";

/// Metadata key for the file the signal was loaded from
pub const KEY_SOURCE_FILE: &str = "peakfinder:source_file";

/// Metadata key for the acquisition level the signal was filtered to
pub const KEY_MS_LEVEL: &str = "peakfinder:ms_level";

/// Metadata key for software info
pub const KEY_SOFTWARE: &str = "peakfinder:software";

/// Metadata key for the number of flagged peaks
pub const KEY_PEAK_COUNT: &str = "peakfinder:peak_count";
