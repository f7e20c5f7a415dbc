use std::collections::HashMap;

use crate::detect::ToleranceConfig;
use crate::schema::{
    KEY_DETECTION_TIMESTAMP, KEY_FORMAT_VERSION, KEY_MS_LEVEL, KEY_SOFTWARE, KEY_SOURCE_FILE,
    KEY_TOLERANCES, PEAK_TABLE_FORMAT_VERSION,
};

use super::WriterError;

/// Provenance stored in the Parquet footer of a peak table
#[derive(Debug, Clone, Default)]
pub struct TableMetadata {
    /// File the signal was loaded from
    pub source_file: Option<String>,
    /// Acquisition level the signal was filtered to
    pub ms_level: Option<String>,
    /// Tolerances the peaks were detected with
    pub tolerances: Option<ToleranceConfig>,
    /// RFC 3339 detection time; the current time when unset
    pub detection_timestamp: Option<String>,
}

impl TableMetadata {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the detection tolerances
    pub fn with_tolerances(mut self, tolerances: ToleranceConfig) -> Self {
        self.tolerances = Some(tolerances);
        self
    }

    /// Record the source file
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Record the acquisition level
    pub fn with_ms_level(mut self, ms_level: impl Into<String>) -> Self {
        self.ms_level = Some(ms_level.into());
        self
    }

    /// Convert to Parquet footer key/value pairs
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, WriterError> {
        let mut metadata = HashMap::new();

        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            PEAK_TABLE_FORMAT_VERSION.to_string(),
        );

        metadata.insert(
            KEY_DETECTION_TIMESTAMP.to_string(),
            self.detection_timestamp
                .clone()
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        );

        metadata.insert(
            KEY_SOFTWARE.to_string(),
            format!("peakfinder v{}", env!("CARGO_PKG_VERSION")),
        );

        if let Some(ref tolerances) = self.tolerances {
            metadata.insert(KEY_TOLERANCES.to_string(), tolerances.to_json()?);
        }

        if let Some(ref source) = self.source_file {
            metadata.insert(KEY_SOURCE_FILE.to_string(), source.clone());
        }

        if let Some(ref level) = self.ms_level {
            metadata.insert(KEY_MS_LEVEL.to_string(), level.clone());
        }

        Ok(metadata)
    }
}
