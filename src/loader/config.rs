use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::columns;

/// Configuration for loading signals from Parquet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Acquisition level to keep (`None` keeps every row)
    pub ms_level: Option<String>,

    /// Column holding the acquisition level
    pub ms_level_column: String,

    /// Source column name to canonical column name
    pub column_aliases: BTreeMap<String, String>,

    /// Batch size for reading records
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let mut column_aliases = BTreeMap::new();
        column_aliases.insert(
            columns::SOURCE_RT.to_string(),
            columns::RETENTION_TIME.to_string(),
        );
        column_aliases.insert(
            columns::SOURCE_DT.to_string(),
            columns::DRIFT_TIME.to_string(),
        );

        Self {
            ms_level: Some("1".to_string()),
            ms_level_column: columns::SOURCE_MS_LEVEL.to_string(),
            column_aliases,
            batch_size: 65536,
        }
    }
}

impl LoaderConfig {
    /// Keep only rows of this acquisition level
    pub fn with_ms_level(mut self, ms_level: impl Into<String>) -> Self {
        self.ms_level = Some(ms_level.into());
        self
    }

    /// Keep rows of every acquisition level
    pub fn all_ms_levels(mut self) -> Self {
        self.ms_level = None;
        self
    }

    /// Map a source column onto a canonical column
    pub fn with_alias(mut self, source: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.column_aliases.insert(source.into(), canonical.into());
        self
    }

    /// Set the Parquet record batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Source column names that may stand in for `canonical`, canonical first
    pub(super) fn candidates<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> {
        std::iter::once(canonical).chain(
            self.column_aliases
                .iter()
                .filter(move |(_, target)| target.as_str() == canonical)
                .map(|(source, _)| source.as_str()),
        )
    }
}
