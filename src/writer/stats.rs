use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of signal rows written
    pub rows_written: usize,
    /// Number of rows flagged as peaks
    pub peaks_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total size of the row groups in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows ({} peaks) in {} row groups",
            self.rows_written, self.peaks_written, self.row_groups_written
        )
    }
}
