/// Errors raised while building or saving a plot
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The display window is empty or runs past the end of the signal
    #[error("Display range {start}:{stop} is invalid for a signal of {len} points")]
    DisplayRange {
        /// First row shown
        start: usize,
        /// One past the last row shown
        stop: usize,
        /// Number of rows in the signal
        len: usize,
    },

    /// A display range string is not of the form `START:STOP`
    #[error("Cannot parse display range '{0}', expected START:STOP")]
    ParseRange(String),

    /// Flags and signal rows are not aligned
    #[error("{flags} peak flags for {rows} signal rows")]
    LengthMismatch {
        /// Number of signal rows
        rows: usize,
        /// Number of flags
        flags: usize,
    },

    /// I/O error while saving
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
