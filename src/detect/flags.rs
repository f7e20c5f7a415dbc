use std::ops::Index;

/// One boolean per signal point, in signal order.
///
/// `true` marks a peak. The sequence is produced whole by the detector and
/// is not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakFlags(Vec<bool>);

impl PeakFlags {
    /// Number of flags (equal to the number of signal points)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no flags
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flag of row `index`, if any
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Borrow the flags as a slice
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Iterate over the flags
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of points flagged as peaks
    pub fn peak_count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag).count()
    }

    /// Row indices of the peaks, ascending
    pub fn peak_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, &flag)| flag.then_some(index))
    }

    /// Release the underlying vector
    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for PeakFlags {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

impl AsRef<[bool]> for PeakFlags {
    fn as_ref(&self) -> &[bool] {
        &self.0
    }
}

impl Index<usize> for PeakFlags {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.0[index]
    }
}
