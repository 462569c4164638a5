#![forbid(unsafe_code)]

//! Row coordinates inside a sectioned list.

use core::fmt;

/// Position of a row in a sectioned list.
///
/// Ordering is lexicographic: section first, then row. This is the order in
/// which a user steps through fields with the Next button.
///
/// ```
/// # use fieldnav_core::RowId;
/// assert!(RowId::new(0, 9) < RowId::new(1, 0));
/// assert!(RowId::new(2, 1) < RowId::new(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RowId {
    /// Section index.
    pub section: usize,
    /// Row index within the section.
    pub row: usize,
}

impl RowId {
    /// Create a row id.
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// The row directly below in the same section. Saturates at `usize::MAX`.
    #[must_use]
    pub const fn shifted_down(self) -> Self {
        Self::new(self.section, self.row.saturating_add(1))
    }

    /// The row directly above in the same section, or `None` for row 0.
    #[must_use]
    pub const fn shifted_up(self) -> Option<Self> {
        match self.row.checked_sub(1) {
            Some(row) => Some(Self::new(self.section, row)),
            None => None,
        }
    }
}

impl From<(usize, usize)> for RowId {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}
