#![forbid(unsafe_code)]

//! Row-count providers describing the live shape of a sectioned list.
//!
//! The navigator never caches the shape of the list. Every traversal asks a
//! [`RowCountProvider`] for the current section and row counts, so a row
//! inserted or deleted between two taps is seen by the next one.
//!
//! # Invariants
//!
//! 1. `row_count(section)` for `section >= section_count()` is zero.
//! 2. Providers backed by signed or optional data clamp negatives and
//!    missing counts to zero rows.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Result |
//! |---------|-------|--------|
//! | Section out of range | Stale caller index | `RowError::SectionOutOfRange` |
//! | Row out of range | Delete past the end | `RowError::RowOutOfRange` |

use core::fmt;

use crate::row_id::RowId;

/// Supplies the current shape of a sectioned list.
pub trait RowCountProvider {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of rows in `section`. Zero for sections out of range.
    fn row_count(&self, section: usize) -> usize;

    /// Whether `id` addresses an existing row.
    fn contains(&self, id: RowId) -> bool {
        id.section < self.section_count() && id.row < self.row_count(id.section)
    }
}

impl<T: RowCountProvider + ?Sized> RowCountProvider for &T {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn row_count(&self, section: usize) -> usize {
        (**self).row_count(section)
    }
}

impl RowCountProvider for [usize] {
    fn section_count(&self) -> usize {
        self.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.get(section).copied().unwrap_or(0)
    }
}

impl RowCountProvider for Vec<usize> {
    fn section_count(&self) -> usize {
        self.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.as_slice().row_count(section)
    }
}

// ---------------------------------------------------------------------------
// RowError
// ---------------------------------------------------------------------------

/// A structural edit addressed a section or row that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowError {
    /// The section index is past the last section.
    SectionOutOfRange { section: usize, sections: usize },
    /// The row index is past the last row of its section.
    RowOutOfRange { row: RowId, rows: usize },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionOutOfRange { section, sections } => {
                write!(f, "section {section} out of range ({sections} sections)")
            }
            Self::RowOutOfRange { row, rows } => {
                write!(f, "row {row} out of range ({rows} rows in section)")
            }
        }
    }
}

impl std::error::Error for RowError {}

// ---------------------------------------------------------------------------
// SectionedRows
// ---------------------------------------------------------------------------

/// A mutable list shape: one row count per section.
///
/// ```
/// # use fieldnav_core::{RowCountProvider, RowId, SectionedRows};
/// let mut rows = SectionedRows::new(vec![3, 0, 1]);
/// rows.insert_row(RowId::new(1, 0)).unwrap();
/// assert_eq!(rows.row_count(1), 1);
/// assert_eq!(rows.total_rows(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedRows {
    counts: Vec<usize>,
}

impl SectionedRows {
    /// Create a shape from per-section row counts.
    #[must_use]
    pub fn new(counts: impl Into<Vec<usize>>) -> Self {
        Self {
            counts: counts.into(),
        }
    }

    /// Per-section row counts.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total rows across all sections.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.counts.iter().sum()
    }

    /// All row ids in traversal order.
    pub fn row_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(section, &rows)| (0..rows).map(move |row| RowId::new(section, row)))
    }

    /// Append a section with `rows` rows.
    pub fn push_section(&mut self, rows: usize) {
        self.counts.push(rows);
    }

    /// Insert a section with `rows` rows before `section`.
    ///
    /// `section` may equal the section count to append.
    pub fn insert_section(&mut self, section: usize, rows: usize) -> Result<(), RowError> {
        if section > self.counts.len() {
            return Err(self.section_error(section));
        }
        self.counts.insert(section, rows);
        crate::trace!(section, rows, "section inserted");
        Ok(())
    }

    /// Remove `section`, returning how many rows it held.
    pub fn delete_section(&mut self, section: usize) -> Result<usize, RowError> {
        self.check_section(section)?;
        let rows = self.counts.remove(section);
        crate::trace!(section, rows, "section deleted");
        Ok(rows)
    }

    /// Replace the row count of `section`.
    pub fn set_row_count(&mut self, section: usize, rows: usize) -> Result<(), RowError> {
        self.check_section(section)?;
        self.counts[section] = rows;
        Ok(())
    }

    /// Insert a row at `at`. `at.row` may equal the row count to append.
    pub fn insert_row(&mut self, at: RowId) -> Result<(), RowError> {
        self.check_section(at.section)?;
        let rows = self.counts[at.section];
        if at.row > rows {
            return Err(RowError::RowOutOfRange { row: at, rows });
        }
        self.counts[at.section] = rows + 1;
        crate::trace!(section = at.section, row = at.row, "row inserted");
        Ok(())
    }

    /// Delete the row at `at`.
    pub fn delete_row(&mut self, at: RowId) -> Result<(), RowError> {
        self.check_section(at.section)?;
        let rows = self.counts[at.section];
        if at.row >= rows {
            return Err(RowError::RowOutOfRange { row: at, rows });
        }
        self.counts[at.section] = rows - 1;
        crate::trace!(section = at.section, row = at.row, "row deleted");
        Ok(())
    }

    fn check_section(&self, section: usize) -> Result<(), RowError> {
        if section < self.counts.len() {
            Ok(())
        } else {
            Err(self.section_error(section))
        }
    }

    fn section_error(&self, section: usize) -> RowError {
        RowError::SectionOutOfRange {
            section,
            sections: self.counts.len(),
        }
    }
}

impl RowCountProvider for SectionedRows {
    fn section_count(&self) -> usize {
        self.counts.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.counts.row_count(section)
    }
}

// ---------------------------------------------------------------------------
// SignedRowCounts
// ---------------------------------------------------------------------------

/// Adapter over presentation-layer callbacks that report signed counts.
///
/// Negative section or row counts, and sections for which `rows` returns
/// `None`, are treated as empty.
pub struct SignedRowCounts<S, R> {
    sections: S,
    rows: R,
}

impl<S, R> SignedRowCounts<S, R>
where
    S: Fn() -> i64,
    R: Fn(usize) -> Option<i64>,
{
    /// Wrap a section-count callback and a per-section row-count callback.
    pub fn new(sections: S, rows: R) -> Self {
        Self { sections, rows }
    }
}

impl<S, R> fmt::Debug for SignedRowCounts<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRowCounts").finish_non_exhaustive()
    }
}

impl<S, R> RowCountProvider for SignedRowCounts<S, R>
where
    S: Fn() -> i64,
    R: Fn(usize) -> Option<i64>,
{
    fn section_count(&self) -> usize {
        usize::try_from((self.sections)()).unwrap_or(0)
    }

    fn row_count(&self, section: usize) -> usize {
        if section >= self.section_count() {
            return 0;
        }
        (self.rows)(section)
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(0)
    }
}
