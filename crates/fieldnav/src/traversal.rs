#![forbid(unsafe_code)]

//! Structural search for the nearest target row.
//!
//! # Algorithm
//!
//! Rows are visited in (section, row) order starting next to `from`. Each
//! section's row count is read from the provider when the scan enters it, so
//! empty sections fall through the inner loop and the scan simply moves on.
//! Cost is linear in the rows between `from` and the hit, which is fine for
//! form-sized lists and needs no sorted index of registered rows.
//!
//! # Failure Modes
//!
//! - `from` past the end of its section: backward search starts at the
//!   section's last row; forward search continues with the next section.
//! - `from` in a section past the last one: backward search starts at the
//!   last row of the last section; forward search finds nothing.

use fieldnav_core::{RowCountProvider, RowId};

/// Nearest row strictly after `from` for which `is_target` holds.
pub fn next_row<R, F>(rows: &R, from: RowId, mut is_target: F) -> Option<RowId>
where
    R: RowCountProvider + ?Sized,
    F: FnMut(RowId) -> bool,
{
    let sections = rows.section_count();
    let mut section = from.section;
    let mut row = from.row.checked_add(1)?;

    while section < sections {
        let count = rows.row_count(section);
        while row < count {
            let candidate = RowId::new(section, row);
            if is_target(candidate) {
                return Some(candidate);
            }
            row += 1;
        }
        section += 1;
        row = 0;
    }
    None
}

/// Nearest row strictly before `from` for which `is_target` holds.
pub fn previous_row<R, F>(rows: &R, from: RowId, mut is_target: F) -> Option<RowId>
where
    R: RowCountProvider + ?Sized,
    F: FnMut(RowId) -> bool,
{
    let sections = rows.section_count();
    if sections == 0 {
        return None;
    }
    let (mut section, mut row) = if from.section < sections {
        (from.section, from.row.min(rows.row_count(from.section)))
    } else {
        let last = sections - 1;
        (last, rows.row_count(last))
    };

    loop {
        while row > 0 {
            row -= 1;
            let candidate = RowId::new(section, row);
            if is_target(candidate) {
                return Some(candidate);
            }
        }
        if section == 0 {
            return None;
        }
        section -= 1;
        row = rows.row_count(section);
    }
}
