#![forbid(unsafe_code)]

//! Row-keyed store of field handles.
//!
//! Keys are positional, so a structural edit to the list changes what a key
//! means. The `*_inserted` / `*_deleted` methods re-key the affected entries
//! so each handle keeps pointing at the row it was realized for.
//!
//! # Invariants
//!
//! 1. At most one handle per [`RowId`].
//! 2. Iteration order is unspecified; traversal order comes from the list
//!    shape, never from this map.
//! 3. Re-keying is injective below `usize::MAX`: no edit makes two entries
//!    collide. Shifts saturate at the maximum index, so an entry already at
//!    `usize::MAX` can merge with its neighbour.

use std::collections::HashMap;

use fieldnav_core::{RowId, trace, warn};

use crate::field::FieldHandle;

/// Mapping from row id to field handle.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    fields: HashMap<RowId, H>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl<H> Registry<H> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the handle for `id`, returning the displaced one.
    pub fn insert(&mut self, id: RowId, handle: H) -> Option<H> {
        trace!(row = %id, "field registered");
        self.fields.insert(id, handle)
    }

    /// Remove the handle for `id`, if any.
    pub fn remove(&mut self, id: RowId) -> Option<H> {
        let removed = self.fields.remove(&id);
        if removed.is_some() {
            trace!(row = %id, "field unregistered");
        }
        removed
    }

    /// Drop every handle.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// The handle for `id`, if registered.
    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&H> {
        self.fields.get(&id)
    }

    /// The handle for `id`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut H> {
        self.fields.get_mut(&id)
    }

    /// Whether a handle is registered for `id`.
    #[must_use]
    pub fn contains(&self, id: RowId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Number of registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no handle is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &H)> + '_ {
        self.fields.iter().map(|(id, handle)| (*id, handle))
    }

    /// Entries in unspecified order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RowId, &mut H)> + '_ {
        self.fields.iter_mut().map(|(id, handle)| (*id, handle))
    }

    /// Registered row ids in traversal order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.fields.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // -------------------------------------------------------------------------
    // Structural re-keying
    // -------------------------------------------------------------------------

    /// A row was inserted at `at`: rows `at.row..` of that section move down.
    pub fn row_inserted(&mut self, at: RowId) {
        self.rekey(|id| {
            if id.section == at.section && id.row >= at.row {
                id.shifted_down()
            } else {
                id
            }
        });
    }

    /// The row at `at` was deleted: its handle is dropped and later rows of
    /// the same section move up. Returns the dropped handle.
    pub fn row_deleted(&mut self, at: RowId) -> Option<H> {
        let removed = self.fields.remove(&at);
        self.rekey(|id| {
            if id.section == at.section && id.row > at.row {
                id.shifted_up().unwrap_or(id)
            } else {
                id
            }
        });
        removed
    }

    /// A section was inserted at index `section`: it and later sections move
    /// down by one.
    pub fn section_inserted(&mut self, section: usize) {
        self.rekey(|id| {
            if id.section >= section {
                RowId::new(id.section.saturating_add(1), id.row)
            } else {
                id
            }
        });
    }

    /// Section `section` was deleted: its handles are dropped and later
    /// sections move up. Returns how many handles were dropped.
    pub fn section_deleted(&mut self, section: usize) -> usize {
        let before = self.fields.len();
        self.fields.retain(|id, _| id.section != section);
        let dropped = before - self.fields.len();
        self.rekey(|id| {
            if id.section > section {
                RowId::new(id.section - 1, id.row)
            } else {
                id
            }
        });
        dropped
    }

    fn rekey(&mut self, mut map: impl FnMut(RowId) -> RowId) {
        let old = std::mem::take(&mut self.fields);
        self.fields = old
            .into_iter()
            .map(|(id, handle)| (map(id), handle))
            .collect();
    }
}

impl<H: FieldHandle> Registry<H> {
    /// The single entry whose handle reports active.
    ///
    /// Returns `None` when no handle is active, and also when several are:
    /// an ambiguous focus state has no well-defined traversal origin.
    #[must_use]
    pub fn active_entry(&self) -> Option<(RowId, &H)> {
        let mut found = None;
        for (id, handle) in self.iter() {
            if !handle.is_active() {
                continue;
            }
            if found.is_some() {
                warn!(
                    first = ?found.map(|(first, _)| first),
                    second = %id,
                    "multiple active fields"
                );
                return None;
            }
            found = Some((id, handle));
        }
        found
    }

    /// Deactivate every handle that reports active. Returns how many.
    pub fn deactivate_all(&mut self) -> usize {
        let mut count = 0;
        for (_, handle) in self.iter_mut() {
            if handle.is_active() {
                handle.deactivate();
                count += 1;
            }
        }
        count
    }
}
