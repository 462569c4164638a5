#![forbid(unsafe_code)]

//! Previous / Next / Done navigation between registered fields.
//!
//! [`FieldNavigator`] owns the [`Registry`] and the last traversal
//! direction. The list shape is passed into every call that needs it, so a
//! row inserted or deleted between two taps is always observed.
//!
//! # Invariants
//!
//! 1. Each tap invokes exactly one handler method, after every
//!    activate/deactivate side effect of that tap.
//! 2. After [`done_button_tapped`](FieldNavigator::done_button_tapped) no
//!    registered field reports active.
//! 3. Registry mutations never change [`direction`](FieldNavigator::direction).
//! 4. Traversal never returns the origin row.
//!
//! # Failure Modes
//!
//! Nothing here fails. A missing active field, a missing target, or an
//! ambiguous focus state (several fields active) all resolve to `None` and
//! leave the tap as a plain resign.

use core::fmt;

use fieldnav_core::{RowCountProvider, RowId, debug, debug_span};

use crate::field::{FieldContents, FieldHandle};
use crate::registry::Registry;
use crate::traversal::{next_row, previous_row};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The navigation action a user requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Focus the following field.
    Next,
    /// Focus the preceding field.
    Previous,
    /// Resign focus.
    Done,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// NavigationHandler
// ---------------------------------------------------------------------------

/// Receives a notification after each toolbar tap.
///
/// Each method gets the field that lost focus, or `None` when no field was
/// active. All methods default to doing nothing.
pub trait NavigationHandler<H> {
    /// Previous was tapped.
    fn on_previous(&mut self, _lost_focus: Option<&H>) {}

    /// Next was tapped.
    fn on_next(&mut self, _lost_focus: Option<&H>) {}

    /// Done was tapped.
    fn on_done(&mut self, _lost_focus: Option<&H>) {}
}

impl<H, F> NavigationHandler<H> for F
where
    F: FnMut(Direction, Option<&H>),
{
    fn on_previous(&mut self, lost_focus: Option<&H>) {
        self(Direction::Previous, lost_focus);
    }

    fn on_next(&mut self, lost_focus: Option<&H>) {
        self(Direction::Next, lost_focus);
    }

    fn on_done(&mut self, lost_focus: Option<&H>) {
        self(Direction::Done, lost_focus);
    }
}

// ---------------------------------------------------------------------------
// NavOutcome
// ---------------------------------------------------------------------------

/// What a single tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    /// The requested direction.
    pub direction: Direction,
    /// Row of the field that lost focus.
    pub from: Option<RowId>,
    /// Row of the field that gained focus.
    pub to: Option<RowId>,
}

impl NavOutcome {
    /// Whether focus moved to another field.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.to.is_some()
    }
}

// ---------------------------------------------------------------------------
// FieldNavigator
// ---------------------------------------------------------------------------

/// Steps focus between fields registered by row.
///
/// ```
/// # use fieldnav::{FieldHandle, FieldNavigator, TextField};
/// # use fieldnav_core::RowId;
/// let rows: Vec<usize> = vec![3, 2];
/// let mut nav = FieldNavigator::new();
/// nav.register_field(RowId::new(0, 0), TextField::new("Name"));
/// nav.register_field(RowId::new(1, 1), TextField::new("Date"));
///
/// nav.registry_mut().get_mut(RowId::new(0, 0)).unwrap().activate();
/// let outcome = nav.next_button_tapped(&rows);
/// assert_eq!(outcome.to, Some(RowId::new(1, 1)));
/// assert_eq!(nav.active_field().map(TextField::label), Some("Date"));
/// ```
pub struct FieldNavigator<H> {
    registry: Registry<H>,
    direction: Option<Direction>,
    handler: Option<Box<dyn NavigationHandler<H>>>,
}

impl<H> Default for FieldNavigator<H> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            direction: None,
            handler: None,
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for FieldNavigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldNavigator")
            .field("registry", &self.registry)
            .field("direction", &self.direction)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl<H> FieldNavigator<H> {
    /// Create a navigator with an empty registry and no handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tap notification handler, replacing any previous one.
    pub fn set_handler(&mut self, handler: impl NavigationHandler<H> + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Builder form of [`set_handler`](Self::set_handler).
    #[must_use]
    pub fn with_handler(mut self, handler: impl NavigationHandler<H> + 'static) -> Self {
        self.set_handler(handler);
        self
    }

    /// Remove the tap notification handler.
    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    /// Direction of the most recent tap, `None` before the first one.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// The field registry.
    #[must_use]
    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    /// The field registry, mutably. Direct edits bypass tap bookkeeping.
    pub fn registry_mut(&mut self) -> &mut Registry<H> {
        &mut self.registry
    }

    /// Register the field realized for `row`, replacing any previous one.
    pub fn register_field(&mut self, row: RowId, handle: H) -> Option<H> {
        self.registry.insert(row, handle)
    }

    /// Forget the field for `row`. Call when the row is destroyed.
    pub fn unregister_field(&mut self, row: RowId) -> Option<H> {
        self.registry.remove(row)
    }

    /// Forget every field, e.g. when the form is reset.
    pub fn clear_all(&mut self) {
        debug!(fields = self.registry.len(), "registry cleared");
        self.registry.clear();
    }

    /// Nearest registered row strictly before `from`.
    pub fn find_previous<R>(&self, rows: &R, from: RowId) -> Option<RowId>
    where
        R: RowCountProvider + ?Sized,
    {
        if self.registry.is_empty() {
            return None;
        }
        previous_row(rows, from, |id| self.registry.contains(id))
    }

    /// Nearest registered row strictly after `from`.
    pub fn find_next<R>(&self, rows: &R, from: RowId) -> Option<RowId>
    where
        R: RowCountProvider + ?Sized,
    {
        if self.registry.is_empty() {
            return None;
        }
        next_row(rows, from, |id| self.registry.contains(id))
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// A row was inserted into the list at `at`.
    pub fn row_inserted(&mut self, at: RowId) {
        self.registry.row_inserted(at);
    }

    /// The row at `at` was removed from the list. Returns its field, if any.
    pub fn row_deleted(&mut self, at: RowId) -> Option<H> {
        self.registry.row_deleted(at)
    }

    /// A section was inserted into the list at index `section`.
    pub fn section_inserted(&mut self, section: usize) {
        self.registry.section_inserted(section);
    }

    /// Section `section` was removed from the list.
    pub fn section_deleted(&mut self, section: usize) -> usize {
        self.registry.section_deleted(section)
    }
}

impl<H: FieldHandle> FieldNavigator<H> {
    /// The focused field, if exactly one registered field is active.
    #[must_use]
    pub fn active_field(&self) -> Option<&H> {
        self.registry.active_entry().map(|(_, handle)| handle)
    }

    /// Row of the focused field, if exactly one registered field is active.
    #[must_use]
    pub fn active_row(&self) -> Option<RowId> {
        self.registry.active_entry().map(|(id, _)| id)
    }

    /// Whether tapping Previous would move focus to another field.
    pub fn can_go_previous<R>(&self, rows: &R) -> bool
    where
        R: RowCountProvider + ?Sized,
    {
        self.active_row()
            .and_then(|from| self.find_previous(rows, from))
            .is_some()
    }

    /// Whether tapping Next would move focus to another field.
    pub fn can_go_next<R>(&self, rows: &R) -> bool
    where
        R: RowCountProvider + ?Sized,
    {
        self.active_row()
            .and_then(|from| self.find_next(rows, from))
            .is_some()
    }

    /// Move focus to the preceding field, or resign if there is none.
    pub fn previous_button_tapped<R>(&mut self, rows: &R) -> NavOutcome
    where
        R: RowCountProvider + ?Sized,
    {
        self.step(Direction::Previous, |nav, from| nav.find_previous(rows, from))
    }

    /// Move focus to the following field, or resign if there is none.
    pub fn next_button_tapped<R>(&mut self, rows: &R) -> NavOutcome
    where
        R: RowCountProvider + ?Sized,
    {
        self.step(Direction::Next, |nav, from| nav.find_next(rows, from))
    }

    /// Resign focus.
    ///
    /// Every field reporting active is deactivated, so no field is focused
    /// afterwards even if the focus state was ambiguous.
    pub fn done_button_tapped(&mut self) -> NavOutcome {
        self.step(Direction::Done, |_, _| None)
    }

    fn step<F>(&mut self, direction: Direction, find: F) -> NavOutcome
    where
        F: FnOnce(&Self, RowId) -> Option<RowId>,
    {
        let _span = debug_span!("field_nav", direction = %direction).entered();
        self.direction = Some(direction);

        let from = self.active_row();
        let to = from.and_then(|origin| find(self, origin));

        match from {
            Some(origin) => {
                if let Some(field) = self.registry.get_mut(origin) {
                    field.deactivate();
                }
            }
            None if direction == Direction::Done => {
                self.registry.deactivate_all();
            }
            None => {}
        }
        if let Some(target) = to
            && let Some(field) = self.registry.get_mut(target)
        {
            field.activate();
        }
        debug!(?from, ?to, "focus step");

        if let Some(handler) = self.handler.as_mut() {
            let lost_focus = from.and_then(|origin| self.registry.get(origin));
            match direction {
                Direction::Previous => handler.on_previous(lost_focus),
                Direction::Next => handler.on_next(lost_focus),
                Direction::Done => handler.on_done(lost_focus),
            }
        }

        NavOutcome {
            direction,
            from,
            to,
        }
    }
}

impl<H: FieldContents> FieldNavigator<H> {
    /// Whether at least one field is registered and none is empty.
    #[must_use]
    pub fn all_fields_filled(&self) -> bool {
        !self.registry.is_empty() && self.registry.iter().all(|(_, field)| !field.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::field::TextField;

    type Log = Rc<RefCell<Vec<(Direction, Option<String>)>>>;

    fn navigator(ids: &[(usize, usize)]) -> FieldNavigator<TextField> {
        let mut nav = FieldNavigator::new();
        for &(s, r) in ids {
            nav.register_field(RowId::new(s, r), TextField::new(format!("{s}:{r}")));
        }
        nav
    }

    fn recording(nav: &mut FieldNavigator<TextField>) -> Log {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        nav.set_handler(move |direction: Direction, lost: Option<&TextField>| {
            assert!(
                lost.is_none_or(|field| !field.is_active()),
                "handler ran before the origin was deactivated"
            );
            sink.borrow_mut()
                .push((direction, lost.map(|f| f.label().to_owned())));
        });
        log
    }

    fn focus(nav: &mut FieldNavigator<TextField>, s: usize, r: usize) {
        nav.registry_mut()
            .get_mut(RowId::new(s, r))
            .expect("registered")
            .activate();
    }

    fn active_label(nav: &FieldNavigator<TextField>) -> Option<&str> {
        nav.active_field().map(TextField::label)
    }

    // --- Search ---

    #[test]
    fn reference_layout_forward() {
        let rows: Vec<usize> = vec![3, 2];
        let nav = navigator(&[(0, 0), (0, 2), (1, 1)]);
        assert_eq!(nav.find_next(&rows, RowId::new(0, 0)), Some(RowId::new(0, 2)));
        assert_eq!(nav.find_next(&rows, RowId::new(0, 2)), Some(RowId::new(1, 1)));
        assert_eq!(nav.find_next(&rows, RowId::new(1, 1)), None);
    }

    #[test]
    fn reference_layout_backward() {
        let rows: Vec<usize> = vec![3, 2];
        let nav = navigator(&[(0, 0), (0, 2), (1, 1)]);
        assert_eq!(
            nav.find_previous(&rows, RowId::new(1, 1)),
            Some(RowId::new(0, 2))
        );
        assert_eq!(
            nav.find_previous(&rows, RowId::new(0, 2)),
            Some(RowId::new(0, 0))
        );
        assert_eq!(nav.find_previous(&rows, RowId::new(0, 0)), None);
    }

    #[test]
    fn empty_section_is_skipped() {
        let rows: Vec<usize> = vec![1, 0, 1];
        let nav = navigator(&[(0, 0), (2, 0)]);
        assert_eq!(nav.find_next(&rows, RowId::new(0, 0)), Some(RowId::new(2, 0)));
        assert_eq!(
            nav.find_previous(&rows, RowId::new(2, 0)),
            Some(RowId::new(0, 0))
        );
    }

    #[test]
    fn registered_rows_outside_the_list_are_unreachable() {
        let rows: Vec<usize> = vec![2];
        let nav = navigator(&[(0, 0), (0, 5), (3, 0)]);
        assert_eq!(nav.find_next(&rows, RowId::new(0, 0)), None);
    }

    #[test]
    fn clear_all_empties_traversal() {
        let rows: Vec<usize> = vec![3, 2];
        let mut nav = navigator(&[(0, 0), (0, 2), (1, 1)]);
        nav.clear_all();
        assert!(nav.registry().is_empty());
        assert_eq!(nav.find_next(&rows, RowId::new(0, 0)), None);
        assert_eq!(nav.find_previous(&rows, RowId::new(1, 1)), None);
    }

    #[test]
    fn unregistered_row_is_skipped() {
        let rows: Vec<usize> = vec![3];
        let mut nav = navigator(&[(0, 0), (0, 1), (0, 2)]);
        nav.unregister_field(RowId::new(0, 1));
        assert_eq!(nav.find_next(&rows, RowId::new(0, 0)), Some(RowId::new(0, 2)));
    }

    // --- Active field ---

    #[test]
    fn active_field_none_or_ambiguous() {
        let mut nav = navigator(&[(0, 0), (0, 1)]);
        assert!(nav.active_field().is_none());
        focus(&mut nav, 0, 1);
        assert_eq!(active_label(&nav), Some("0:1"));
        focus(&mut nav, 0, 0);
        assert!(nav.active_field().is_none());
    }

    // --- Taps ---

    #[test]
    fn next_moves_focus_and_notifies() {
        let rows: Vec<usize> = vec![3, 2];
        let mut nav = navigator(&[(0, 0), (0, 2), (1, 1)]);
        let log = recording(&mut nav);
        focus(&mut nav, 0, 0);

        let outcome = nav.next_button_tapped(&rows);
        assert_eq!(
            outcome,
            NavOutcome {
                direction: Direction::Next,
                from: Some(RowId::new(0, 0)),
                to: Some(RowId::new(0, 2)),
            }
        );
        assert!(outcome.moved());
        assert_eq!(active_label(&nav), Some("0:2"));
        assert_eq!(nav.direction(), Some(Direction::Next));
        assert_eq!(
            log.borrow().as_slice(),
            &[(Direction::Next, Some("0:0".to_owned()))]
        );
    }

    #[test]
    fn next_at_end_resigns() {
        let rows: Vec<usize> = vec![3, 2];
        let mut nav = navigator(&[(0, 0), (1, 1)]);
        let log = recording(&mut nav);
        focus(&mut nav, 1, 1);

        let outcome = nav.next_button_tapped(&rows);
        assert!(!outcome.moved());
        assert_eq!(outcome.from, Some(RowId::new(1, 1)));
        assert!(nav.active_field().is_none());
        assert_eq!(
            log.borrow().as_slice(),
            &[(Direction::Next, Some("1:1".to_owned()))]
        );
    }

    #[test]
    fn previous_moves_back_across_sections() {
        let rows: Vec<usize> = vec![3, 0, 2];
        let mut nav = navigator(&[(0, 1), (2, 0)]);
        let log = recording(&mut nav);
        focus(&mut nav, 2, 0);

        let outcome = nav.previous_button_tapped(&rows);
        assert_eq!(outcome.to, Some(RowId::new(0, 1)));
        assert_eq!(active_label(&nav), Some("0:1"));
        assert_eq!(nav.direction(), Some(Direction::Previous));
        assert_eq!(
            log.borrow().as_slice(),
            &[(Direction::Previous, Some("2:0".to_owned()))]
        );
    }

    #[test]
    fn tap_without_focus_still_notifies() {
        let rows: Vec<usize> = vec![2];
        let mut nav = navigator(&[(0, 0), (0, 1)]);
        let log = recording(&mut nav);

        let outcome = nav.next_button_tapped(&rows);
        assert_eq!(outcome.from, None);
        assert_eq!(outcome.to, None);
        assert!(nav.active_field().is_none());
        assert_eq!(log.borrow().as_slice(), &[(Direction::Next, None)]);
    }

    #[test]
    fn done_resigns_and_uses_done_callback() {
        let mut nav = navigator(&[(0, 0), (0, 1)]);
        let log = recording(&mut nav);
        focus(&mut nav, 0, 1);

        let outcome = nav.done_button_tapped();
        assert_eq!(outcome.direction, Direction::Done);
        assert_eq!(outcome.from, Some(RowId::new(0, 1)));
        assert_eq!(outcome.to, None);
        assert!(nav.active_field().is_none());
        assert_eq!(
            log.borrow().as_slice(),
            &[(Direction::Done, Some("0:1".to_owned()))]
        );
    }

    #[test]
    fn done_clears_ambiguous_focus() {
        let mut nav = navigator(&[(0, 0), (0, 1)]);
        focus(&mut nav, 0, 0);
        focus(&mut nav, 0, 1);

        let outcome = nav.done_button_tapped();
        assert_eq!(outcome.from, None);
        assert!(nav.registry().iter().all(|(_, f)| !f.is_active()));
    }

    #[test]
    fn registry_edits_keep_direction() {
        let rows: Vec<usize> = vec![2];
        let mut nav = navigator(&[(0, 0)]);
        nav.previous_button_tapped(&rows);
        nav.register_field(RowId::new(0, 1), TextField::new("x"));
        nav.row_inserted(RowId::new(0, 0));
        nav.clear_all();
        assert_eq!(nav.direction(), Some(Direction::Previous));
    }

    #[test]
    fn traversal_follows_live_row_changes() {
        let mut rows: Vec<usize> = vec![2, 0, 1];
        let mut nav = navigator(&[(0, 0), (2, 0)]);
        focus(&mut nav, 0, 0);

        // An item row appears in the empty section and realizes a field.
        rows[1] = 1;
        nav.register_field(RowId::new(1, 0), TextField::new("item"));
        let outcome = nav.next_button_tapped(&rows);
        assert_eq!(outcome.to, Some(RowId::new(1, 0)));

        // It is deleted again before the next tap.
        rows[1] = 0;
        nav.row_deleted(RowId::new(1, 0));
        focus(&mut nav, 0, 0);
        let outcome = nav.next_button_tapped(&rows);
        assert_eq!(outcome.to, Some(RowId::new(2, 0)));
    }

    #[test]
    fn struct_handler_receives_each_direction() {
        #[derive(Default)]
        struct Counter {
            counts: Rc<RefCell<[usize; 3]>>,
        }

        impl NavigationHandler<TextField> for Counter {
            fn on_previous(&mut self, _: Option<&TextField>) {
                self.counts.borrow_mut()[0] += 1;
            }

            fn on_next(&mut self, _: Option<&TextField>) {
                self.counts.borrow_mut()[1] += 1;
            }

            fn on_done(&mut self, _: Option<&TextField>) {
                self.counts.borrow_mut()[2] += 1;
            }
        }

        let counter = Counter::default();
        let counts = Rc::clone(&counter.counts);
        let rows: Vec<usize> = vec![1];
        let mut nav = navigator(&[(0, 0)]).with_handler(counter);
        nav.previous_button_tapped(&rows);
        nav.next_button_tapped(&rows);
        nav.next_button_tapped(&rows);
        nav.done_button_tapped();
        assert_eq!(*counts.borrow(), [1, 2, 1]);

        nav.clear_handler();
        nav.done_button_tapped();
        assert_eq!(*counts.borrow(), [1, 2, 1]);
    }

    /// Field whose focus flag is shared, so a handler can observe it.
    #[derive(Debug, Clone, Default)]
    struct SharedFocus(Rc<Cell<bool>>);

    impl FieldHandle for SharedFocus {
        fn is_active(&self) -> bool {
            self.0.get()
        }

        fn activate(&mut self) {
            self.0.set(true);
        }

        fn deactivate(&mut self) {
            self.0.set(false);
        }
    }

    #[test]
    fn handler_sees_focus_already_moved() {
        let rows: Vec<usize> = vec![2];
        let first = SharedFocus::default();
        let second = SharedFocus::default();
        let (first_flag, second_flag) = (Rc::clone(&first.0), Rc::clone(&second.0));
        let seen: Rc<RefCell<Vec<(Direction, Option<bool>, bool, bool)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut nav = FieldNavigator::new();
        nav.register_field(RowId::new(0, 0), first);
        nav.register_field(RowId::new(0, 1), second);
        nav.set_handler(move |direction: Direction, lost: Option<&SharedFocus>| {
            sink.borrow_mut().push((
                direction,
                lost.map(|field| field.is_active()),
                first_flag.get(),
                second_flag.get(),
            ));
        });

        nav.registry_mut()
            .get_mut(RowId::new(0, 0))
            .expect("registered")
            .activate();
        nav.next_button_tapped(&rows);
        nav.previous_button_tapped(&rows);
        nav.done_button_tapped();

        assert_eq!(
            seen.borrow().as_slice(),
            &[
                (Direction::Next, Some(false), false, true),
                (Direction::Previous, Some(false), true, false),
                (Direction::Done, Some(false), false, false),
            ]
        );
    }

    // --- Enablement / completeness ---

    #[test]
    fn can_go_reflects_boundaries() {
        let rows: Vec<usize> = vec![3, 2];
        let mut nav = navigator(&[(0, 0), (0, 2), (1, 1)]);
        assert!(!nav.can_go_next(&rows));
        focus(&mut nav, 0, 0);
        assert!(nav.can_go_next(&rows));
        assert!(!nav.can_go_previous(&rows));
    }

    #[test]
    fn all_fields_filled_requires_every_value() {
        let mut nav = navigator(&[]);
        assert!(!nav.all_fields_filled());

        nav.register_field(RowId::new(0, 0), TextField::with_value("Name", "Ada"));
        nav.register_field(RowId::new(0, 1), TextField::new("Category"));
        assert!(!nav.all_fields_filled());

        nav.registry_mut()
            .get_mut(RowId::new(0, 1))
            .expect("registered")
            .set_value("Tools");
        assert!(nav.all_fields_filled());
    }
}
