#![forbid(unsafe_code)]

//! Capabilities the navigator needs from an editable field.
//!
//! The presentation layer owns its input elements. The navigator only stores
//! handles to them and asks three things: is this field focused, focus it,
//! release it.

/// Focus capability of an editable field.
pub trait FieldHandle {
    /// Whether the field currently holds input focus.
    fn is_active(&self) -> bool;

    /// Give the field input focus.
    fn activate(&mut self);

    /// Release input focus.
    fn deactivate(&mut self);
}

/// Content capability used by the completeness check.
pub trait FieldContents {
    /// Whether the field holds no text.
    fn is_empty(&self) -> bool;
}

impl<T: FieldHandle + ?Sized> FieldHandle for Box<T> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn activate(&mut self) {
        (**self).activate();
    }

    fn deactivate(&mut self) {
        (**self).deactivate();
    }
}

impl<T: FieldContents + ?Sized> FieldContents for Box<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// A headless single-line text field.
///
/// Useful as the handle type when driving the navigator without a UI
/// toolkit, and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    label: String,
    value: String,
    active: bool,
}

impl TextField {
    /// Create an empty, inactive field.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            active: false,
        }
    }

    /// Create a field with an initial value.
    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            active: false,
        }
    }

    /// Field label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the current text.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

impl FieldHandle for TextField {
    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl FieldContents for TextField {
    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
