#![forbid(unsafe_code)]

//! The Prev / Next / Done accessory bar as a toolkit-independent model.
//!
//! A [`Toolbar`] knows its item layout, the label of each button, and whether
//! a button is enabled. Taps are forwarded to a [`FieldNavigator`]. Rendering
//! is left to the presentation layer.
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `FIELDNAV_PREV_LABEL` | Label of the Previous button |
//! | `FIELDNAV_NEXT_LABEL` | Label of the Next button |
//! | `FIELDNAV_DONE_LABEL` | Label of the Done button |
//! | `FIELDNAV_DISABLE_AT_BOUNDARIES` | `1/true/yes/on` or `0/false/no/off` |
//!
//! Empty labels and unrecognized booleans are ignored.

use fieldnav_core::RowCountProvider;

use crate::field::FieldHandle;
use crate::navigator::{FieldNavigator, NavOutcome};

const ENV_PREV_LABEL: &str = "FIELDNAV_PREV_LABEL";
const ENV_NEXT_LABEL: &str = "FIELDNAV_NEXT_LABEL";
const ENV_DONE_LABEL: &str = "FIELDNAV_DONE_LABEL";
const ENV_DISABLE_AT_BOUNDARIES: &str = "FIELDNAV_DISABLE_AT_BOUNDARIES";

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarButton {
    Previous,
    Next,
    Done,
}

/// One slot in the toolbar layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Button(ToolbarButton),
    /// Stretches to push the following items to the trailing edge.
    FlexibleSpace,
}

const ITEMS: [ToolbarItem; 4] = [
    ToolbarItem::Button(ToolbarButton::Previous),
    ToolbarItem::Button(ToolbarButton::Next),
    ToolbarItem::FlexibleSpace,
    ToolbarItem::Button(ToolbarButton::Done),
];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Toolbar labels and behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarConfig {
    /// Label of the Previous button.
    pub previous_label: String,
    /// Label of the Next button.
    pub next_label: String,
    /// Label of the Done button.
    pub done_label: String,
    /// Report Previous/Next as disabled when they would not move focus.
    /// Default: false (buttons stay enabled and resign at the ends).
    pub disable_at_boundaries: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            previous_label: "Prev".to_owned(),
            next_label: "Next".to_owned(),
            done_label: "Done".to_owned(),
            disable_at_boundaries: false,
        }
    }
}

impl ToolbarConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(label) = env_label(&get_env, ENV_PREV_LABEL) {
            config.previous_label = label;
        }
        if let Some(label) = env_label(&get_env, ENV_NEXT_LABEL) {
            config.next_label = label;
        }
        if let Some(label) = env_label(&get_env, ENV_DONE_LABEL) {
            config.done_label = label;
        }
        if let Some(value) = env_override_bool(&get_env, ENV_DISABLE_AT_BOUNDARIES) {
            config.disable_at_boundaries = value;
        }
        config
    }

    /// Set the Previous label.
    #[must_use]
    pub fn previous_label(mut self, label: impl Into<String>) -> Self {
        self.previous_label = label.into();
        self
    }

    /// Set the Next label.
    #[must_use]
    pub fn next_label(mut self, label: impl Into<String>) -> Self {
        self.next_label = label.into();
        self
    }

    /// Set the Done label.
    #[must_use]
    pub fn done_label(mut self, label: impl Into<String>) -> Self {
        self.done_label = label.into();
        self
    }

    /// Set whether Previous/Next disable at the ends.
    #[must_use]
    pub fn disable_at_boundaries(mut self, disable: bool) -> Self {
        self.disable_at_boundaries = disable;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_override_bool<F>(get_env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| parse_bool(&value))
}

fn env_label<F>(get_env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

// ---------------------------------------------------------------------------
// Toolbar
// ---------------------------------------------------------------------------

/// Prev / Next / Done accessory bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolbar {
    config: ToolbarConfig,
}

impl Toolbar {
    /// Toolbar with the given configuration.
    #[must_use]
    pub fn new(config: ToolbarConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    /// Items in layout order: Previous, Next, flexible space, Done.
    #[must_use]
    pub fn items(&self) -> &'static [ToolbarItem] {
        &ITEMS
    }

    /// Label shown on `button`.
    #[must_use]
    pub fn label(&self, button: ToolbarButton) -> &str {
        match button {
            ToolbarButton::Previous => &self.config.previous_label,
            ToolbarButton::Next => &self.config.next_label,
            ToolbarButton::Done => &self.config.done_label,
        }
    }

    /// Whether `button` should accept taps for the current focus state.
    pub fn is_enabled<H, R>(
        &self,
        button: ToolbarButton,
        navigator: &FieldNavigator<H>,
        rows: &R,
    ) -> bool
    where
        H: FieldHandle,
        R: RowCountProvider + ?Sized,
    {
        if !self.config.disable_at_boundaries {
            return true;
        }
        match button {
            ToolbarButton::Previous => navigator.can_go_previous(rows),
            ToolbarButton::Next => navigator.can_go_next(rows),
            ToolbarButton::Done => true,
        }
    }

    /// Forward a tap on `button` to the navigator.
    pub fn tap<H, R>(
        &self,
        button: ToolbarButton,
        navigator: &mut FieldNavigator<H>,
        rows: &R,
    ) -> NavOutcome
    where
        H: FieldHandle,
        R: RowCountProvider + ?Sized,
    {
        match button {
            ToolbarButton::Previous => navigator.previous_button_tapped(rows),
            ToolbarButton::Next => navigator.next_button_tapped(rows),
            ToolbarButton::Done => navigator.done_button_tapped(),
        }
    }
}
