#![forbid(unsafe_code)]

//! Previous / Next / Done navigation between input fields in a sectioned list.
//!
//! Fields are registered by the row that holds them. A tap on Previous or
//! Next searches the live list shape for the nearest row that has a
//! registered field, moves focus there, and notifies the presentation layer.

pub mod field;
pub mod navigator;
pub mod registry;
pub mod toolbar;
pub mod traversal;

pub use field::{FieldContents, FieldHandle, TextField};
pub use navigator::{Direction, FieldNavigator, NavOutcome, NavigationHandler};
pub use registry::Registry;
pub use toolbar::{Toolbar, ToolbarButton, ToolbarConfig, ToolbarItem};

pub use fieldnav_core::{RowCountProvider, RowError, RowId, SectionedRows, SignedRowCounts};
