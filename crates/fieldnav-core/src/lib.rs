#![forbid(unsafe_code)]

//! Core: row coordinates, list shape providers, and logging.

pub mod logging;
pub mod row_id;
pub mod rows;

pub use row_id::RowId;
pub use rows::{RowCountProvider, RowError, SectionedRows, SignedRowCounts};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
