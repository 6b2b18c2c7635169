//! Session discovery and project naming
//!
//! Transcripts live one directory below the projects root. Project identity
//! comes from each transcript's recorded working directory, not from the
//! directory names on disk; [`project_labels`] shortens those directories to
//! unambiguous display names for the destination tree.

pub mod labels;
pub mod sessions;

pub use labels::project_labels;
pub use sessions::discover_sessions;
