//! Session export pipeline
//!
//! `session` turns one transcript into one output file; `batch` layers
//! discovery, project disambiguation, and manifest bookkeeping over it for
//! the sync commands.

pub mod batch;
pub mod session;

pub use batch::{export_current, sync_all, sync_status, StatusSummary, SyncSummary};
pub use session::{export_session, output_filename, ExportFormat, ExportOptions, ExportOutcome};
