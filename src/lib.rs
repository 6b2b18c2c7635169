//! Claude Session Sync - Export Claude Code session transcripts
//!
//! This library turns the JSONL transcripts Claude Code keeps under
//! `~/.claude/projects/` into readable markdown (or raw copies). It supports:
//!
//! - Lenient streaming parsing of transcript lines (malformed lines are
//!   skipped, never fatal)
//! - Markdown rendering with tool-call pairing, collapsible results, and
//!   optional sub-agent sections
//! - Session discovery with disambiguated per-project output directories
//! - An mtime-based manifest so repeated syncs only export what changed
//!
//! # Example
//!
//! ```no_run
//! use claude_session_sync::exporter::{export_session, ExportOptions};
//! use claude_session_sync::manifest::{load_manifest, save_manifest};
//! use std::path::Path;
//!
//! let dest = Path::new("/Users/alice/notes/sessions");
//! let mut manifest = load_manifest(dest);
//! let transcript = Path::new("/Users/alice/.claude/projects/-p/abc.jsonl");
//! export_session(transcript, dest, "my-project", &mut manifest, &ExportOptions::default())?;
//! save_manifest(dest, &mut manifest)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod discovery;
pub mod exporter;
pub mod manifest;
pub mod models;
pub mod parsers;
pub mod renderer;
pub mod utils;

// Re-export commonly used types
pub use exporter::{export_session, ExportFormat, ExportOptions, ExportOutcome};
pub use manifest::{load_manifest, save_manifest, Manifest};
pub use models::{SessionMetadata, TranscriptRecord};
pub use parsers::{parse_line, scan_metadata};
pub use renderer::render_transcript;
