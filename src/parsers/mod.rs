//! Lenient parsers for session transcript files
//!
//! # Error Handling Strategy
//!
//! Exports must never fail because a transcript contains lines the current
//! schema does not know about:
//!
//! - **Individual line failures**: lines that are not valid JSON, or whose
//!   nested shapes do not match the record model, yield `None` from
//!   [`parse_line`] and are silently skipped by every caller.
//!
//! - **Whole-file failures**: [`scan_metadata`] treats an unreadable file the
//!   same as a file with no user record and returns `None`; the caller
//!   decides whether that is an error (single export) or a skip (batch sync).
//!
//! - **Error propagation**: everything downstream of parsing uses
//!   `anyhow::Result` with context; the parsing layer itself never errors.

pub mod transcript;

pub use transcript::{parse_line, scan_metadata};
