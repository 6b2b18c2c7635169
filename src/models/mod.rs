//! Data models for Claude Code session transcripts.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`TranscriptRecord`] - One JSONL line of a session transcript
//! - [`MessageContent`] / [`ContentBlock`] - The polymorphic message content shapes
//! - [`ProgressData`] - Sub-agent activity carried by `progress` records
//! - [`SessionMetadata`] - Identity fields captured from the first user record
//!
//! All transcript-facing types deserialize leniently: fields are optional,
//! unknown fields are ignored, and unrecognized content blocks collapse to a
//! catch-all variant instead of failing the whole line.

pub mod session;
pub mod transcript;

pub use session::SessionMetadata;
pub use transcript::{
    ContentBlock, ContentItem, MessageContent, MessageEnvelope, ProgressData, SubagentRecord,
    ToolResultContent, TranscriptRecord,
};
