//! Markdown rendering of session transcripts
//!
//! - `markdown` - the streaming state machine over transcript records
//! - `tool_views` - per-tool input formatting and result blocks
//! - `subagents` - grouped sub-agent sections appended after the conversation

pub mod markdown;
pub mod subagents;
pub mod tool_views;

pub use markdown::render_transcript;
pub use subagents::render_subagent_sections;
pub use tool_views::{render_tool_input, render_tool_result};
