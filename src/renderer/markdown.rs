//! Streaming markdown rendering of session transcripts
//!
//! A single pass over the JSONL stream drives a small state machine:
//!
//! - `tool_use` blocks register their id as pending
//! - `tool_result` blocks in user records resolve pending ids (or render
//!   with an orphan label when nothing matches)
//! - `progress` records are collected and rendered as sub-agent sections
//!   after the conversation
//!
//! Records the renderer does not understand produce no output. Rendering
//! only fails on I/O, never on transcript content.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{
    ContentBlock, ContentItem, MessageContent, ProgressData, TranscriptRecord,
};
use crate::parsers::{parse_line, scan_metadata};
use crate::renderer::subagents::render_subagent_sections;
use crate::renderer::tool_views::{render_tool_input, render_tool_result};
use crate::utils::truncate_chars;

/// Render a session transcript to markdown.
///
/// Streams the file line by line so memory use stays flat for large
/// sessions. Sub-agent activity is appended only when `include_subagents`
/// is set.
///
/// # Errors
///
/// Returns an error when the transcript cannot be read or the output cannot
/// be written. Malformed transcript lines are skipped, not errors.
pub fn render_transcript<W: Write>(
    jsonl_path: &Path,
    out: &mut W,
    include_subagents: bool,
) -> Result<()> {
    write_header(jsonl_path, out)?;

    let file = File::open(jsonl_path)
        .with_context(|| format!("Failed to open transcript: {}", jsonl_path.display()))?;
    let reader = BufReader::new(file);

    let mut pending_tool_ids: HashSet<String> = HashSet::new();
    let mut subagent_events: Vec<ProgressData> = Vec::new();

    for line in reader.lines() {
        let line = line
            .with_context(|| format!("Failed to read transcript: {}", jsonl_path.display()))?;
        let Some(record) = parse_line(&line) else {
            continue;
        };
        render_record(&record, out, include_subagents, &mut pending_tool_ids, &mut subagent_events)?;
    }

    if !subagent_events.is_empty() {
        render_subagent_sections(out, &subagent_events)?;
    }
    Ok(())
}

/// Write the session header from scanned metadata.
///
/// Transcripts without a recognizable first user record still get a header
/// so the output is self-describing.
fn write_header<W: Write>(jsonl_path: &Path, out: &mut W) -> Result<()> {
    let Some(meta) = scan_metadata(jsonl_path) else {
        out.write_all(b"# Session (no metadata)\n\n---\n\n")?;
        return Ok(());
    };

    write!(out, "# Session: {}\n\n", meta.short_id())?;
    writeln!(out, "- **Date:** {}", meta.date())?;
    writeln!(out, "- **Project:** {}", meta.project_name())?;
    writeln!(out, "- **Working Directory:** {}", meta.cwd.as_deref().unwrap_or("unknown"))?;
    if let Some(branch) = meta.git_branch.as_deref().filter(|value| !value.is_empty()) {
        writeln!(out, "- **Git Branch:** {branch}")?;
    }
    if let Some(version) = meta.version.as_deref().filter(|value| !value.is_empty()) {
        writeln!(out, "- **Claude Version:** {version}")?;
    }
    writeln!(out, "- **Session ID:** {}", meta.session_id.as_deref().unwrap_or("unknown"))?;
    out.write_all(b"\n---\n\n")?;
    Ok(())
}

fn render_record<W: Write>(
    record: &TranscriptRecord,
    out: &mut W,
    include_subagents: bool,
    pending_tool_ids: &mut HashSet<String>,
    subagent_events: &mut Vec<ProgressData>,
) -> Result<()> {
    let record_type = record.record_type.as_deref().unwrap_or("");
    let is_sidechain = record.is_sidechain.unwrap_or(false);

    match record_type {
        // Internal bookkeeping records, no conversational content
        "file-history-snapshot" | "hook_progress" => return Ok(()),
        "progress" => {
            if include_subagents {
                subagent_events.push(record.data.clone().unwrap_or_default());
            }
            return Ok(());
        }
        _ => {}
    }

    let envelope = record.message.as_ref();
    let role = envelope.and_then(|m| m.role.as_deref()).unwrap_or("");
    let content = envelope.and_then(|m| m.content.as_ref());

    if record_type == "system" {
        let subtype = record
            .subtype
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| envelope.and_then(|m| m.subtype.as_deref()));
        if subtype == Some("local_command") {
            return Ok(());
        }
        return render_system(content, out);
    }

    if record_type == "user" && role == "user" {
        return render_user(content, is_sidechain, out, pending_tool_ids);
    }

    // Some transcript versions omit the type on assistant records
    if record_type == "assistant" || (record_type.is_empty() && role == "assistant") {
        return render_assistant(content, is_sidechain, out, pending_tool_ids);
    }

    Ok(())
}

fn render_system<W: Write>(content: Option<&MessageContent>, out: &mut W) -> Result<()> {
    let text = match content {
        Some(MessageContent::Text(text)) => text.trim().to_string(),
        Some(MessageContent::Items(items)) => items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Block(ContentBlock::Text { text }) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        None => return Ok(()),
    };
    if text.is_empty() {
        return Ok(());
    }

    let truncated = if text.chars().count() > 500 {
        format!("{}...", truncate_chars(&text, 500))
    } else {
        text
    };

    out.write_all(b"## System\n\n")?;
    for line in truncated.split('\n') {
        writeln!(out, "> {line}")?;
    }
    out.write_all(b"\n---\n\n")?;
    Ok(())
}

fn render_user<W: Write>(
    content: Option<&MessageContent>,
    is_sidechain: bool,
    out: &mut W,
    pending_tool_ids: &mut HashSet<String>,
) -> Result<()> {
    let Some(content) = content else {
        return Ok(());
    };

    if content.is_tool_result_only() {
        let MessageContent::Items(items) = content else {
            return Ok(());
        };
        for item in items {
            let ContentItem::Block(ContentBlock::ToolResult { tool_use_id, content, is_error }) =
                item
            else {
                continue;
            };
            let orphan = !pending_tool_ids.remove(tool_use_id);
            let rendered = render_tool_result(content.as_ref(), is_error.unwrap_or(false), orphan);
            write!(out, "{rendered}\n\n")?;
        }
        return Ok(());
    }

    let text = content.user_text();
    let text = text.trim();
    if !text.is_empty() {
        let marker = if is_sidechain { " *(sidechain)*" } else { "" };
        write!(out, "## User{marker}\n\n{text}\n\n---\n\n")?;
    }
    Ok(())
}

fn render_assistant<W: Write>(
    content: Option<&MessageContent>,
    is_sidechain: bool,
    out: &mut W,
    pending_tool_ids: &mut HashSet<String>,
) -> Result<()> {
    let Some(MessageContent::Items(items)) = content else {
        return Ok(());
    };

    let marker = if is_sidechain { " *(sidechain)*" } else { "" };
    let mut wrote_header = false;

    for item in items {
        let ContentItem::Block(block) = item else {
            continue;
        };
        match block {
            ContentBlock::Thinking { thinking } => {
                write_section_header(out, marker, &mut wrote_header)?;
                write!(out, "<details><summary>Thinking</summary>\n\n{thinking}\n\n</details>\n\n")?;
            }
            ContentBlock::Text { text } => {
                let kept: Vec<&str> = text
                    .split('\n')
                    .filter(|line| !line.trim_start().starts_with("Co-Authored-By:"))
                    .collect();
                let cleaned = kept.join("\n");
                let cleaned = cleaned.trim();
                if !cleaned.is_empty() {
                    write_section_header(out, marker, &mut wrote_header)?;
                    write!(out, "{cleaned}\n\n")?;
                }
            }
            ContentBlock::ToolUse { id, name, input } => {
                write_section_header(out, marker, &mut wrote_header)?;
                let tool_name = name.as_deref().unwrap_or("Unknown");
                pending_tool_ids.insert(id.clone());
                write!(out, "### Tool: {tool_name}\n\n")?;
                let rendered_input = render_tool_input(tool_name, input);
                if !rendered_input.is_empty() {
                    write!(out, "{rendered_input}\n\n")?;
                }
            }
            _ => {}
        }
    }

    if wrote_header {
        out.write_all(b"---\n\n")?;
    }
    Ok(())
}

fn write_section_header<W: Write>(
    out: &mut W,
    marker: &str,
    wrote_header: &mut bool,
) -> Result<()> {
    if !*wrote_header {
        write!(out, "## Assistant{marker}\n\n")?;
        *wrote_header = true;
    }
    Ok(())
}
