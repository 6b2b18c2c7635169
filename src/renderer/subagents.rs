//! Sub-agent activity rendering
//!
//! Progress records collected during the main pass are grouped by agent id
//! (first-seen order) and appended after the conversation as one collapsible
//! section per agent.

use std::io::Write;

use anyhow::Result;

use crate::models::{ContentBlock, ContentItem, MessageContent, MessageEnvelope, ProgressData};
use crate::utils::truncate_chars;

struct AgentGroup<'a> {
    agent_id: &'a str,
    prompt: &'a str,
    turns: Vec<&'a MessageEnvelope>,
}

/// Append one section per sub-agent, in the order agents first appeared.
///
/// The first event's prompt captions the section; events without a nested
/// message still register the agent but contribute no turns.
pub fn render_subagent_sections<W: Write>(out: &mut W, events: &[ProgressData]) -> Result<()> {
    let mut groups: Vec<AgentGroup<'_>> = Vec::new();
    for event in events {
        let agent_id = event.agent_id.as_deref().unwrap_or("unknown");
        let index = match groups.iter().position(|group| group.agent_id == agent_id) {
            Some(index) => index,
            None => {
                groups.push(AgentGroup {
                    agent_id,
                    prompt: event.prompt.as_deref().unwrap_or(""),
                    turns: Vec::new(),
                });
                groups.len() - 1
            }
        };
        if let Some(envelope) = event.message.as_ref().and_then(|record| record.message.as_ref()) {
            groups[index].turns.push(envelope);
        }
    }

    for group in &groups {
        let caption = if group.prompt.is_empty() {
            group.agent_id
        } else {
            truncate_chars(group.prompt, 80)
        };
        write!(out, "## Subagent: {caption}\n\n")?;
        write!(out, "<details><summary>Agent {}</summary>\n\n", truncate_chars(group.agent_id, 12))?;
        for turn in &group.turns {
            render_turn(turn, out)?;
        }
        out.write_all(b"</details>\n\n---\n\n")?;
    }
    Ok(())
}

fn render_turn<W: Write>(envelope: &MessageEnvelope, out: &mut W) -> Result<()> {
    match envelope.role.as_deref().unwrap_or("") {
        "user" => {
            if let Some(content) = envelope.content.as_ref() {
                let text = content.user_text();
                let text = text.trim();
                if !text.is_empty() {
                    write!(out, "**User:** {text}\n\n")?;
                }
            }
        }
        "assistant" => {
            let Some(MessageContent::Items(items)) = envelope.content.as_ref() else {
                return Ok(());
            };
            for item in items {
                let ContentItem::Block(block) = item else {
                    continue;
                };
                match block {
                    ContentBlock::Text { text } => write!(out, "**Assistant:** {text}\n\n")?,
                    ContentBlock::ToolUse { name, .. } => {
                        write!(out, "**Tool:** {}\n\n", name.as_deref().unwrap_or_default())?;
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
    Ok(())
}
