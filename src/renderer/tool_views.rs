//! Markdown views for tool invocations and their results

use serde_json::{Map, Value};

use crate::models::{ContentBlock, ContentItem, ToolResultContent};
use crate::utils::truncate_chars;

/// Render a tool invocation's input for markdown.
///
/// Well-known tools get compact purpose-built views; anything else falls back
/// to a JSON dump capped at 500 characters. Non-object input renders as
/// nothing.
pub fn render_tool_input(tool_name: &str, input: &Value) -> String {
    let Some(fields) = input.as_object() else {
        return String::new();
    };

    match tool_name {
        "Bash" => {
            let command = str_field(fields, "command");
            let description = str_field(fields, "description");
            let mut lines = Vec::new();
            if !description.is_empty() {
                lines.push(format!("> {description}"));
                lines.push(String::new());
            }
            lines.push("```bash".to_string());
            lines.push(command.to_string());
            lines.push("```".to_string());
            lines.join("\n")
        }
        "Write" => {
            let path = str_field(fields, "file_path");
            let content = str_field(fields, "content");
            let mut preview = truncate_chars(content, 200).to_string();
            if content.chars().count() > 200 {
                preview.push_str(&format!("\n... ({} chars total)", content.chars().count()));
            }
            format!("> `{path}`\n\n```\n{preview}\n```")
        }
        "Edit" => {
            let path = str_field(fields, "file_path");
            let old = preview_inline(str_field(fields, "old_string"));
            let new = preview_inline(str_field(fields, "new_string"));
            format!("> `{path}`\n\nOld: `{old}`\nNew: `{new}`")
        }
        "Read" => {
            format!("> `{}`", str_field(fields, "file_path"))
        }
        "Glob" | "Grep" => {
            let pattern = str_field(fields, "pattern");
            let path = str_field(fields, "path");
            if path.is_empty() {
                format!("> Pattern: `{pattern}`")
            } else {
                format!("> Pattern: `{pattern}` in `{path}`")
            }
        }
        "Task" => {
            let description = str_field(fields, "description");
            let agent_type = str_field(fields, "subagent_type");
            format!("> {agent_type}: {description}")
        }
        _ => {
            let mut formatted =
                serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
            if formatted.chars().count() > 500 {
                formatted = format!("{}\n...", truncate_chars(&formatted, 500));
            }
            format!("```json\n{formatted}\n```")
        }
    }
}

/// Render a tool result as a collapsible details block.
///
/// Orphan results (no matching pending invocation) are labeled so a reader
/// can tell the pairing broke down.
pub fn render_tool_result(
    content: Option<&ToolResultContent>,
    is_error: bool,
    orphan: bool,
) -> String {
    let base = if is_error { "**Error**" } else { "Result" };
    let summary = if orphan { format!("{base} (orphan)") } else { base.to_string() };

    let text = match content {
        Some(ToolResultContent::Text(text)) => text.clone(),
        Some(ToolResultContent::Items(items)) => items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Block(ContentBlock::Text { text }) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(ToolResultContent::Other(value)) => {
            if value.is_null() {
                String::new()
            } else {
                value.to_string()
            }
        }
        None => String::new(),
    };

    format!("<details><summary>{summary}</summary>\n\n```\n{text}\n```\n\n</details>")
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Single-line preview capped at 100 characters with an ellipsis.
fn preview_inline(text: &str) -> String {
    if text.chars().count() > 100 {
        format!("{}...", truncate_chars(text, 100))
    } else {
        text.to_string()
    }
}
