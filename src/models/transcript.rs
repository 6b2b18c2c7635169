use serde::Deserialize;
use serde_json::Value;

/// A single line of a session transcript.
///
/// Transcript shapes vary across Claude Code versions, so every field is
/// optional and unknown fields are ignored. A line that fails to deserialize
/// is skipped by the parsing layer, never surfaced as an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscriptRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    pub git_branch: Option<String>,
    pub timestamp: Option<String>,
    pub is_sidechain: Option<bool>,
    pub subtype: Option<String>,
    pub message: Option<MessageEnvelope>,
    pub data: Option<ProgressData>,
}

/// The message payload of a user, assistant, or system record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageEnvelope {
    pub role: Option<String>,
    pub content: Option<MessageContent>,
    pub subtype: Option<String>,
}

/// Message content in any of its wire forms: a plain string, or a list
/// mixing literal strings with typed blocks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Items(Vec<ContentItem>),
}

/// One element of a content list.
///
/// Older transcripts store user text as lists of single-character strings,
/// and tool results arrive interleaved with them, so an element is either a
/// literal string or a typed block. Anything else is tolerated and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Literal(String),
    Block(ContentBlock),
    Other(Value),
}

/// A typed content block, dispatched on its `type` tag.
///
/// Unrecognized tags collapse to [`ContentBlock::Unknown`] so that new block
/// kinds never fail a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        name: Option<String>,
        #[serde(default = "empty_object")]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default)]
        content: Option<ToolResultContent>,
        #[serde(default)]
        is_error: Option<bool>,
    },
    #[serde(other)]
    Unknown,
}

/// Tool result content: a plain string, a list of blocks, or any other
/// JSON value (stringified at render time).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Items(Vec<ContentItem>),
    Other(Value),
}

/// Payload of a `progress` record carrying sub-agent activity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressData {
    pub agent_id: Option<String>,
    pub prompt: Option<String>,
    pub message: Option<SubagentRecord>,
}

/// The nested record inside a progress payload; its own `message` field
/// holds the sub-agent's conversational turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubagentRecord {
    pub message: Option<MessageEnvelope>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl MessageContent {
    /// Collect the user-authored text from message content.
    ///
    /// String content is returned as-is; in list content the literal string
    /// elements are concatenated (this reassembles char-list transcripts)
    /// and blocks contribute nothing.
    pub fn user_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Items(items) => items
                .iter()
                .filter_map(|item| match item {
                    ContentItem::Literal(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// True when the content carries tool results and no user text.
    ///
    /// An empty list counts as result-only; a single literal string element
    /// disqualifies; block kinds other than `tool_result` are ignored.
    pub fn is_tool_result_only(&self) -> bool {
        match self {
            MessageContent::Text(_) => false,
            MessageContent::Items(items) => {
                if items.is_empty() {
                    return true;
                }
                let mut has_tool_result = false;
                for item in items {
                    match item {
                        ContentItem::Literal(_) => return false,
                        ContentItem::Block(ContentBlock::ToolResult { .. }) => {
                            has_tool_result = true;
                        }
                        _ => {}
                    }
                }
                has_tool_result
            }
        }
    }
}
