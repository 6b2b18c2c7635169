use std::path::Path;

use crate::utils::truncate_chars;

/// Session identity captured from the first user record of a transcript.
///
/// Every field is optional: old or truncated transcripts may omit any of
/// them, and exports still proceed with `unknown` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMetadata {
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    pub git_branch: Option<String>,
    pub timestamp: Option<String>,
}

impl SessionMetadata {
    /// First eight characters of the session id, or `unknown`.
    pub fn short_id(&self) -> String {
        match self.session_id.as_deref() {
            Some(id) if !id.is_empty() => truncate_chars(id, 8).to_string(),
            _ => "unknown".to_string(),
        }
    }

    /// Date portion (`YYYY-MM-DD`) of the session timestamp, or `unknown`.
    pub fn date(&self) -> String {
        match self.timestamp.as_deref() {
            Some(ts) if !ts.is_empty() => truncate_chars(ts, 10).to_string(),
            _ => "unknown".to_string(),
        }
    }

    /// Final component of the recorded working directory, or `unknown`.
    pub fn project_name(&self) -> String {
        match self.cwd.as_deref() {
            Some(cwd) if !cwd.is_empty() => Path::new(cwd)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unknown".to_string()),
            _ => "unknown".to_string(),
        }
    }
}
