//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use tempfile::TempDir;

/// Builder for a fake home directory holding Claude Code session transcripts
pub struct ClaudeHomeBuilder {
    temp_dir: TempDir,
}

impl ClaudeHomeBuilder {
    /// Create a home directory with an empty `.claude/projects` tree
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join(".claude/projects"))
            .expect("Failed to create projects dir");
        Self { temp_dir }
    }

    /// Path to use as `$HOME`
    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path to the projects root under this home
    pub fn projects_root(&self) -> PathBuf {
        self.temp_dir.path().join(".claude/projects")
    }

    /// Write a transcript under the given encoded project directory
    pub fn with_session(
        self,
        encoded_dir: &str,
        filename: &str,
        transcript: &TranscriptBuilder,
    ) -> Self {
        let dir = self.projects_root().join(encoded_dir);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join(filename), transcript.to_jsonl()).expect("Failed to write transcript");
        self
    }

    /// Absolute path of a previously written transcript
    pub fn session_path(&self, encoded_dir: &str, filename: &str) -> PathBuf {
        self.projects_root().join(encoded_dir).join(filename)
    }
}

impl Default for ClaudeHomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for session transcript JSONL content
///
/// Identity fields (session id, cwd, timestamp) ride on every user record,
/// matching how real transcripts repeat them per line.
pub struct TranscriptBuilder {
    session_id: String,
    cwd: String,
    timestamp: String,
    git_branch: Option<String>,
    version: Option<String>,
    lines: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new(session_id: &str, cwd: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            cwd: cwd.to_string(),
            timestamp: "2026-02-24T10:00:00Z".to_string(),
            git_branch: None,
            version: None,
            lines: Vec::new(),
        }
    }

    /// Set the timestamp stamped on subsequent user records
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn git_branch(mut self, branch: &str) -> Self {
        self.git_branch = Some(branch.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Append a user text record carrying the session identity fields
    pub fn user_text(mut self, text: &str) -> Self {
        let branch = self
            .git_branch
            .as_ref()
            .map(|value| format!(r#","gitBranch":"{value}""#))
            .unwrap_or_default();
        let version = self
            .version
            .as_ref()
            .map(|value| format!(r#","version":"{value}""#))
            .unwrap_or_default();
        self.lines.push(format!(
            r#"{{"type":"user","sessionId":"{}","cwd":"{}","timestamp":"{}"{branch}{version},"message":{{"role":"user","content":"{text}"}}}}"#,
            self.session_id, self.cwd, self.timestamp
        ));
        self
    }

    /// Append an assistant record with a raw JSON content array
    pub fn assistant_content(mut self, content_json: &str) -> Self {
        self.lines.push(format!(
            r#"{{"type":"assistant","message":{{"role":"assistant","content":{content_json}}}}}"#
        ));
        self
    }

    pub fn assistant_text(self, text: &str) -> Self {
        self.assistant_content(&format!(r#"[{{"type":"text","text":"{text}"}}]"#))
    }

    /// Append a user record carrying a single tool result
    pub fn tool_result(mut self, tool_use_id: &str, output: &str) -> Self {
        self.lines.push(format!(
            r#"{{"type":"user","message":{{"role":"user","content":[{{"type":"tool_result","tool_use_id":"{tool_use_id}","content":"{output}"}}]}}}}"#
        ));
        self
    }

    pub fn system(mut self, subtype: &str, text: &str) -> Self {
        self.lines.push(format!(
            r#"{{"type":"system","subtype":"{subtype}","message":{{"role":"system","content":"{text}"}}}}"#
        ));
        self
    }

    /// Append a progress record with a nested sub-agent message
    pub fn progress(mut self, agent_id: &str, prompt: &str, nested_message_json: &str) -> Self {
        self.lines.push(format!(
            r#"{{"type":"progress","data":{{"agentId":"{agent_id}","prompt":"{prompt}","message":{{"message":{nested_message_json}}}}}}}"#
        ));
        self
    }

    /// Append a raw line verbatim
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn to_jsonl(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

/// Overwrite a file's modification time
pub fn set_file_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).expect("Failed to open file");
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).expect("Failed to set mtime");
}
