use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::models::{SessionMetadata, TranscriptRecord};

/// Parse a single JSONL line into a transcript record.
///
/// Returns `None` for anything that is not a JSON object matching the
/// lenient record shape; callers skip such lines and keep going. An export
/// must never fail because one line is malformed.
pub fn parse_line(line: &str) -> Option<TranscriptRecord> {
    serde_json::from_str(line).ok()
}

/// Scan a transcript for session metadata (first pass).
///
/// Streams the file and returns the identity fields of the first record
/// with `type == "user"` and a user-role message. Later records may carry
/// different values (for example after a directory change mid-session);
/// the first record wins.
///
/// # Returns
///
/// `None` when the file is missing or unreadable, when a read fails
/// mid-stream, or when no qualifying record exists.
pub fn scan_metadata(jsonl_path: &Path) -> Option<SessionMetadata> {
    let file = File::open(jsonl_path).ok()?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let Ok(line) = line else {
            return None;
        };
        let Some(record) = parse_line(&line) else {
            continue;
        };

        let is_user_record = record.record_type.as_deref() == Some("user")
            && record.message.as_ref().and_then(|m| m.role.as_deref()) == Some("user");
        if is_user_record {
            return Some(SessionMetadata {
                session_id: record.session_id,
                cwd: record.cwd,
                version: record.version,
                git_branch: record.git_branch,
                timestamp: record.timestamp,
            });
        }
    }

    None
}
