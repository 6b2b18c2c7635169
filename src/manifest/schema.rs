//! Manifest schema for tracking exported sessions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manifest schema version, bumped on format changes.
pub const MANIFEST_VERSION: u32 = 1;

/// Manifest filename at the destination root.
pub const MANIFEST_FILENAME: &str = ".claude-sync-manifest.json";

/// Sync manifest persisted at the destination root.
///
/// Maps absolute source transcript paths to their last exported state. The
/// ordered map keeps the serialized file stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    #[serde(default)]
    pub sessions: BTreeMap<String, ManifestEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

/// Per-session record of the last completed export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub session_id: String,
    pub project_name: String,
    /// Source file mtime at export time, seconds since the Unix epoch.
    pub source_mtime: f64,
    /// Output location relative to the destination root.
    pub exported_path: String,
    pub format: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self { version: MANIFEST_VERSION, sessions: BTreeMap::new(), last_sync: None }
    }
}
