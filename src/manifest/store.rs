//! Manifest persistence and staleness checks

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::manifest::schema::{Manifest, MANIFEST_FILENAME};

/// Load the manifest from the destination directory.
///
/// Missing or unreadable manifests yield a fresh default so a sync can always
/// proceed. A corrupt manifest means every session re-exports once.
pub fn load_manifest(dest_dir: &Path) -> Manifest {
    let path = dest_dir.join(MANIFEST_FILENAME);
    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => Manifest::default(),
    }
}

/// Save the manifest to the destination directory, stamping `last_sync`.
///
/// Writes to a temporary sibling and renames over the target so a crash
/// mid-write cannot leave a truncated manifest behind.
pub fn save_manifest(dest_dir: &Path, manifest: &mut Manifest) -> Result<()> {
    manifest.last_sync = Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());

    let mut contents =
        serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    contents.push('\n');

    let path = dest_dir.join(MANIFEST_FILENAME);
    let tmp_path = dest_dir.join(format!("{MANIFEST_FILENAME}.tmp"));
    fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write manifest to {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &path)
        .with_context(|| format!("Failed to replace manifest at {}", path.display()))?;
    Ok(())
}

/// Check whether a session transcript needs exporting.
///
/// Returns true when forced, when the manifest has no entry for the path, or
/// when the source file's mtime differs from the recorded one. A file whose
/// mtime cannot be read also counts as needing sync.
pub fn needs_sync(manifest: &Manifest, jsonl_path: &Path, force: bool) -> bool {
    if force {
        return true;
    }
    let Some(entry) = manifest.sessions.get(&path_key(jsonl_path)) else {
        return true;
    };
    match file_mtime(jsonl_path) {
        Some(mtime) => mtime != entry.source_mtime,
        None => true,
    }
}

/// File modification time as seconds since the Unix epoch.
pub fn file_mtime(path: &Path) -> Option<f64> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let elapsed = modified.duration_since(UNIX_EPOCH).ok()?;
    Some(elapsed.as_secs_f64())
}

/// Manifest key for a transcript path.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
