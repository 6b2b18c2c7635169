//! Batch operations over discovered sessions

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::discovery::{discover_sessions, project_labels};
use crate::exporter::session::{export_session, ExportFormat, ExportOptions, ExportOutcome};
use crate::manifest::{file_mtime, load_manifest, path_key, save_manifest, Manifest};
use crate::models::SessionMetadata;
use crate::parsers::scan_metadata;

/// Counts reported by [`sync_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub discovered: usize,
    pub exported: usize,
    pub up_to_date: usize,
    pub errors: usize,
}

/// Counts reported by [`sync_status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub synced: usize,
    pub unsynced: usize,
    pub modified: usize,
}

/// Export every discovered session that changed since its last export.
///
/// Sessions whose metadata or working directory cannot be read are left out
/// of the run entirely. A failure on one session is reported to stderr and
/// counted, never aborts the rest. The manifest is saved once at the end.
pub fn sync_all(
    projects_root: &Path,
    dest_dir: &Path,
    project_filter: Option<&str>,
    options: &ExportOptions,
) -> Result<SyncSummary> {
    let sessions = discover_sessions(projects_root, project_filter);
    let mut summary = SyncSummary { discovered: sessions.len(), ..Default::default() };
    if sessions.is_empty() {
        return Ok(summary);
    }

    let mut manifest = load_manifest(dest_dir);

    // One metadata pass up front so all sessions share a disambiguation map
    let scanned: Vec<(PathBuf, SessionMetadata)> = sessions
        .into_iter()
        .filter_map(|path| {
            let meta = scan_metadata(&path)?;
            meta.cwd.as_deref().filter(|cwd| !cwd.is_empty())?;
            Some((path, meta))
        })
        .collect();

    let cwds: Vec<String> = scanned.iter().filter_map(|(_, meta)| meta.cwd.clone()).collect();
    let labels = project_labels(&cwds);

    for (jsonl_path, meta) in &scanned {
        let project_name = meta
            .cwd
            .as_deref()
            .and_then(|cwd| labels.get(cwd).cloned())
            .unwrap_or_else(|| meta.project_name());

        match export_session(jsonl_path, dest_dir, &project_name, &mut manifest, options) {
            Ok(ExportOutcome::Exported { .. }) => summary.exported += 1,
            Ok(_) => summary.up_to_date += 1,
            Err(err) => {
                eprintln!("Error exporting {}: {:#}", jsonl_path.display(), err);
                summary.errors += 1;
            }
        }
    }

    save_manifest(dest_dir, &mut manifest)?;
    Ok(summary)
}

/// Compare discovered sessions against the manifest without writing anything.
///
/// With no destination there is no manifest, so every session counts as
/// unsynced.
pub fn sync_status(
    projects_root: &Path,
    dest_dir: Option<&Path>,
    project_filter: Option<&str>,
) -> StatusSummary {
    let sessions = discover_sessions(projects_root, project_filter);
    let manifest = match dest_dir {
        Some(dir) => load_manifest(dir),
        None => Manifest::default(),
    };

    let mut summary = StatusSummary::default();
    for jsonl_path in &sessions {
        match manifest.sessions.get(&path_key(jsonl_path)) {
            None => summary.unsynced += 1,
            Some(entry) => match file_mtime(jsonl_path) {
                None => summary.unsynced += 1,
                Some(mtime) if mtime != entry.source_mtime => summary.modified += 1,
                Some(_) => summary.synced += 1,
            },
        }
    }
    summary.total = summary.synced + summary.unsynced + summary.modified;
    summary
}

/// Export the most recently modified session recorded for `project_dir`.
///
/// Matches on exact working-directory equality and always re-exports.
/// Returns the exported path relative to the destination root.
///
/// # Errors
///
/// Fails when no session matches the project directory or the export cannot
/// be written.
pub fn export_current(
    projects_root: &Path,
    dest_dir: &Path,
    project_dir: &Path,
    format: ExportFormat,
    include_subagents: bool,
) -> Result<String> {
    let wanted = project_dir.to_string_lossy();
    let mut candidates: Vec<(f64, PathBuf, SessionMetadata)> = Vec::new();
    for jsonl_path in discover_sessions(projects_root, None) {
        let Some(meta) = scan_metadata(&jsonl_path) else {
            continue;
        };
        if meta.cwd.as_deref() != Some(wanted.as_ref()) {
            continue;
        }
        let Some(mtime) = file_mtime(&jsonl_path) else {
            continue;
        };
        candidates.push((mtime, jsonl_path, meta));
    }

    if candidates.is_empty() {
        bail!("No sessions found for project directory: {}", project_dir.display());
    }

    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    let (_, jsonl_path, meta) = &candidates[0];

    let mut manifest = load_manifest(dest_dir);
    let project_name = meta.project_name();
    let options = ExportOptions { format, force: true, include_subagents };

    match export_session(jsonl_path, dest_dir, &project_name, &mut manifest, &options)? {
        ExportOutcome::Exported { relative_path } => {
            save_manifest(dest_dir, &mut manifest)?;
            Ok(relative_path)
        }
        _ => bail!("Export failed."),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::time::{Duration, UNIX_EPOCH};

    use tempfile::TempDir;

    use super::*;

    fn write_session(root: &Path, dir: &str, name: &str, session_id: &str, cwd: &str) -> PathBuf {
        let project_dir = root.join(dir);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        let path = project_dir.join(name);
        let record = format!(
            r#"{{"type":"user","sessionId":"{session_id}","cwd":"{cwd}","timestamp":"2026-02-24T10:00:00Z","message":{{"role":"user","content":"hi"}}}}"#
        );
        fs::write(&path, format!("{record}\n")).expect("Failed to write session");
        path
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).expect("Failed to open file");
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).expect("Failed to set mtime");
    }

    #[test]
    fn test_sync_all_exports_then_reports_up_to_date() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");
        write_session(&root, "-home-u-beta", "b1.jsonl", "bbbb2222", "/home/u/beta");

        let summary = sync_all(&root, &dest, None, &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.exported, 2);
        assert_eq!(summary.up_to_date, 0);
        assert_eq!(summary.errors, 0);

        assert!(dest.join("alpha/2026-02-24_aaaa1111.md").exists());
        assert!(dest.join("beta/2026-02-24_bbbb2222.md").exists());

        let summary = sync_all(&root, &dest, None, &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.up_to_date, 2);
    }

    #[test]
    fn test_sync_all_disambiguates_identical_leaves() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-x-api", "x.jsonl", "xxxx1111", "/home/u/x/api");
        write_session(&root, "-home-u-y-api", "y.jsonl", "yyyy2222", "/home/u/y/api");

        let summary = sync_all(&root, &dest, None, &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.exported, 2);
        assert!(dest.join("x/api/2026-02-24_xxxx1111.md").exists());
        assert!(dest.join("y/api/2026-02-24_yyyy2222.md").exists());
    }

    #[test]
    fn test_sync_all_excludes_sessions_without_metadata() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");
        let orphan_dir = root.join("-home-u-beta");
        fs::create_dir_all(&orphan_dir).expect("Failed to create project dir");
        fs::write(orphan_dir.join("junk.jsonl"), "{}\n").expect("Failed to write session");

        let summary = sync_all(&root, &dest, None, &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.up_to_date, 0);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn test_sync_all_empty_root_saves_nothing() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        fs::create_dir_all(&dest).expect("Failed to create dest");

        let summary = sync_all(&root, &dest, None, &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.discovered, 0);
        assert!(!dest.join(crate::manifest::MANIFEST_FILENAME).exists());
    }

    #[test]
    fn test_sync_all_applies_project_filter() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");
        write_session(&root, "-home-u-beta", "b1.jsonl", "bbbb2222", "/home/u/beta");

        let summary = sync_all(&root, &dest, Some("/home/u/alpha"), &ExportOptions::default())
            .expect("Failed to sync");
        assert_eq!(summary.discovered, 1);
        assert_eq!(summary.exported, 1);
        assert!(!dest.join("beta").exists());
    }

    #[test]
    fn test_status_counts_synced_unsynced_modified() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");
        sync_all(&root, &dest, None, &ExportOptions::default()).expect("Failed to sync");

        write_session(&root, "-home-u-beta", "b1.jsonl", "bbbb2222", "/home/u/beta");
        let modified =
            write_session(&root, "-home-u-gamma", "c1.jsonl", "cccc3333", "/home/u/gamma");
        sync_all(&root, &dest, None, &ExportOptions::default()).expect("Failed to sync");
        set_mtime(&modified, 1_700_000_000);

        let summary = sync_status(&root, Some(&dest), None);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.synced, 2);
        assert_eq!(summary.unsynced, 0);
        assert_eq!(summary.modified, 1);
    }

    #[test]
    fn test_status_without_dest_everything_unsynced() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");

        let summary = sync_status(&root, None, None);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.unsynced, 1);
        assert_eq!(summary.synced, 0);
    }

    #[test]
    fn test_export_current_picks_most_recent_match() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        let older =
            write_session(&root, "-home-u-alpha", "old.jsonl", "old11111", "/home/u/alpha");
        let newer =
            write_session(&root, "-home-u-alpha", "new.jsonl", "new22222", "/home/u/alpha");
        write_session(&root, "-home-u-beta", "other.jsonl", "beta3333", "/home/u/beta");
        set_mtime(&older, 1_000_000);
        set_mtime(&newer, 2_000_000);

        let relative_path = export_current(
            &root,
            &dest,
            Path::new("/home/u/alpha"),
            ExportFormat::Markdown,
            false,
        )
        .expect("Failed to export");

        assert_eq!(relative_path, "alpha/2026-02-24_new22222.md");
        assert!(dest.join(&relative_path).exists());
        assert!(!dest.join("beta").exists());
    }

    #[test]
    fn test_export_current_requires_exact_cwd_match() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha/nested");

        let err = export_current(
            &root,
            &dest,
            Path::new("/home/u/alpha"),
            ExportFormat::Markdown,
            false,
        )
        .expect_err("Expected no match");
        assert!(err
            .to_string()
            .contains("No sessions found for project directory: /home/u/alpha"));
    }

    #[test]
    fn test_export_current_always_re_exports() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("projects");
        let dest = temp.path().join("dest");
        write_session(&root, "-home-u-alpha", "a1.jsonl", "aaaa1111", "/home/u/alpha");

        let first =
            export_current(&root, &dest, Path::new("/home/u/alpha"), ExportFormat::Raw, false)
                .expect("Failed to export");
        let second =
            export_current(&root, &dest, Path::new("/home/u/alpha"), ExportFormat::Raw, false)
                .expect("Failed to export");
        assert_eq!(first, second);
    }
}
