use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::parsers::scan_metadata;

/// Find session transcripts one level below the projects root.
///
/// The root holds one directory per project, each containing `*.jsonl`
/// transcripts. When `project_filter` is given, only sessions whose recorded
/// working directory starts with the filter string are kept, which costs one
/// metadata scan per candidate.
///
/// # Returns
///
/// A sorted list of transcript paths. A missing or unreadable root yields an
/// empty list, never an error.
pub fn discover_sessions(projects_root: &Path, project_filter: Option<&str>) -> Vec<PathBuf> {
    let filter = project_filter.filter(|f| !f.is_empty());

    let mut sessions: Vec<PathBuf> = WalkDir::new(projects_root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "jsonl")
        })
        .map(|entry| entry.into_path())
        .filter(|path| match filter {
            Some(prefix) => scan_metadata(path)
                .and_then(|meta| meta.cwd)
                .is_some_and(|cwd| cwd.starts_with(prefix)),
            None => true,
        })
        .collect();

    sessions.sort();
    sessions
}
