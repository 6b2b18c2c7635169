//! Single-session export

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::manifest::{file_mtime, needs_sync, path_key, Manifest, ManifestEntry};
use crate::models::SessionMetadata;
use crate::parsers::scan_metadata;
use crate::renderer::render_transcript;

/// Output format for exported sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Rendered markdown transcript
    #[default]
    Markdown,
    /// Byte-for-byte copy of the source JSONL
    Raw,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Raw => "raw",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Raw => "jsonl",
        }
    }
}

/// Knobs shared by the export commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub force: bool,
    pub include_subagents: bool,
}

/// What happened to a single session during export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written to `relative_path` under the destination root.
    Exported { relative_path: String },
    /// Source mtime matches the manifest entry, nothing written.
    UpToDate,
    /// No metadata could be scanned; a warning was printed.
    MissingMetadata,
}

/// Output filename: `YYYY-MM-DD_<8-char-id>.<ext>`.
pub fn output_filename(meta: &SessionMetadata, format: ExportFormat) -> String {
    format!("{}_{}.{}", meta.date(), meta.short_id(), format.extension())
}

/// Export one session into `dest_dir/<project_name>/`.
///
/// Skips work when the manifest says the source is unchanged (unless
/// forced) and records the result in the manifest on success. The caller
/// decides when to persist the manifest.
///
/// # Errors
///
/// Returns an error when the output cannot be written. A session whose
/// metadata cannot be scanned is not an error; it reports
/// [`ExportOutcome::MissingMetadata`] after warning on stderr.
pub fn export_session(
    jsonl_path: &Path,
    dest_dir: &Path,
    project_name: &str,
    manifest: &mut Manifest,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let Some(meta) = scan_metadata(jsonl_path) else {
        eprintln!("Warning: Could not read metadata from {}", jsonl_path.display());
        return Ok(ExportOutcome::MissingMetadata);
    };

    if !needs_sync(manifest, jsonl_path, options.force) {
        return Ok(ExportOutcome::UpToDate);
    }

    let output_name = output_filename(&meta, options.format);
    let project_dir = dest_dir.join(project_name);
    fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;
    let output_path = project_dir.join(&output_name);

    match options.format {
        ExportFormat::Raw => {
            fs::copy(jsonl_path, &output_path).with_context(|| {
                format!("Failed to copy session to {}", output_path.display())
            })?;
        }
        ExportFormat::Markdown => {
            let file = File::create(&output_path)
                .with_context(|| format!("Failed to create {}", output_path.display()))?;
            let mut out = BufWriter::new(file);
            render_transcript(jsonl_path, &mut out, options.include_subagents)?;
            out.flush()
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
        }
    }

    let relative_path = format!("{project_name}/{output_name}");
    manifest.sessions.insert(
        path_key(jsonl_path),
        ManifestEntry {
            session_id: meta.session_id.clone().unwrap_or_default(),
            project_name: project_name.to_string(),
            source_mtime: file_mtime(jsonl_path).unwrap_or(0.0),
            exported_path: relative_path.clone(),
            format: options.format.as_str().to_string(),
        },
    );

    Ok(ExportOutcome::Exported { relative_path })
}
