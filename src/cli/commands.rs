use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::exporter::{
    export_current, export_session, sync_all, sync_status, ExportFormat, ExportOptions,
    ExportOutcome,
};
use crate::manifest::{load_manifest, save_manifest};
use crate::parsers::scan_metadata;
use crate::utils::claude_projects_dir;

#[derive(Parser)]
#[command(name = "claude-session-sync")]
#[command(version = "0.1.0")]
#[command(about = "Export Claude Code session transcripts to markdown or raw copies", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a single session
    Export {
        /// Path to session JSONL file
        session: PathBuf,
        /// Destination directory
        dest: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Re-export even if up to date
        #[arg(long)]
        force: bool,
        /// Include subagent messages in output
        #[arg(long)]
        include_subagents: bool,
    },
    /// Batch sync all sessions
    SyncAll {
        /// Destination directory
        dest: PathBuf,
        /// Only sync sessions whose cwd starts with PATH
        #[arg(long, value_name = "PATH")]
        project_filter: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Re-export all sessions
        #[arg(long)]
        force: bool,
        /// Include subagent messages in output
        #[arg(long)]
        include_subagents: bool,
    },
    /// Show sync status
    Status {
        /// Destination directory
        dest: Option<PathBuf>,
        /// Only check sessions whose cwd starts with PATH
        #[arg(long, value_name = "PATH")]
        project_filter: Option<String>,
    },
    /// Export most recent session for a project
    ExportCurrent {
        /// Destination directory
        dest: PathBuf,
        /// Project directory to match (default: current directory)
        #[arg(long, value_name = "CWD")]
        project_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Include subagent messages in output
        #[arg(long)]
        include_subagents: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export { session, dest, format, force, include_subagents } => {
            cmd_export(&session, &dest, ExportOptions { format, force, include_subagents })
        }
        Commands::SyncAll { dest, project_filter, format, force, include_subagents } => cmd_sync_all(
            &dest,
            project_filter.as_deref(),
            ExportOptions { format, force, include_subagents },
        ),
        Commands::Status { dest, project_filter } => {
            cmd_status(dest.as_deref(), project_filter.as_deref())
        }
        Commands::ExportCurrent { dest, project_dir, format, include_subagents } => {
            cmd_export_current(&dest, project_dir.as_deref(), format, include_subagents)
        }
    }
}

fn cmd_export(session: &Path, dest: &Path, options: ExportOptions) -> Result<()> {
    let jsonl_path = absolutize(session)?;
    let dest_dir = absolutize(dest)?;

    if !jsonl_path.is_file() {
        bail!("File not found: {}", jsonl_path.display());
    }

    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;
    let mut manifest = load_manifest(&dest_dir);

    let Some(meta) = scan_metadata(&jsonl_path) else {
        bail!("Could not read metadata from {}", jsonl_path.display());
    };
    let project_name = meta.project_name();

    match export_session(&jsonl_path, &dest_dir, &project_name, &mut manifest, &options)? {
        ExportOutcome::Exported { relative_path } => {
            save_manifest(&dest_dir, &mut manifest)?;
            println!("Exported: {relative_path}");
        }
        _ => println!("Session already up to date (use --force to re-export)"),
    }
    Ok(())
}

fn cmd_sync_all(dest: &Path, project_filter: Option<&str>, options: ExportOptions) -> Result<()> {
    let dest_dir = absolutize(dest)?;
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;
    let projects_root = claude_projects_dir()?;

    let summary = sync_all(&projects_root, &dest_dir, project_filter, &options)?;
    if summary.discovered == 0 {
        println!("No sessions found.");
    } else {
        println!(
            "Sync complete: {} exported, {} up-to-date, {} errors",
            summary.exported, summary.up_to_date, summary.errors
        );
    }
    Ok(())
}

fn cmd_status(dest: Option<&Path>, project_filter: Option<&str>) -> Result<()> {
    let dest_dir = dest.map(absolutize).transpose()?;
    let projects_root = claude_projects_dir()?;

    let summary = sync_status(&projects_root, dest_dir.as_deref(), project_filter);
    if summary.total == 0 {
        println!("No sessions found.");
    } else {
        println!(
            "Sessions: {} total, {} synced, {} unsynced, {} modified",
            summary.total, summary.synced, summary.unsynced, summary.modified
        );
    }
    Ok(())
}

fn cmd_export_current(
    dest: &Path,
    project_dir: Option<&Path>,
    format: ExportFormat,
    include_subagents: bool,
) -> Result<()> {
    let dest_dir = absolutize(dest)?;
    let project_dir = match project_dir {
        Some(dir) => absolutize(dir)?,
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    let projects_root = claude_projects_dir()?;

    let relative_path =
        export_current(&projects_root, &dest_dir, &project_dir, format, include_subagents)?;
    println!("Exported: {relative_path}");
    Ok(())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))
}
