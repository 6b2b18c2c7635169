use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Get the Claude Code projects directory (~/.claude/projects)
///
/// `HOME` takes precedence over the platform home lookup so tests and
/// wrapper scripts can point the tool at a different directory tree.
pub fn claude_projects_dir() -> Result<PathBuf> {
    let home = match env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::home_dir().context("Could not determine home directory")?,
    };
    Ok(home.join(".claude").join("projects"))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_claude_projects_dir_uses_home() {
        // Save original HOME value
        let original_home = env::var("HOME").ok();

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. Tests don't run in parallel accessing the same env var (this is
        //    the only test in this crate that mutates HOME)
        // 2. We restore the original value afterwards
        unsafe {
            env::set_var("HOME", "/Users/testuser");
        }

        let result = claude_projects_dir();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), PathBuf::from("/Users/testuser/.claude/projects"));

        // Restore original HOME
        if let Some(home) = original_home {
            unsafe {
                env::set_var("HOME", home);
            }
        }
    }
}
