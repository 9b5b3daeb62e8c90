use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that points directly at the log root
pub const ROOT_ENV_VAR: &str = "TRANSCRIPT_EXPLORER_ROOT";

/// Resolve the root log directory (the directory holding one folder per project)
///
/// Resolution order: `TRANSCRIPT_EXPLORER_ROOT`, `$CLAUDE_CONFIG_DIR/projects`,
/// `~/.claude/projects`.
///
/// # Errors
///
/// Returns an error if none of the variables are set and the home directory is unknown.
pub fn get_projects_dir() -> Result<PathBuf> {
    if let Some(root) = non_empty_var(ROOT_ENV_VAR) {
        return Ok(PathBuf::from(root));
    }
    if let Some(config_dir) = non_empty_var("CLAUDE_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir).join("projects"));
    }

    let home = non_empty_var("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .context("Could not determine home directory")?;
    Ok(home.join(".claude").join("projects"))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
