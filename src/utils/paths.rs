use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

/// Open a log file for streaming
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be opened for reading.
pub fn open_log_file(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Last non-empty segment of a `/` or `\` separated path string
///
/// # Examples
///
/// ```
/// use transcript_explorer::utils::last_path_segment;
///
/// assert_eq!(last_path_segment("/Users/foo/bar.rs"), "bar.rs");
/// assert_eq!(last_path_segment("C:\\work\\src\\"), "src");
/// ```
pub fn last_path_segment(path: &str) -> &str {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).last().unwrap_or(path)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use transcript_explorer::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Documents");
/// // Returns "~/Documents" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
