use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Maximum number of project directories scanned (resource exhaustion guard)
pub const MAX_PROJECTS: usize = 1000;

/// Maximum number of log files scanned per project (resource exhaustion guard)
pub const MAX_LOG_FILES_PER_PROJECT: usize = 10_000;

/// File extension of session logs
pub const LOG_EXTENSION: &str = "jsonl";

/// A project directory and the log files found directly inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    pub name: String,
    pub path: PathBuf,
    pub log_files: Vec<PathBuf>,
}

/// Enumerate project directories under the log root and their `.jsonl` files
///
/// Both levels are listed in lexicographic file-name order so that the index, whose
/// deduplication keeps the first file seen for a session id, is deterministic.
///
/// Returns an empty Vec if the root doesn't exist (not an error). Unreadable entries are
/// logged and skipped. Enumeration stops at [`MAX_PROJECTS`] directories and
/// [`MAX_LOG_FILES_PER_PROJECT`] files per directory.
pub fn discover_projects(root: &Path) -> Vec<ProjectDir> {
    if !root.is_dir() {
        log::debug!("Log root {} does not exist", root.display());
        return Vec::new();
    }

    let mut projects = Vec::new();
    let entries = WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        if projects.len() >= MAX_PROJECTS {
            log::warn!(
                "Resource limit reached: only the first {} project directories are indexed",
                MAX_PROJECTS
            );
            break;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let log_files = discover_log_files(entry.path());
        projects.push(ProjectDir { name, path: entry.into_path(), log_files });
    }

    projects
}

/// List `.jsonl` files directly inside a project directory, sorted by file name
pub fn discover_log_files(project_dir: &Path) -> Vec<PathBuf> {
    let mut log_files = Vec::new();

    for entry in WalkDir::new(project_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", project_dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let is_log = entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == LOG_EXTENSION);
        if !is_log {
            continue;
        }

        if log_files.len() >= MAX_LOG_FILES_PER_PROJECT {
            log::warn!(
                "Resource limit reached: project {} has more than {} log files",
                project_dir.display(),
                MAX_LOG_FILES_PER_PROJECT
            );
            break;
        }
        log_files.push(entry.into_path());
    }

    log_files
}
