//! Session index builder.
//!
//! # Error Handling Strategy
//!
//! Index building never fails:
//!
//! - **Missing root**: An absent log root produces an empty index.
//! - **File-level errors**: An unreadable file is logged as a warning and skipped.
//! - **Unusable files**: Empty files, files whose first lines don't parse, and files whose
//!   header carries no session id are skipped silently (debug log only).
//! - **Summary**: One info line reports accepted, skipped and duplicate files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::indexer::project_discovery::{ProjectDir, discover_projects};
use crate::models::{ProjectIndexEntry, Record, SessionSummary};
use crate::parsers::{SessionMetadata, extract_session_metadata};
use crate::utils::truncate_with_ellipsis;

/// Maximum characters of the first user prompt kept in a summary
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Preview used when a session's header has no conversational user turn
pub const NO_PROMPT_PLACEHOLDER: &str = "No prompt";

/// Outcome of extracting one file, tagged with its project position
struct ScannedFile {
    project_idx: usize,
    path: PathBuf,
    metadata: Option<SessionMetadata>,
}

/// Fold state: sessions seen so far across all projects plus per-project results
struct IndexAccumulator {
    seen: HashSet<String>,
    sessions: Vec<Vec<SessionSummary>>,
    skipped: usize,
    duplicates: usize,
}

impl IndexAccumulator {
    fn new(project_count: usize) -> Self {
        Self { seen: HashSet::new(), sessions: vec![Vec::new(); project_count], skipped: 0, duplicates: 0 }
    }

    /// Accept a scanned file unless its session id was already seen (first one wins)
    fn accept(mut self, file: ScannedFile, projects: &[ProjectDir]) -> Self {
        let Some(metadata) = file.metadata else {
            self.skipped += 1;
            return self;
        };
        let Some(session_id) = metadata.first_messages.first().and_then(|r| r.session_id.clone())
        else {
            log::debug!("Skipping {}: header has no session id", file.path.display());
            self.skipped += 1;
            return self;
        };
        if !self.seen.insert(session_id.clone()) {
            log::debug!("Skipping {}: session {} already indexed", file.path.display(), session_id);
            self.duplicates += 1;
            return self;
        }

        let project = &projects[file.project_idx];
        let summary = build_summary(session_id, &project.path, file.path, metadata);
        self.sessions[file.project_idx].push(summary);
        self
    }
}

/// Build the project → session index for a log root
///
/// Scans every project directory under `root` (see [`discover_projects`]), extracts
/// metadata from each `.jsonl` file in parallel, then folds the results in enumeration
/// order so that when two files share a session id the first one processed wins.
///
/// Sessions within a project are sorted newest first by last message timestamp, and
/// projects are sorted by the timestamp of their newest session. Projects without any
/// accepted session are dropped.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use transcript_explorer::build_session_index;
///
/// let index = build_session_index(Path::new("/Users/alice/.claude/projects"));
/// for project in &index {
///     println!("{}: {} sessions", project.name, project.sessions.len());
/// }
/// ```
pub fn build_session_index(root: &Path) -> Vec<ProjectIndexEntry> {
    let projects = discover_projects(root);

    let files: Vec<(usize, &PathBuf)> = projects
        .iter()
        .enumerate()
        .flat_map(|(idx, project)| project.log_files.iter().map(move |path| (idx, path)))
        .collect();

    // Extraction is independent per file; collect() keeps enumeration order
    let scanned: Vec<ScannedFile> = files
        .par_iter()
        .map(|&(project_idx, path)| ScannedFile {
            project_idx,
            path: path.clone(),
            metadata: scan_file(path),
        })
        .collect();

    let file_count = scanned.len();
    let acc = scanned
        .into_iter()
        .fold(IndexAccumulator::new(projects.len()), |acc, file| acc.accept(file, &projects));

    let mut index: Vec<ProjectIndexEntry> = projects
        .into_iter()
        .zip(acc.sessions)
        .filter(|(_, sessions)| !sessions.is_empty())
        .map(|(project, mut sessions)| {
            sessions.sort_by(|a, b| b.last_message_timestamp.cmp(&a.last_message_timestamp));
            ProjectIndexEntry { path: project.path, name: project.name, sessions }
        })
        .collect();

    index.sort_by_key(|p| std::cmp::Reverse(p.last_activity()));

    log::info!(
        "Indexed {} sessions in {} projects ({} files scanned, {} skipped, {} duplicates)",
        index.iter().map(|p| p.sessions.len()).sum::<usize>(),
        index.len(),
        file_count,
        acc.skipped,
        acc.duplicates
    );

    index
}

/// Extract one file's metadata, logging and swallowing read errors
fn scan_file(path: &Path) -> Option<SessionMetadata> {
    match extract_session_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!("Failed to read session file {}: {:#}", path.display(), e);
            None
        }
    }
}

fn build_summary(
    session_id: String,
    project_path: &Path,
    file_path: PathBuf,
    metadata: SessionMetadata,
) -> SessionSummary {
    let first = metadata.first_messages.first();
    let first_message_timestamp = first.and_then(|r| r.timestamp);
    let last_message_timestamp = metadata
        .last_message
        .as_ref()
        .and_then(|r| r.timestamp)
        .or(first_message_timestamp);

    SessionSummary {
        session_id,
        project_path: project_path.to_path_buf(),
        file_path,
        first_message_timestamp,
        last_message_timestamp,
        message_count: metadata.line_count,
        first_user_message_preview: first_user_message_preview(&metadata.first_messages),
        cwd: first.and_then(|r| r.cwd.clone()),
        token_usage: metadata.token_usage,
    }
}

/// Preview of the first conversational user turn among the header records
pub fn first_user_message_preview(records: &[Record]) -> String {
    records
        .iter()
        .find(|r| r.is_user_prompt())
        .map(|r| {
            let text = r.content().map(|c| c.plain_text()).unwrap_or_default();
            truncate_with_ellipsis(&text, PREVIEW_MAX_CHARS)
        })
        .unwrap_or_else(|| NO_PROMPT_PLACEHOLDER.to_string())
}
