use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::TokenUsage;

/// Summary of one session log file, as listed in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub project_path: PathBuf,
    pub file_path: PathBuf,
    pub first_message_timestamp: Option<DateTime<Utc>>,
    pub last_message_timestamp: Option<DateTime<Utc>>,
    /// Non-blank lines in the file, including lines that failed to parse
    pub message_count: usize,
    pub first_user_message_preview: String,
    pub cwd: Option<String>,
    pub token_usage: TokenUsage,
}

/// One project directory and its sessions, most recent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndexEntry {
    pub path: PathBuf,
    pub name: String,
    pub sessions: Vec<SessionSummary>,
}

impl ProjectIndexEntry {
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.sessions.first().and_then(|s| s.last_message_timestamp)
    }
}

/// Look up a session by id across the whole index
pub fn find_session<'a>(index: &'a [ProjectIndexEntry], session_id: &str) -> Option<&'a SessionSummary> {
    index.iter().flat_map(|p| p.sessions.iter()).find(|s| s.session_id == session_id)
}
