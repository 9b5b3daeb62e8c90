//! Transcript Explorer - Index, resolve and export assistant session logs
//!
//! This library reads the JSONL transcript logs an AI coding assistant keeps under
//! `~/.claude/projects/` (one directory per project, one file per session). It supports:
//!
//! - Streaming log files record by record, tolerating malformed lines
//! - Building a project → session index with header metadata and deduplicated session ids
//! - Resolving a session into render-ready messages with tool calls paired to their results
//! - Exporting a session as Markdown or a JSON document
//!
//! # Example
//!
//! ```no_run
//! use transcript_explorer::{build_session_index, get_projects_dir, load_session_records, resolve_session_view};
//!
//! let root = get_projects_dir()?;
//! let index = build_session_index(&root);
//! if let Some(session) = index.first().and_then(|p| p.sessions.first()) {
//!     let records = load_session_records(&session.file_path)?;
//!     let views = resolve_session_view(&records);
//!     println!("{}: {} messages", session.session_id, views.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod export;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod resolver;
pub mod utils;

// Re-export commonly used types
pub use export::{ExportFormat, ExportOptions, ExportResult, export_transcript};
pub use indexer::build_session_index;
pub use models::{ProjectIndexEntry, Record, ResolvedMessageView, SessionSummary, find_session};
pub use parsers::{extract_session_metadata, load_session_records};
pub use resolver::{extract_key_parameter, resolve_session_view};
pub use utils::{format_path_with_tilde, get_projects_dir};
