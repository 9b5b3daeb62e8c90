//! Session discovery and indexing
//!
//! # Error Handling Strategy
//!
//! The indexer degrades gracefully and never returns an error:
//!
//! - **Discovery**: A missing log root yields an empty index; unreadable directory entries
//!   are logged and skipped.
//!
//! - **Per-file failures**: Files that can't be read are logged and skipped, so one bad file
//!   never aborts a scan.
//!
//! - **Deduplication**: Session ids are unique across the whole index. Enumeration order is
//!   lexicographic, so which duplicate file wins is deterministic.

pub mod builder;
pub mod project_discovery;

pub use builder::{NO_PROMPT_PLACEHOLDER, PREVIEW_MAX_CHARS, build_session_index};
pub use project_discovery::{ProjectDir, discover_projects};
