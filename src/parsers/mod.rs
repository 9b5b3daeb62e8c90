//! JSONL readers for assistant session logs
//!
//! # Error Handling Strategy
//!
//! Parsing follows a **graceful degradation** approach:
//!
//! - **Individual line failures**: A line that is not a JSON object is counted but yields no
//!   record. It is never reported as an error.
//!
//! - **Field-level tolerance**: Every record field is optional and a field of the wrong JSON
//!   type decodes as absent (see [`deserializers`]).
//!
//! - **File-level failures**: Only an unreadable file produces an `anyhow::Error`. Callers
//!   decide whether that is fatal; the index builder logs it and skips the file.

pub mod deserializers;
pub mod metadata;
pub mod record_stream;

pub use metadata::{HEADER_RECORDS, SessionMetadata, extract_session_metadata};
pub use record_stream::{RecordStream, StreamLine, load_session_records};
