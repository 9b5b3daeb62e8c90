use std::path::Path;

use anyhow::Result;

use super::record_stream::{RecordStream, StreamLine};
use crate::models::{Record, TokenUsage};

/// Number of leading records retained as the session header
pub const HEADER_RECORDS: usize = 10;

/// Summary of one log file gathered in a single streaming pass
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    /// First successfully parsed records, at most [`HEADER_RECORDS`]
    pub first_messages: Vec<Record>,
    pub last_message: Option<Record>,
    /// Non-blank lines, parsable or not
    pub line_count: usize,
    pub token_usage: TokenUsage,
}

/// Stream a log file and collect its header, last record and line count
///
/// Returns `Ok(None)` when the file has no non-blank lines or when none of its first
/// [`HEADER_RECORDS`] lines parse; such files carry no usable header and are left out of
/// the index.
///
/// # Errors
///
/// Returns an error only if the file cannot be opened or read.
pub fn extract_session_metadata(path: &Path) -> Result<Option<SessionMetadata>> {
    let mut first_messages = Vec::with_capacity(HEADER_RECORDS);
    let mut last_message = None;
    let mut line_count = 0;
    let mut parsed_in_header = 0;
    let mut malformed = 0;
    let mut token_usage = TokenUsage::default();

    for line in RecordStream::open(path)? {
        line_count += 1;
        match line? {
            StreamLine::Record(record) => {
                if line_count <= HEADER_RECORDS {
                    parsed_in_header += 1;
                }
                if let Some(usage) = record.token_usage() {
                    token_usage.accumulate(&usage);
                }
                if first_messages.len() < HEADER_RECORDS {
                    first_messages.push((*record).clone());
                }
                last_message = Some(*record);
            }
            StreamLine::Malformed => malformed += 1,
        }
    }

    if malformed > 0 {
        log::debug!("{}: {} of {} lines malformed", path.display(), malformed, line_count);
    }

    if line_count == 0 || parsed_in_header == 0 {
        return Ok(None);
    }

    Ok(Some(SessionMetadata { first_messages, last_message, line_count, token_usage }))
}
