use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ExportOptions, flatten_content, format_timestamp};
use crate::models::Record;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptDocument<'a> {
    title: &'a str,
    exported_at: DateTime<Utc>,
    message_count: usize,
    messages: Vec<DocumentMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMessage {
    #[serde(rename = "type")]
    message_type: String,
    timestamp: Option<DateTime<Utc>>,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_time: Option<String>,
}

/// Render records as a pretty-printed JSON document
pub fn render(
    records: &[&Record],
    title: &str,
    options: &ExportOptions,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let messages = records
        .iter()
        .map(|record| DocumentMessage {
            message_type: record.record_type.to_string(),
            timestamp: record.timestamp,
            content: flatten_content(record),
            formatted_time: options
                .include_timestamps
                .then(|| record.timestamp.as_ref().map(format_timestamp).unwrap_or_default()),
        })
        .collect();

    let document = TranscriptDocument { title, exported_at, message_count: records.len(), messages };
    serde_json::to_string_pretty(&document).context("Failed to serialize transcript document")
}
