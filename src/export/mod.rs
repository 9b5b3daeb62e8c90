//! Transcript export
//!
//! Serializes a session's records into a portable document, either Markdown text or a
//! JSON document. Exporting never fails: problems are reported in the returned
//! [`ExportResult`]. Writing the bytes somewhere is handled by [`destination`].

pub mod destination;
pub mod document;
pub mod markdown;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use destination::{ClipboardProvider, ExportDestination, SystemClipboard, deliver, deliver_with};

use crate::models::{Content, ContentUnit, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_tool_calls: bool,
    pub include_timestamps: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Markdown, include_tool_calls: true, include_timestamps: true }
    }
}

/// Outcome of an export, suitable for handing straight to a UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Records that survived filtering
    pub message_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportResult {
    pub fn ok(content: String, message_count: usize) -> Self {
        Self { success: true, content: Some(content), message_count, error: None }
    }

    pub fn failure(error: impl Into<String>, message_count: usize) -> Self {
        Self { success: false, content: None, message_count, error: Some(error.into()) }
    }
}

/// Whether a record is left out of the export
///
/// With tool calls excluded, any record whose content list holds a tool invocation or
/// tool result is dropped.
pub fn is_excluded(record: &Record, options: &ExportOptions) -> bool {
    !options.include_tool_calls && record.has_tool_units()
}

/// Serialize a session's records, stamped with the current time
pub fn export_transcript(records: &[Record], title: &str, options: &ExportOptions) -> ExportResult {
    export_transcript_at(records, title, options, Utc::now())
}

/// Serialize a session's records with an explicit export time
pub fn export_transcript_at(
    records: &[Record],
    title: &str,
    options: &ExportOptions,
    exported_at: DateTime<Utc>,
) -> ExportResult {
    let included: Vec<&Record> = records.iter().filter(|r| !is_excluded(r, options)).collect();
    let message_count = included.len();

    let rendered = match options.format {
        ExportFormat::Markdown => Ok(markdown::render(&included, title, options, exported_at)),
        ExportFormat::Json => document::render(&included, title, options, exported_at),
    };

    match rendered {
        Ok(content) => ExportResult::ok(content, message_count),
        Err(e) => {
            log::warn!("Failed to serialize transcript '{}': {:#}", title, e);
            ExportResult::failure(format!("{:#}", e), message_count)
        }
    }
}

/// Local wall-clock rendering of a timestamp used in exports
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Flatten a record's content into plain text
///
/// Text units are kept verbatim; tool invocations and results become labeled fenced
/// blocks. Reasoning and unknown units are omitted.
pub fn flatten_content(record: &Record) -> String {
    match record.content() {
        None => String::new(),
        Some(Content::Text(text)) => text.clone(),
        Some(Content::Units(units)) => units
            .iter()
            .filter_map(|unit| match unit {
                ContentUnit::Text { text } => Some(text.clone()),
                ContentUnit::ToolInvocation { name, input, .. } => Some(format!(
                    "**Tool Use: {}**\n```json\n{}\n```",
                    name,
                    serde_json::to_string_pretty(input).unwrap_or_default()
                )),
                ContentUnit::ToolResult { content, .. } => {
                    Some(format!("**Tool Result**\n```\n{}\n```", result_text(content)))
                }
                ContentUnit::Reasoning { .. } | ContentUnit::Unknown => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Text of a tool result payload: a string, a list of text parts, or pretty JSON
fn result_text(payload: &Value) -> String {
    match payload {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(parts) if parts.iter().all(|p| p.get("text").is_some_and(Value::is_string)) => {
            parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect::<Vec<_>>().join("\n")
        }
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}
