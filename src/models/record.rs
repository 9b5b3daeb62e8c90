use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::deserializers::{deserialize_content, deserialize_timestamp, lenient};

/// Kind of a log record, taken from its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordType {
    User,
    Assistant,
    System,
    Other(String),
    #[default]
    Unknown,
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::User => "user",
            RecordType::Assistant => "assistant",
            RecordType::System => "system",
            RecordType::Other(name) => name,
            RecordType::Unknown => "unknown",
        }
    }

    /// Human-readable role used in transcript headings
    pub fn role_label(&self) -> String {
        match self {
            RecordType::User => "User".to_string(),
            RecordType::Assistant => "Assistant".to_string(),
            RecordType::System => "System".to_string(),
            other => {
                let name = other.as_str();
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => RecordType::User,
            "assistant" => RecordType::Assistant,
            "system" => RecordType::System,
            _ => RecordType::Other(value),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Marker for records the assistant produced for itself rather than the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalMessageType {
    TerminalControl,
    Hook,
    Other(String),
}

impl From<String> for InternalMessageType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "terminal_control" => InternalMessageType::TerminalControl,
            "hook" => InternalMessageType::Hook,
            _ => InternalMessageType::Other(value),
        }
    }
}

/// One typed piece of a record's payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ContentUnit {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolInvocation {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
        #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_bool")]
        is_error: bool,
    },
    #[serde(rename = "thinking")]
    Reasoning { thinking: String },
    /// Images, future unit kinds and malformed units
    #[serde(other)]
    Unknown,
}

impl ContentUnit {
    pub fn is_tool_unit(&self) -> bool {
        matches!(self, ContentUnit::ToolInvocation { .. } | ContentUnit::ToolResult { .. })
    }
}

/// A record's content: either a bare string or an ordered list of units
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Units(Vec<ContentUnit>),
}

impl Content {
    pub fn units(&self) -> &[ContentUnit] {
        match self {
            Content::Text(_) => &[],
            Content::Units(units) => units,
        }
    }

    /// Concatenated plain text of the content, ignoring tool and reasoning units
    pub fn plain_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Units(units) => units
                .iter()
                .filter_map(|unit| match unit {
                    ContentUnit::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let count: Option<u64> = lenient(deserializer)?;
    Ok(count.unwrap_or(0))
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens
            + self.output_tokens
            + self.cache_creation_input_tokens
            + self.cache_read_input_tokens
    }

    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.cache_creation_input_tokens += other.cache_creation_input_tokens;
        self.cache_read_input_tokens += other.cache_read_input_tokens;
    }
}

/// Token usage as it appears on the wire (snake_case keys)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct WireUsage {
    #[serde(default, deserialize_with = "lenient_count")]
    input_tokens: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    output_tokens: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    cache_creation_input_tokens: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    cache_read_input_tokens: u64,
}

impl From<WireUsage> for TokenUsage {
    fn from(usage: WireUsage) -> Self {
        Self {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            cache_creation_input_tokens: usage.cache_creation_input_tokens,
            cache_read_input_tokens: usage.cache_read_input_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "lenient")]
    usage: Option<WireUsage>,
}

impl Message {
    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage.map(TokenUsage::from)
    }
}

/// One parsed line of a session log file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(rename = "type", default, deserialize_with = "crate::parsers::deserializers::deserialize_record_type")]
    pub record_type: RecordType,
    #[serde(default, deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::lenient_bool")]
    pub is_meta: bool,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_internal_type")]
    pub internal_message_type: Option<InternalMessageType>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<Message>,
    #[serde(rename = "content", default, deserialize_with = "deserialize_content")]
    top_level_content: Option<Content>,
}

impl Record {
    /// Content of the record, preferring `message.content` over a top-level `content`
    pub fn content(&self) -> Option<&Content> {
        self.message.as_ref().and_then(|m| m.content.as_ref()).or(self.top_level_content.as_ref())
    }

    pub fn units(&self) -> &[ContentUnit] {
        self.content().map(Content::units).unwrap_or(&[])
    }

    pub fn token_usage(&self) -> Option<TokenUsage> {
        self.message.as_ref().and_then(Message::usage)
    }

    /// True when the content is a unit list containing a tool invocation or result
    pub fn has_tool_units(&self) -> bool {
        matches!(self.content(), Some(Content::Units(units)) if units.iter().any(ContentUnit::is_tool_unit))
    }

    /// A conversational user turn: type user, not meta, no internal message type
    pub fn is_user_prompt(&self) -> bool {
        self.record_type == RecordType::User && !self.is_meta && self.internal_message_type.is_none()
    }
}
