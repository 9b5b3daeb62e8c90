use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::record::RecordType;

/// Display category of a resolved message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    User,
    Assistant,
    System,
    Tool,
    ToolResult,
    Thinking,
    Hook,
    Internal,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::User => "user",
            Classification::Assistant => "assistant",
            Classification::System => "system",
            Classification::Tool => "tool",
            Classification::ToolResult => "tool-result",
            Classification::Thinking => "thinking",
            Classification::Hook => "hook",
            Classification::Internal => "internal",
        }
    }

    /// Tags whose messages start collapsed
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            Classification::Hook
                | Classification::Tool
                | Classification::ToolResult
                | Classification::Internal
                | Classification::Thinking
        )
    }
}

/// A span of a text block: literal text or a fenced code region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TextSpan {
    Text { text: String },
    Code { language: Option<String>, code: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolBlock {
    pub id: String,
    pub name: String,
    pub input: Value,
    pub key_parameter: Option<String>,
    pub result: Option<ToolOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    pub payload: Value,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewBlock {
    Text { spans: Vec<TextSpan> },
    Tool(ToolBlock),
    #[serde(rename_all = "camelCase")]
    ToolResult { tool_use_id: String, outcome: ToolOutcome },
    Reasoning { text: String },
}

/// Render model of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMessageView {
    pub uuid: Option<String>,
    pub record_type: RecordType,
    pub timestamp: Option<DateTime<Utc>>,
    pub blocks: Vec<ViewBlock>,
    pub classification: Classification,
    pub expanded_by_default: bool,
}

impl ResolvedMessageView {
    pub fn text_blocks(&self) -> impl Iterator<Item = &[TextSpan]> {
        self.blocks.iter().filter_map(|b| match b {
            ViewBlock::Text { spans } => Some(spans.as_slice()),
            _ => None,
        })
    }

    pub fn tool_blocks(&self) -> impl Iterator<Item = &ToolBlock> {
        self.blocks.iter().filter_map(|b| match b {
            ViewBlock::Tool(tool) => Some(tool),
            _ => None,
        })
    }
}
