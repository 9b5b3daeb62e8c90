use serde_json::Value;

use crate::export::format_timestamp;
use crate::models::{ProjectIndexEntry, ResolvedMessageView, TextSpan, ToolBlock, ToolOutcome, ViewBlock};
use crate::utils::{format_path_with_tilde, truncate_with_ellipsis};

const SUMMARY_MAX_CHARS: usize = 80;
const RESULT_PREVIEW_MAX_CHARS: usize = 200;

pub(crate) fn print_index(index: &[ProjectIndexEntry]) {
    if index.is_empty() {
        println!("No sessions found");
        return;
    }

    for project in index {
        println!("{} ({} sessions)", project.name, project.sessions.len());
        for session in &project.sessions {
            let when = session.last_message_timestamp.as_ref().map(format_timestamp).unwrap_or_else(|| "-".into());
            println!(
                "  {}  {}  {:>5} lines  {}",
                session.session_id, when, session.message_count, session.first_user_message_preview
            );
            if let Some(cwd) = &session.cwd {
                println!("      {}", format_path_with_tilde(std::path::Path::new(cwd)));
            }
        }
        println!();
    }
}

pub(crate) fn print_view(view: &ResolvedMessageView, expanded: bool) {
    let when = view.timestamp.as_ref().map(format_timestamp).unwrap_or_default();
    if !expanded {
        println!("[{}] {} {}", view.classification.as_str(), when, collapsed_summary(view));
        return;
    }

    println!("[{}] {}", view.classification.as_str(), when);
    for block in &view.blocks {
        for line in block_lines(block) {
            println!("  {}", line);
        }
    }
    println!();
}

/// One-line stand-in for a collapsed message
pub(crate) fn collapsed_summary(view: &ResolvedMessageView) -> String {
    let tools: Vec<String> = view.tool_blocks().map(tool_label).collect();
    if !tools.is_empty() {
        return tools.join(", ");
    }

    for block in &view.blocks {
        let text = match block {
            ViewBlock::Text { spans } => spans_text(spans),
            ViewBlock::ToolResult { outcome, .. } => payload_text(&outcome.payload),
            ViewBlock::Reasoning { text } => text.clone(),
            ViewBlock::Tool(_) => continue,
        };
        if let Some(line) = text.lines().find(|l| !l.trim().is_empty()) {
            return truncate_with_ellipsis(line.trim(), SUMMARY_MAX_CHARS);
        }
    }
    String::new()
}

fn tool_label(tool: &ToolBlock) -> String {
    match &tool.key_parameter {
        Some(key) => format!("{}({})", tool.name, key),
        None => tool.name.clone(),
    }
}

fn block_lines(block: &ViewBlock) -> Vec<String> {
    match block {
        ViewBlock::Text { spans } => spans
            .iter()
            .flat_map(|span| match span {
                TextSpan::Text { text } => text.lines().map(str::to_string).collect::<Vec<_>>(),
                TextSpan::Code { language, code } => {
                    let mut lines = vec![format!("```{}", language.as_deref().unwrap_or_default())];
                    lines.extend(code.lines().map(str::to_string));
                    lines.push("```".to_string());
                    lines
                }
            })
            .collect(),
        ViewBlock::Tool(tool) => {
            let mut lines = vec![format!("-> {}", tool_label(tool))];
            if let Some(outcome) = &tool.result {
                lines.push(outcome_line(outcome));
            }
            lines
        }
        ViewBlock::ToolResult { tool_use_id, outcome } => {
            vec![format!("result for {}", tool_use_id), outcome_line(outcome)]
        }
        ViewBlock::Reasoning { text } => text.lines().map(|l| format!("~ {}", l)).collect(),
    }
}

fn outcome_line(outcome: &ToolOutcome) -> String {
    let marker = if outcome.is_error { "<- error:" } else { "<-" };
    let text = payload_text(&outcome.payload).replace('\n', " ");
    format!("{} {}", marker, truncate_with_ellipsis(&text, RESULT_PREVIEW_MAX_CHARS))
}

fn spans_text(spans: &[TextSpan]) -> String {
    spans
        .iter()
        .map(|span| match span {
            TextSpan::Text { text } => text.as_str(),
            TextSpan::Code { code, .. } => code.as_str(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn payload_text(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Array(parts) => {
            parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect::<Vec<_>>().join("\n")
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
