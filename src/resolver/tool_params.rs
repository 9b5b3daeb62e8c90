use serde_json::Value;
use url::Url;

use crate::utils::{last_path_segment, truncate_with_ellipsis};

const BASH_COMMAND_MAX_CHARS: usize = 60;
const GREP_PATTERN_MAX_CHARS: usize = 40;
const RAW_URL_MAX_CHARS: usize = 40;
const QUESTION_MAX_CHARS: usize = 50;
const GENERIC_MAX_CHARS: usize = 50;

/// Fields probed, in order, for tools without a dedicated rule
const GENERIC_FIELDS: &[&str] = &[
    "file_path",
    "path",
    "url",
    "query",
    "command",
    "name",
    "title",
    "target",
    "message",
    "content",
    "text",
    "description",
    "input",
];

/// Short label summarising a tool invocation's most telling argument
///
/// Used to preview a collapsed tool block, e.g. `Read` → `main.rs`,
/// `Bash` → the command line. Tool names are matched case-sensitively; tools without a
/// dedicated rule fall back to a list of common argument names.
///
/// Returns `None` when no rule yields a value.
pub fn extract_key_parameter(tool_name: &str, input: &Value) -> Option<String> {
    match tool_name {
        "Read" | "Write" | "Edit" => str_field(input, "file_path").map(path_label),
        "Bash" => {
            str_field(input, "command").map(|c| truncate_with_ellipsis(c, BASH_COMMAND_MAX_CHARS))
        }
        "Grep" => str_field(input, "pattern").map(|pattern| {
            let quoted = format!("\"{}\"", truncate_with_ellipsis(pattern, GREP_PATTERN_MAX_CHARS));
            with_location(quoted, input)
        }),
        "Glob" => str_field(input, "pattern").map(|pattern| with_location(pattern.to_string(), input)),
        "Task" => str_field(input, "description").map(str::to_string),
        "WebFetch" => str_field(input, "url").map(url_label),
        "TodoWrite" => input.get("todos").and_then(Value::as_array).map(|todos| match todos.len() {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }),
        "AskUserQuestion" => input
            .get("questions")
            .and_then(Value::as_array)
            .and_then(|questions| questions.first())
            .and_then(|first| str_field(first, "question"))
            .map(|q| truncate_with_ellipsis(q, QUESTION_MAX_CHARS)),
        "NotebookEdit" => str_field(input, "notebook_path").map(path_label),
        _ => generic_key_parameter(input),
    }
}

fn generic_key_parameter(input: &Value) -> Option<String> {
    for &field in GENERIC_FIELDS {
        let Some(value) = str_field(input, field) else {
            continue;
        };
        return Some(match field {
            "file_path" | "path" => path_label(value),
            "url" => url_label(value),
            _ => truncate_with_ellipsis(value, GENERIC_MAX_CHARS),
        });
    }

    input
        .as_object()?
        .iter()
        .filter(|(key, _)| !key.starts_with('_'))
        .find_map(|(_, value)| value.as_str().filter(|s| !s.is_empty()))
        .map(|value| truncate_with_ellipsis(value, GENERIC_MAX_CHARS))
}

/// Non-empty string field of a JSON object
fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn path_label(path: &str) -> String {
    last_path_segment(path).to_string()
}

fn with_location(label: String, input: &Value) -> String {
    match str_field(input, "path") {
        Some(path) => format!("{} in {}", label, last_path_segment(path)),
        None => label,
    }
}

/// Host of an absolute URL, or the raw text cut to [`RAW_URL_MAX_CHARS`]
fn url_label(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.chars().take(RAW_URL_MAX_CHARS).collect())
}
