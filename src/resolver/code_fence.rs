use std::sync::LazyLock;

use regex::Regex;

use crate::models::TextSpan;

/// Triple-backtick fence with an optional language label on the opening line
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([^\n`]*)\n(.*?)```").expect("code fence pattern is valid")
});

/// Split message text into literal spans and fenced code spans, in order
///
/// Whitespace-only text between fences is dropped. An unterminated fence is left as
/// literal text.
pub fn split_code_fences(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in CODE_FENCE.captures_iter(text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        push_text(&mut spans, &text[cursor..whole.start()]);

        let language = caps.get(1).map(|m| m.as_str().trim()).filter(|l| !l.is_empty());
        let code = code.as_str();
        spans.push(TextSpan::Code {
            language: language.map(str::to_string),
            code: code.strip_suffix('\n').unwrap_or(code).to_string(),
        });
        cursor = whole.end();
    }

    push_text(&mut spans, &text[cursor..]);
    spans
}

fn push_text(spans: &mut Vec<TextSpan>, text: &str) {
    let text = text.trim_matches(['\n', '\r']);
    if !text.trim().is_empty() {
        spans.push(TextSpan::Text { text: text.to_string() });
    }
}
