/// Truncate to at most `max_chars` characters, appending `...` when anything was cut
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
