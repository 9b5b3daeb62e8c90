use chrono::{DateTime, Utc};

use super::{ExportOptions, flatten_content, format_timestamp};
use crate::models::Record;

const SEPARATOR: &str = "\n---\n\n";

/// Render records as a Markdown transcript
///
/// A title heading and export-time line, then one section per record headed by its role
/// (and timestamp when requested), separated by horizontal rules.
pub fn render(records: &[&Record], title: &str, options: &ExportOptions, exported_at: DateTime<Utc>) -> String {
    let mut out = format!("# {}\n\n_Exported {}_\n\n", title, format_timestamp(&exported_at));

    let sections: Vec<String> = records.iter().map(|record| render_section(record, options)).collect();
    if !sections.is_empty() {
        out.push_str(SEPARATOR.trim_start());
        out.push_str(&sections.join(SEPARATOR));
    }

    out
}

fn render_section(record: &Record, options: &ExportOptions) -> String {
    let mut heading = format!("## {}", record.record_type.role_label());
    if options.include_timestamps
        && let Some(timestamp) = &record.timestamp
    {
        heading.push_str(&format!(" ({})", format_timestamp(timestamp)));
    }
    format!("{}\n\n{}\n", heading, flatten_content(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        serde_json::from_str(json).expect("record should parse")
    }

    #[test]
    fn test_render_headings_and_separators() {
        let user = record(r#"{"type":"user","timestamp":"2025-01-15T10:30:00Z","message":{"content":"Hello"}}"#);
        let assistant = record(r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Hi!"}]}}"#);
        let options = ExportOptions { include_timestamps: false, ..Default::default() };

        let out = render(&[&user, &assistant], "Debug session", &options, Utc::now());
        assert!(out.starts_with("# Debug session\n\n_Exported "));
        assert!(out.contains("## User\n\nHello\n"));
        assert!(out.contains("\n---\n\n## Assistant\n\nHi!\n"));
        assert_eq!(out.matches("---").count(), 2);
    }

    #[test]
    fn test_render_includes_timestamps_when_requested() {
        let user = record(r#"{"type":"user","timestamp":"2025-01-15T10:30:00Z","message":{"content":"Hello"}}"#);
        let options = ExportOptions { include_timestamps: true, ..Default::default() };

        let out = render(&[&user], "T", &options, Utc::now());
        let expected = format_timestamp(&user.timestamp.unwrap());
        assert!(out.contains(&format!("## User ({})", expected)));
    }

    #[test]
    fn test_render_empty_transcript() {
        let out = render(&[], "Empty", &ExportOptions::default(), Utc::now());
        assert!(out.starts_with("# Empty"));
        assert!(!out.contains("---"));
    }
}
