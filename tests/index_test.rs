/// End-to-end tests for the session index
///
/// These tests build real log roots on disk and verify the index invariants
mod common;

use std::collections::HashSet;

use common::{LogRootBuilder, RecordBuilder, SessionFileBuilder, conversation_file};
use transcript_explorer::models::find_session;
use transcript_explorer::build_session_index;
use transcript_explorer::indexer::NO_PROMPT_PLACEHOLDER;

#[test]
fn test_duplicate_session_first_file_wins() {
    let root = LogRootBuilder::new()
        .with_project("proj1", &[conversation_file("a.jsonl", "s1", 10), conversation_file("b.jsonl", "s1", 5)])
        .build();

    let index = build_session_index(root.path());
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].name, "proj1");
    assert_eq!(index[0].sessions.len(), 1);

    let session = &index[0].sessions[0];
    assert_eq!(session.session_id, "s1");
    assert_eq!(session.message_count, 10);
    assert_eq!(session.file_path, root.path().join("proj1").join("a.jsonl"));
}

#[test]
fn test_duplicate_session_across_projects() {
    let root = LogRootBuilder::new()
        .with_project("beta", &[conversation_file("x.jsonl", "shared", 3)])
        .with_project("alpha", &[conversation_file("y.jsonl", "shared", 7), conversation_file("z.jsonl", "own", 2)])
        .build();

    let index = build_session_index(root.path());
    let session = find_session(&index, "shared").expect("shared session indexed");
    // "alpha" enumerates before "beta"
    assert_eq!(session.message_count, 7);
    assert_eq!(session.project_path, root.path().join("alpha"));
}

#[test]
fn test_session_ids_unique() {
    let root = LogRootBuilder::new()
        .with_project("p1", &[conversation_file("a.jsonl", "s1", 2), conversation_file("b.jsonl", "s2", 2)])
        .with_project("p2", &[conversation_file("c.jsonl", "s2", 2), conversation_file("d.jsonl", "s3", 2)])
        .with_project("p3", &[conversation_file("e.jsonl", "s1", 2), conversation_file("f.jsonl", "s3", 2)])
        .build();

    let index = build_session_index(root.path());
    let ids: Vec<&str> = index.iter().flat_map(|p| p.sessions.iter()).map(|s| s.session_id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(unique.len(), 3);
    // p3 contributes nothing and is dropped
    assert!(index.iter().all(|p| p.name != "p3"));
}

#[test]
fn test_sessions_and_projects_ordered_by_recency() {
    let session = |file: &str, id: &str, last: &str| {
        SessionFileBuilder::new(file)
            .with_record(RecordBuilder::user().session_id(id).timestamp("2025-01-01T00:00:00Z"))
            .with_record(RecordBuilder::assistant().session_id(id).timestamp(last))
    };
    let root = LogRootBuilder::new()
        .with_project(
            "old",
            &[session("1.jsonl", "o1", "2025-01-02T00:00:00Z"), session("2.jsonl", "o2", "2025-01-05T00:00:00Z")],
        )
        .with_project(
            "new",
            &[
                session("1.jsonl", "n1", "2025-03-01T00:00:00Z"),
                session("2.jsonl", "n2", "2025-02-01T00:00:00Z"),
                session("3.jsonl", "n3", "2025-04-01T00:00:00Z"),
            ],
        )
        .build();

    let index = build_session_index(root.path());
    let names: Vec<&str> = index.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["new", "old"]);

    for project in &index {
        for pair in project.sessions.windows(2) {
            assert!(pair[0].last_message_timestamp >= pair[1].last_message_timestamp);
        }
    }
    let ids: Vec<&str> = index[0].sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["n3", "n1", "n2"]);
}

#[test]
fn test_empty_and_unparsable_files_excluded() {
    let mut garbage = SessionFileBuilder::new("garbage.jsonl");
    for i in 0..10 {
        garbage = garbage.with_line(&format!("not json {}", i));
    }
    // A valid record after the header window does not rescue the file
    garbage = garbage.with_record(RecordBuilder::user().session_id("late"));

    let root = LogRootBuilder::new()
        .with_project("proj", &[garbage, conversation_file("good.jsonl", "good", 2)])
        .with_raw_file("proj/empty.jsonl", "")
        .with_raw_file("proj/blank.jsonl", "\n   \n\t\n")
        .build();

    let index = build_session_index(root.path());
    assert_eq!(index.len(), 1);
    let ids: Vec<&str> = index[0].sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["good"]);
}

#[test]
fn test_file_without_session_id_skipped() {
    let file = SessionFileBuilder::new("anon.jsonl").with_record(RecordBuilder::user().without_session_id());
    let root = LogRootBuilder::new().with_project("proj", &[file]).build();

    assert!(build_session_index(root.path()).is_empty());
}

#[test]
fn test_missing_root_yields_empty_index() {
    let root = LogRootBuilder::new().build();
    assert!(build_session_index(&root.path().join("does-not-exist")).is_empty());
}

#[test]
fn test_summary_fields() {
    let file = SessionFileBuilder::new("s.jsonl")
        .with_record(RecordBuilder::system().session_id("s").timestamp("2025-01-15T09:00:00Z").cwd("/work/app"))
        .with_record(RecordBuilder::user().session_id("s").meta().text("<command-name>/clear</command-name>"))
        .with_record(RecordBuilder::user().session_id("s").text("Why does the build fail on CI?"))
        .with_line("{broken")
        .with_record(RecordBuilder::assistant().session_id("s").timestamp("2025-01-15T09:30:00Z").usage(100, 20))
        .with_line("")
        .with_record(RecordBuilder::assistant().session_id("s").timestamp("2025-01-15T10:00:00Z").usage(50, 5));
    let root = LogRootBuilder::new().with_project("-work-app", &[file]).build();

    let index = build_session_index(root.path());
    let session = &index[0].sessions[0];

    assert_eq!(session.first_message_timestamp.unwrap().to_rfc3339(), "2025-01-15T09:00:00+00:00");
    assert_eq!(session.last_message_timestamp.unwrap().to_rfc3339(), "2025-01-15T10:00:00+00:00");
    // Blank lines are not counted, the malformed one is
    assert_eq!(session.message_count, 6);
    assert_eq!(session.first_user_message_preview, "Why does the build fail on CI?");
    assert_eq!(session.cwd.as_deref(), Some("/work/app"));
    assert_eq!(session.token_usage.input_tokens, 150);
    assert_eq!(session.token_usage.output_tokens, 25);
}

#[test]
fn test_preview_placeholder_when_header_has_no_prompt() {
    let file = SessionFileBuilder::new("s.jsonl")
        .with_record(RecordBuilder::assistant().session_id("s"))
        .with_record(RecordBuilder::user().session_id("s").internal_type("hook").text("hook output"));
    let root = LogRootBuilder::new().with_project("proj", &[file]).build();

    let index = build_session_index(root.path());
    assert_eq!(index[0].sessions[0].first_user_message_preview, NO_PROMPT_PLACEHOLDER);
}

#[test]
fn test_invalid_utf8_line_counted_not_fatal() {
    let root = LogRootBuilder::new().with_project("proj", &[]).build();
    let mut content = RecordBuilder::user().session_id("s1").text("Start").to_json().into_bytes();
    content.extend_from_slice(b"\n\xff\xfe garbage\n");
    content.extend_from_slice(RecordBuilder::assistant().session_id("s1").to_json().as_bytes());
    content.push(b'\n');
    std::fs::write(root.path().join("proj").join("a.jsonl"), content).unwrap();

    let index = build_session_index(root.path());
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].sessions[0].session_id, "s1");
    assert_eq!(index[0].sessions[0].message_count, 3);

    let records = transcript_explorer::load_session_records(&index[0].sessions[0].file_path).unwrap();
    assert_eq!(records.len(), 2);
}
