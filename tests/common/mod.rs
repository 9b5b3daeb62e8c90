//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a temporary log root (one directory per project)
pub struct LogRootBuilder {
    temp_dir: TempDir,
}

impl LogRootBuilder {
    /// Create a new builder with an empty log root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the log root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory holding the given session files
    pub fn with_project(self, name: &str, files: &[SessionFileBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join(name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for file in files {
            file.create_in(&project_dir);
        }
        self
    }

    /// Add a raw file at a path relative to the root
    pub fn with_raw_file(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write raw file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for LogRootBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `.jsonl` session file
pub struct SessionFileBuilder {
    filename: String,
    lines: Vec<String>,
}

impl SessionFileBuilder {
    pub fn new(filename: &str) -> Self {
        Self { filename: filename.to_string(), lines: Vec::new() }
    }

    /// Append a record line
    pub fn with_record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Append a raw line (possibly malformed)
    pub fn with_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.filename)
    }

    /// Create the file in the given directory
    pub fn create_in(&self, dir: &Path) {
        let mut content = self.lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(self.path_in(dir), content).expect("Failed to write session file");
    }
}

/// Builder for a single log record
pub struct RecordBuilder {
    record: Value,
}

impl RecordBuilder {
    fn with_type(record_type: &str) -> Self {
        Self {
            record: json!({
                "type": record_type,
                "sessionId": "session-1",
                "timestamp": "2025-01-15T10:00:00Z",
                "message": {"role": record_type, "content": "Test message"},
            }),
        }
    }

    /// Create a user record
    pub fn user() -> Self {
        Self::with_type("user")
    }

    /// Create an assistant record
    pub fn assistant() -> Self {
        Self::with_type("assistant")
    }

    /// Create a system record
    pub fn system() -> Self {
        Self::with_type("system")
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.record["sessionId"] = json!(session_id);
        self
    }

    pub fn without_session_id(mut self) -> Self {
        if let Some(map) = self.record.as_object_mut() {
            map.remove("sessionId");
        }
        self
    }

    /// Set the timestamp (RFC 3339)
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.record["timestamp"] = json!(timestamp);
        self
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.record["uuid"] = json!(uuid);
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.record["cwd"] = json!(cwd);
        self
    }

    pub fn meta(mut self) -> Self {
        self.record["isMeta"] = json!(true);
        self
    }

    pub fn internal_type(mut self, internal_type: &str) -> Self {
        self.record["internalMessageType"] = json!(internal_type);
        self
    }

    /// Set plain string content
    pub fn text(mut self, text: &str) -> Self {
        self.record["message"]["content"] = json!(text);
        self
    }

    /// Set content units (see the `*_block` helpers)
    pub fn blocks(mut self, blocks: Vec<Value>) -> Self {
        self.record["message"]["content"] = Value::Array(blocks);
        self
    }

    pub fn usage(mut self, input: u64, output: u64) -> Self {
        self.record["message"]["usage"] = json!({"input_tokens": input, "output_tokens": output});
        self
    }

    pub fn to_json(&self) -> String {
        self.record.to_string()
    }
}

pub fn text_block(text: &str) -> Value {
    json!({"type": "text", "text": text})
}

pub fn tool_use_block(id: &str, name: &str, input: Value) -> Value {
    json!({"type": "tool_use", "id": id, "name": name, "input": input})
}

pub fn tool_result_block(tool_use_id: &str, content: &str, is_error: bool) -> Value {
    json!({"type": "tool_result", "tool_use_id": tool_use_id, "content": content, "is_error": is_error})
}

pub fn thinking_block(text: &str) -> Value {
    json!({"type": "thinking", "thinking": text})
}

/// A session file of `count` alternating user/assistant records
pub fn conversation_file(filename: &str, session_id: &str, count: usize) -> SessionFileBuilder {
    (0..count).fold(SessionFileBuilder::new(filename), |file, i| {
        let record = if i % 2 == 0 { RecordBuilder::user() } else { RecordBuilder::assistant() };
        file.with_record(
            record
                .session_id(session_id)
                .timestamp(&format!("2025-01-15T10:{:02}:00Z", i % 60))
                .text(&format!("Message {}", i)),
        )
    })
}
