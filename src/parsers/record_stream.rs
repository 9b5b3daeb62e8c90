use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Record;
use crate::utils::open_log_file;

/// One non-blank line of a log file
#[derive(Debug)]
pub enum StreamLine {
    Record(Box<Record>),
    /// The line is counted but did not parse as a record
    Malformed,
}

/// Lazy line-by-line reader over a JSONL log file
///
/// Blank lines are skipped before counting. Each remaining line is parsed on its own and
/// a parse failure (including invalid UTF-8) yields [`StreamLine::Malformed`] instead of
/// an error; only I/O failures are surfaced as `Err`.
pub struct RecordStream {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: usize,
}

impl RecordStream {
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_log_file(path)?;
        Ok(Self { path: path.to_path_buf(), reader: BufReader::new(file), buf: Vec::new(), line_number: 0 })
    }

    /// Only parsed records; I/O errors are passed through
    pub fn records(self) -> impl Iterator<Item = Result<Record>> {
        self.filter_map(|line| match line {
            Ok(StreamLine::Record(record)) => Some(Ok(*record)),
            Ok(StreamLine::Malformed) => None,
            Err(e) => Some(Err(e)),
        })
    }
}

impl Iterator for RecordStream {
    type Item = Result<StreamLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(Err(e).with_context(|| {
                        format!("Failed to read line from {}", self.path.display())
                    }));
                }
            }
            self.line_number += 1;

            if self.buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let parsed = std::str::from_utf8(&self.buf)
                .map_err(|e| e.to_string())
                .and_then(|line| parse_record_line(line).map_err(|e| e.to_string()));

            return Some(Ok(match parsed {
                Ok(record) => StreamLine::Record(Box::new(record)),
                Err(e) => {
                    log::trace!(
                        "Skipping malformed line {} in {}: {}",
                        self.line_number,
                        self.path.display(),
                        e
                    );
                    StreamLine::Malformed
                }
            }));
        }
    }
}

/// Parse one line as a record; only JSON objects qualify
fn parse_record_line(line: &str) -> serde_json::Result<Record> {
    if !line.trim_start().starts_with('{') {
        return Err(serde::de::Error::custom("record line is not a JSON object"));
    }
    serde_json::from_str(line)
}

/// Load every parsable record of a session file, in file order
pub fn load_session_records(path: &Path) -> Result<Vec<Record>> {
    RecordStream::open(path)?.records().collect()
}
