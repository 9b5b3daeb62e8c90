use std::collections::{HashMap, HashSet};

use crate::models::{Content, ContentUnit, Record, ToolOutcome};

/// Session-wide index of tool results by invocation id
///
/// Built in one pass over every record of a session so an invocation can be paired with
/// a result that arrives in a later record.
#[derive(Debug, Clone, Default)]
pub struct ToolCorrelationMap {
    results: HashMap<String, ToolOutcome>,
    invocations: HashSet<String>,
}

impl ToolCorrelationMap {
    pub fn from_records(records: &[Record]) -> Self {
        let mut map = Self::default();
        for unit in records.iter().flat_map(Record::units) {
            match unit {
                ContentUnit::ToolResult { tool_use_id, content, is_error } => {
                    // First result recorded for an id wins
                    map.results.entry(tool_use_id.clone()).or_insert_with(|| ToolOutcome {
                        payload: content.clone(),
                        is_error: *is_error,
                    });
                }
                ContentUnit::ToolInvocation { id, .. } => {
                    map.invocations.insert(id.clone());
                }
                _ => {}
            }
        }
        map
    }

    pub fn result_for(&self, tool_use_id: &str) -> Option<&ToolOutcome> {
        self.results.get(tool_use_id)
    }

    pub fn has_result(&self, tool_use_id: &str) -> bool {
        self.results.contains_key(tool_use_id)
    }

    /// An invocation with this id exists somewhere in the session
    pub fn has_invocation(&self, tool_use_id: &str) -> bool {
        self.invocations.contains(tool_use_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether a record would only repeat results already shown beside their invocations
    ///
    /// True when the record holds at least one tool result, nothing but tool results, and
    /// every result belongs to an invocation present in the session.
    pub fn is_fully_suppressed(&self, record: &Record) -> bool {
        let Some(Content::Units(units)) = record.content() else {
            return false;
        };
        !units.is_empty()
            && units.iter().all(|unit| match unit {
                ContentUnit::ToolResult { tool_use_id, .. } => {
                    self.has_result(tool_use_id) && self.has_invocation(tool_use_id)
                }
                _ => false,
            })
    }
}
