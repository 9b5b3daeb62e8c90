//! Message content resolution
//!
//! Turns a session's ordered records into render-ready [`ResolvedMessageView`]s. Tool
//! invocations are paired with their results even when the result arrives in a later
//! record, using a [`ToolCorrelationMap`] built over the whole session.
//!
//! Resolution is a pure, total transformation: malformed content units render nothing
//! and missing results leave the tool block unpaired.

pub mod classification;
pub mod code_fence;
pub mod correlation;
pub mod tool_params;

use std::collections::{HashMap, HashSet};

pub use classification::{MessageSignals, classify, expanded_by_default};
pub use code_fence::split_code_fences;
pub use correlation::ToolCorrelationMap;
pub use tool_params::extract_key_parameter;

use crate::models::{
    Content, ContentUnit, Record, ResolvedMessageView, ToolBlock, ToolOutcome, ViewBlock,
};

/// Resolves records one at a time against a session-wide correlation map
///
/// Remembers which results were already shown so each result is displayed once: beside
/// its invocation when one exists, otherwise as a standalone block.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    correlation: ToolCorrelationMap,
    paired: HashSet<String>,
    standalone: HashSet<String>,
}

impl MessageResolver {
    pub fn new(records: &[Record]) -> Self {
        Self::with_correlation(ToolCorrelationMap::from_records(records))
    }

    pub fn with_correlation(correlation: ToolCorrelationMap) -> Self {
        Self { correlation, paired: HashSet::new(), standalone: HashSet::new() }
    }

    pub fn correlation(&self) -> &ToolCorrelationMap {
        &self.correlation
    }

    pub fn resolve(&mut self, record: &Record) -> ResolvedMessageView {
        let mut signals = MessageSignals::from_record(record);
        let mut blocks = Vec::new();

        match record.content() {
            Some(Content::Text(text)) => push_text(&mut blocks, text),
            Some(Content::Units(units)) => {
                self.resolve_units(units, &mut blocks, &mut signals);
            }
            None => {}
        }

        let classification = classify(&record.record_type, &signals);
        ResolvedMessageView {
            uuid: record.uuid.clone(),
            record_type: record.record_type.clone(),
            timestamp: record.timestamp,
            blocks,
            classification,
            expanded_by_default: expanded_by_default(&signals, classification),
        }
    }

    fn resolve_units(
        &mut self,
        units: &[ContentUnit],
        blocks: &mut Vec<ViewBlock>,
        signals: &mut MessageSignals,
    ) {
        let mut local_invocations = HashSet::new();
        let mut local_results: HashMap<&str, ToolOutcome> = HashMap::new();
        for unit in units {
            match unit {
                ContentUnit::ToolInvocation { id, .. } => {
                    local_invocations.insert(id.as_str());
                }
                ContentUnit::ToolResult { tool_use_id, content, is_error } => {
                    local_results
                        .entry(tool_use_id.as_str())
                        .or_insert_with(|| ToolOutcome { payload: content.clone(), is_error: *is_error });
                }
                _ => {}
            }
        }

        let mut processed = HashSet::new();
        for unit in units {
            match unit {
                ContentUnit::Text { text } => push_text(blocks, text),
                ContentUnit::ToolInvocation { id, name, input } => {
                    if !processed.insert(id.as_str()) {
                        continue;
                    }
                    let result = local_results
                        .get(id.as_str())
                        .or_else(|| self.correlation.result_for(id))
                        .cloned();
                    if result.is_some() {
                        self.paired.insert(id.clone());
                    }
                    signals.has_tool = true;
                    blocks.push(ViewBlock::Tool(ToolBlock {
                        id: id.clone(),
                        name: name.clone(),
                        input: input.clone(),
                        key_parameter: extract_key_parameter(name, input),
                        result,
                    }));
                }
                ContentUnit::ToolResult { tool_use_id, content, is_error } => {
                    if self.correlation.has_result(tool_use_id) && self.paired.contains(tool_use_id) {
                        continue;
                    }
                    // Paired with an invocation of this same record
                    if local_invocations.contains(tool_use_id.as_str()) {
                        continue;
                    }
                    if !self.standalone.insert(tool_use_id.clone()) {
                        continue;
                    }
                    signals.has_tool_result = true;
                    blocks.push(ViewBlock::ToolResult {
                        tool_use_id: tool_use_id.clone(),
                        outcome: ToolOutcome { payload: content.clone(), is_error: *is_error },
                    });
                }
                ContentUnit::Reasoning { thinking } => {
                    signals.has_reasoning = true;
                    blocks.push(ViewBlock::Reasoning { text: thinking.clone() });
                }
                ContentUnit::Unknown => {}
            }
        }
    }
}

fn push_text(blocks: &mut Vec<ViewBlock>, text: &str) {
    let spans = split_code_fences(text);
    if !spans.is_empty() {
        blocks.push(ViewBlock::Text { spans });
    }
}

/// Resolve every record of a session into its render model
///
/// Records that hold nothing but results already paired with an invocation elsewhere in
/// the session are omitted; their results appear inside the invocation's tool block.
///
/// # Examples
///
/// ```
/// use transcript_explorer::models::{Classification, Record};
/// use transcript_explorer::resolve_session_view;
///
/// let record: Record =
///     serde_json::from_str(r#"{"type":"user","message":{"content":"hello"}}"#).unwrap();
/// let views = resolve_session_view(&[record]);
/// assert_eq!(views.len(), 1);
/// assert_eq!(views[0].classification, Classification::User);
/// ```
pub fn resolve_session_view(records: &[Record]) -> Vec<ResolvedMessageView> {
    let mut resolver = MessageResolver::new(records);
    let mut views = Vec::with_capacity(records.len());
    for record in records {
        if resolver.correlation().is_fully_suppressed(record) {
            continue;
        }
        views.push(resolver.resolve(record));
    }
    views
}
