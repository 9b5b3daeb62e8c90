use crate::models::{Classification, InternalMessageType, Record, RecordType};

/// Facts about a resolved record that decide its classification
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageSignals {
    pub is_meta: bool,
    pub is_hook: bool,
    pub is_internal_type: bool,
    pub has_tool: bool,
    pub has_tool_result: bool,
    pub has_reasoning: bool,
}

impl MessageSignals {
    pub fn from_record(record: &Record) -> Self {
        Self {
            is_meta: record.is_meta,
            is_hook: matches!(record.internal_message_type, Some(InternalMessageType::Hook)),
            is_internal_type: record.internal_message_type.is_some(),
            ..Self::default()
        }
    }
}

type Rule = (fn(&MessageSignals) -> bool, Classification);

/// Classification rules in priority order; the first matching rule decides
const RULES: &[Rule] = &[
    (|s| s.is_meta, Classification::Internal),
    (|s| s.is_hook, Classification::Hook),
    (|s| s.is_internal_type, Classification::Internal),
    (|s| s.has_tool, Classification::Tool),
    (|s| s.has_tool_result, Classification::ToolResult),
    (|s| s.has_reasoning, Classification::Thinking),
];

pub fn classify(record_type: &RecordType, signals: &MessageSignals) -> Classification {
    RULES
        .iter()
        .find(|(applies, _)| applies(signals))
        .map(|&(_, tag)| tag)
        .unwrap_or_else(|| base_classification(record_type))
}

fn base_classification(record_type: &RecordType) -> Classification {
    match record_type {
        RecordType::User => Classification::User,
        RecordType::Assistant => Classification::Assistant,
        _ => Classification::System,
    }
}

/// Whether a message starts expanded
///
/// Meta records, records with tool blocks and background classifications start
/// collapsed so tool chatter doesn't bury the conversation.
pub fn expanded_by_default(signals: &MessageSignals, classification: Classification) -> bool {
    !(signals.is_meta || signals.has_tool || classification.is_background())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_classification_from_record_type() {
        let signals = MessageSignals::default();
        assert_eq!(classify(&RecordType::User, &signals), Classification::User);
        assert_eq!(classify(&RecordType::Assistant, &signals), Classification::Assistant);
        assert_eq!(classify(&RecordType::System, &signals), Classification::System);
        assert_eq!(classify(&RecordType::Other("summary".into()), &signals), Classification::System);
    }

    #[test]
    fn test_content_signals_override_base() {
        let tool = MessageSignals { has_tool: true, has_reasoning: true, ..Default::default() };
        assert_eq!(classify(&RecordType::Assistant, &tool), Classification::Tool);

        let result = MessageSignals { has_tool_result: true, ..Default::default() };
        assert_eq!(classify(&RecordType::User, &result), Classification::ToolResult);

        let thinking = MessageSignals { has_reasoning: true, ..Default::default() };
        assert_eq!(classify(&RecordType::Assistant, &thinking), Classification::Thinking);
    }

    #[test]
    fn test_internal_markers_override_content() {
        let hook = MessageSignals { is_hook: true, is_internal_type: true, has_tool: true, ..Default::default() };
        assert_eq!(classify(&RecordType::User, &hook), Classification::Hook);

        let terminal = MessageSignals { is_internal_type: true, ..Default::default() };
        assert_eq!(classify(&RecordType::User, &terminal), Classification::Internal);

        let meta_hook = MessageSignals { is_meta: true, is_hook: true, is_internal_type: true, ..Default::default() };
        assert_eq!(classify(&RecordType::User, &meta_hook), Classification::Internal);
    }

    #[test]
    fn test_default_visibility() {
        let plain = MessageSignals::default();
        assert!(expanded_by_default(&plain, Classification::User));
        assert!(expanded_by_default(&plain, Classification::Assistant));

        let meta = MessageSignals { is_meta: true, ..Default::default() };
        assert!(!expanded_by_default(&meta, Classification::User));

        let tool = MessageSignals { has_tool: true, ..Default::default() };
        assert!(!expanded_by_default(&tool, Classification::Hook));
        assert!(!expanded_by_default(&plain, Classification::Thinking));
        assert!(!expanded_by_default(&plain, Classification::ToolResult));
    }
}
