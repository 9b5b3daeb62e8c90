//! Data models for assistant transcript logs.
//!
//! - [`Record`] - One parsed log line with its [`Content`] union
//! - [`SessionSummary`] / [`ProjectIndexEntry`] - The two-level session index
//! - [`ResolvedMessageView`] - Render model produced by the resolver
//!
//! Records are decoded best-effort through the lenient deserializers in
//! `parsers::deserializers`.

pub mod record;
pub mod session;
pub mod view;

pub use record::{Content, ContentUnit, InternalMessageType, Message, Record, RecordType, TokenUsage};
pub use session::{ProjectIndexEntry, SessionSummary, find_session};
pub use view::{
    Classification, ResolvedMessageView, TextSpan, ToolBlock, ToolOutcome, ViewBlock,
};
