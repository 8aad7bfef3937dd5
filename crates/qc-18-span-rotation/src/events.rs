//! Span events emitted to the host runtime

use crate::domain::entities::Span;
use serde::{Deserialize, Serialize};

/// Current event schema version
pub const EVENT_VERSION: u16 = 1;

/// Attribute keys carried by every span event
pub mod tags {
    /// `freeze-set` or `add-span`
    pub const ACTION: &str = "action";
    /// Span id
    pub const SPAN_ID: &str = "span-id";
    /// First block of the span
    pub const START_BLOCK: &str = "start-block";
    /// Last block of the span
    pub const END_BLOCK: &str = "end-block";
    /// Sidechain id
    pub const CHAIN_ID: &str = "chain-id";
    /// Number of distinct selected producers
    pub const PRODUCER_COUNT: &str = "producer-count";
    /// Always `true`; failures emit nothing
    pub const SUCCESS: &str = "success";
}

/// What produced the event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanAction {
    /// A span was frozen with fresh producer selection
    FreezeSet,
    /// A span was added directly
    AddSpan,
}

impl SpanAction {
    /// Attribute value of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanAction::FreezeSet => "freeze-set",
            SpanAction::AddSpan => "add-span",
        }
    }
}

/// A committed span
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEvent {
    /// Event version
    pub version: u16,

    /// Sender subsystem ID
    pub sender_id: u8,

    /// Origin of the span
    pub action: SpanAction,

    /// Span id
    pub span_id: u64,

    /// First block
    pub start_block: u64,

    /// Last block
    pub end_block: u64,

    /// Sidechain id
    pub chain_id: String,

    /// Distinct selected producers
    pub producer_count: u64,
}

impl SpanEvent {
    /// Describe `span` as committed by `action`
    pub fn from_span(action: SpanAction, span: &Span) -> Self {
        Self {
            version: EVENT_VERSION,
            sender_id: crate::SUBSYSTEM_ID,
            action,
            span_id: span.id,
            start_block: span.start_block,
            end_block: span.end_block,
            chain_id: span.chain_id.clone(),
            producer_count: span.selected_producers.len() as u64,
        }
    }

    /// Flat key/value attributes in emission order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (tags::ACTION, self.action.as_str().to_string()),
            (tags::SPAN_ID, self.span_id.to_string()),
            (tags::START_BLOCK, self.start_block.to_string()),
            (tags::END_BLOCK, self.end_block.to_string()),
            (tags::CHAIN_ID, self.chain_id.clone()),
            (tags::PRODUCER_COUNT, self.producer_count.to_string()),
            (tags::SUCCESS, "true".to_string()),
        ]
    }

    /// Value of a single attribute
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}
