//! # Span Query Handler
//!
//! Read-only pass-through for the checkpoint and query layer. Single-span
//! answers are the stored record, in whatever encoding the store's
//! `SpanSerializer` uses. Every other answer is JSON.

use crate::error::{Result, SpanError};
use crate::ports::inbound::SpanRotationApi;
use serde::{Deserialize, Serialize};

/// Read-only queries answered by [`SpanQueryHandler`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum SpanQuery {
    /// A span by id
    Span {
        /// Span id
        id: u64,
    },
    /// The span behind the last-span pointer
    LatestSpan,
    /// One page of spans
    SpanList {
        /// 1-based page
        page: u64,
        /// Page size, capped at 20
        limit: u64,
    },
    /// Producers the next freeze would select
    NextProducers,
    /// The parameter registry
    Params,
    /// The seed pointer
    SeedPointer,
}

/// Answers [`SpanQuery`] values against a span rotation service.
pub struct SpanQueryHandler<'a, S: SpanRotationApi> {
    service: &'a S,
}

impl<'a, S: SpanRotationApi> SpanQueryHandler<'a, S> {
    /// Create a handler over `service`
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Answer `query`
    pub fn handle(&self, query: &SpanQuery) -> Result<Vec<u8>> {
        tracing::debug!(?query, "[qc-18] Handling span query");
        match query {
            SpanQuery::Span { id } => self.service.get_span_record(*id),
            SpanQuery::LatestSpan => {
                let id = self.service.last_span_id()?;
                self.service.get_span_record(id)
            }
            SpanQuery::SpanList { page, limit } => {
                to_json(&self.service.list_spans(*page, *limit)?)
            }
            SpanQuery::NextProducers => to_json(&self.service.select_producers()?),
            SpanQuery::Params => to_json(&self.service.params()?),
            SpanQuery::SeedPointer => to_json(&self.service.get_seed_pointer()?),
        }
    }

    /// Decode a JSON query and answer it
    pub fn handle_raw(&self, request: &[u8]) -> Result<Vec<u8>> {
        let query: SpanQuery = serde_json::from_slice(request).map_err(|e| SpanError::Encoding {
            message: format!("invalid query: {e}"),
        })?;
        self.handle(&query)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SpanError::Encoding {
        message: e.to_string(),
    })
}
