//! # Inbound Ports (Driving Ports)
//!
//! The API span rotation exposes to the host runtime.

use crate::domain::entities::{Span, Validator};
use crate::domain::params::SpanParams;
use crate::error::Result;
use primitive_types::U256;

/// One page of a span listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanPage {
    /// Decoded spans in ascending id order
    pub spans: Vec<Span>,
    /// Records in the window that failed to decode
    pub skipped: usize,
}

/// Primary API for the span rotation subsystem.
///
/// Mutating methods take `&mut self`; the host serializes writers.
pub trait SpanRotationApi {
    // ---------------------------------------------------------------------
    // Span store
    // ---------------------------------------------------------------------

    /// Persist `span` and move the last-span pointer to `span.id`.
    ///
    /// Both writes land in one atomic batch. Id monotonicity is the caller's
    /// responsibility.
    ///
    /// ## Errors
    ///
    /// - `Encoding`: the span could not be serialized
    /// - `Store`: the batch write failed
    fn add_span(&mut self, span: Span) -> Result<()>;

    /// Persist `span` without touching the last-span pointer.
    ///
    /// Used for backfill and repair.
    fn add_raw_span(&mut self, span: Span) -> Result<()>;

    /// Read a span by id.
    ///
    /// ## Errors
    ///
    /// - `SpanNotFound`: no span with this id
    /// - `Encoding`: the stored record does not decode
    fn get_span(&self, id: u64) -> Result<Span>;

    /// Stored bytes of span `id`, in the store's serializer encoding.
    ///
    /// ## Errors
    ///
    /// - `SpanNotFound`: no span with this id
    fn get_span_record(&self, id: u64) -> Result<Vec<u8>>;

    /// Read the span behind the last-span pointer (0 when unset).
    ///
    /// ## Errors
    ///
    /// - `SpanNotFound`: the pointer refers to a span that was never written
    fn get_last_span(&self) -> Result<Span>;

    /// Current value of the last-span pointer (0 when unset).
    fn last_span_id(&self) -> Result<u64>;

    /// Spans in ascending id order.
    ///
    /// `page` is 1-based (0 reads as 1) and at most `min(limit, 20)` spans
    /// are returned. Undecodable records are skipped.
    fn list_spans(&self, page: u64, limit: u64) -> Result<Vec<Span>> {
        Ok(self.list_spans_report(page, limit)?.spans)
    }

    /// [`list_spans`](Self::list_spans), also reporting how many records were skipped.
    fn list_spans_report(&self, page: u64, limit: u64) -> Result<SpanPage>;

    /// Every decodable span in ascending id order.
    fn get_all_spans(&self) -> Result<Vec<Span>> {
        Ok(self.get_all_spans_report()?.spans)
    }

    /// [`get_all_spans`](Self::get_all_spans), also reporting how many records were skipped.
    fn get_all_spans_report(&self) -> Result<SpanPage>;

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Select producers, build span `id` starting at `start_block`, and
    /// commit it together with the last-span and seed pointers.
    ///
    /// On error nothing is written.
    ///
    /// ## Errors
    ///
    /// - `ProducerCountUnset`: the registry has no producer count
    /// - `SeedUnavailable`: the seed source failed
    /// - `InvalidBlockRange`: the end block overflows
    /// - `NoVotingPower` / `VotingPowerOverflow`: the eligible set cannot be drawn from
    fn freeze_next_span(&mut self, id: u64, start_block: u64, chain_id: &str) -> Result<Span>;

    /// Producers the next freeze would select, without writing anything.
    fn select_producers(&self) -> Result<Vec<Validator>>;

    // ---------------------------------------------------------------------
    // Seed pointer
    // ---------------------------------------------------------------------

    /// Index of the last consumed seed block (0 when unset).
    fn get_seed_pointer(&self) -> Result<U256>;

    /// Overwrite the seed pointer. Administrative.
    fn set_seed_pointer(&mut self, value: U256) -> Result<()>;

    /// Increment the seed pointer by one and return the new value.
    fn advance_seed_pointer(&mut self) -> Result<U256>;

    // ---------------------------------------------------------------------
    // Parameter registry
    // ---------------------------------------------------------------------

    /// Span length in blocks (0 when unset).
    fn span_duration(&self) -> Result<u64>;

    /// Set the span length.
    fn set_span_duration(&mut self, value: u64) -> Result<()>;

    /// Sprint length in blocks (0 when unset).
    fn sprint_duration(&self) -> Result<u64>;

    /// Set the sprint length.
    fn set_sprint_duration(&mut self, value: u64) -> Result<()>;

    /// Producers per span.
    ///
    /// ## Errors
    ///
    /// - `ProducerCountUnset`: never set
    fn producer_count(&self) -> Result<u64>;

    /// Set the producer count.
    fn set_producer_count(&mut self, value: u64) -> Result<()>;

    /// Snapshot of all parameters.
    fn params(&self) -> Result<SpanParams>;

    /// Write all parameters in one batch. An unset producer count is removed.
    fn set_params(&mut self, params: SpanParams) -> Result<()>;

    /// Number of parameter writes so far.
    fn params_version(&self) -> Result<u64>;
}
