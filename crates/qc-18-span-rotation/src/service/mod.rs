//! # Span Rotation Service
//!
//! The main service implementing [`SpanRotationApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Owns the span records, the last-span pointer and the seed pointer
//! 2. Reads the parameter registry from the same store
//! 3. Calls the validator and seed sources through outbound ports
//! 4. Commits every state change as a single atomic batch

mod freeze;
mod genesis;
mod helpers;
mod storage;
#[cfg(test)]
mod tests;

use crate::adapters::JsonSpanSerializer;
use crate::domain::entities::{Span, Validator};
use crate::domain::keys::{KeyPrefix, Param};
use crate::domain::params::SpanParams;
use crate::error::{Result, SpanError};
use crate::events::{SpanAction, SpanEvent};
use crate::metrics::SpanMetrics;
use crate::ports::inbound::{SpanPage, SpanRotationApi};
use crate::ports::outbound::{
    BatchOperation, KeyValueStore, SeedSource, SpanSerializer, ValidatorSource,
};
use parking_lot::RwLock;
use primitive_types::U256;
use std::sync::Arc;

/// A service shared between the host's readers and its single writer.
pub type SharedSpanRotation<KV, VS, SS, SER = JsonSpanSerializer> =
    Arc<RwLock<SpanRotationService<KV, VS, SS, SER>>>;

/// The Span Rotation Service.
pub struct SpanRotationService<KV, VS, SS, SER = JsonSpanSerializer>
where
    KV: KeyValueStore,
    VS: ValidatorSource,
    SS: SeedSource,
    SER: SpanSerializer,
{
    /// Key-value store holding spans, pointers and parameters.
    pub(crate) kv_store: KV,
    /// Staking subsystem view.
    pub(crate) validators: VS,
    /// External chain used for selection seeds.
    pub(crate) seed_source: SS,
    /// Span record codec.
    pub(crate) serializer: SER,
    /// Counters.
    pub(crate) metrics: SpanMetrics,
    /// Events queued for the host.
    pub(crate) events: Vec<SpanEvent>,
}

/// Dependencies for SpanRotationService
pub struct SpanRotationDependencies<KV, VS, SS, SER = JsonSpanSerializer> {
    /// Key-value store
    pub kv_store: KV,
    /// Validator source
    pub validators: VS,
    /// Seed source
    pub seed_source: SS,
    /// Span serializer
    pub serializer: SER,
}

impl<KV, VS, SS, SER> SpanRotationService<KV, VS, SS, SER>
where
    KV: KeyValueStore,
    VS: ValidatorSource,
    SS: SeedSource,
    SER: SpanSerializer,
{
    /// Create a new service over the given dependencies.
    ///
    /// The store may already hold state; nothing is read at construction.
    pub fn new(deps: SpanRotationDependencies<KV, VS, SS, SER>) -> Self {
        Self {
            kv_store: deps.kv_store,
            validators: deps.validators,
            seed_source: deps.seed_source,
            serializer: deps.serializer,
            metrics: SpanMetrics::new(),
            events: Vec::new(),
        }
    }

    /// Wrap the service for sharing across threads.
    pub fn into_shared(self) -> SharedSpanRotation<KV, VS, SS, SER> {
        Arc::new(RwLock::new(self))
    }

    /// Counters collected so far.
    pub fn metrics(&self) -> &SpanMetrics {
        &self.metrics
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SpanEvent> {
        std::mem::take(&mut self.events)
    }

    /// The underlying key-value store.
    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    /// Mutable access to the key-value store, for repair tooling.
    pub fn kv_store_mut(&mut self) -> &mut KV {
        &mut self.kv_store
    }

    /// The validator source.
    pub fn validator_source(&self) -> &VS {
        &self.validators
    }

    /// Mutable access to the validator source.
    pub fn validator_source_mut(&mut self) -> &mut VS {
        &mut self.validators
    }

    /// The seed source.
    pub fn seed_source(&self) -> &SS {
        &self.seed_source
    }

    /// Mutable access to the seed source.
    pub fn seed_source_mut(&mut self) -> &mut SS {
        &mut self.seed_source
    }

    /// The span serializer.
    pub fn serializer(&self) -> &SER {
        &self.serializer
    }
}
