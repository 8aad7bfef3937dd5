//! # Quantum Chain - Span Rotation (Subsystem 18)
//!
//! **Bounded Context:** Sidechain validator rotation
//! **Architecture Compliance:** DDD + Hexagonal + TDD
//!
//! ## Purpose
//!
//! Sidechain block production is partitioned into numbered intervals called
//! spans. For each span this subsystem:
//! - Computes the block range from the configured span duration
//! - Selects a stake-weighted producer set from the eligible validators
//! - Seeds the selection with an external chain's block hash
//! - Persists the span, the last-span pointer and the seed pointer atomically
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - InMemoryKVStore / RocksDbStore                   │
//! │  - JSON / bincode span serializers                  │
//! │  - In-memory validator and seed sources             │
//! │  - SpanQueryHandler                                 │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: SpanRotationApi                         │
//! │  - Outbound: KeyValueStore, ValidatorSource,        │
//! │              SeedSource, SpanSerializer             │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - Span, Validator, ValidatorSet                    │
//! │  - Seeded weighted producer draws                   │
//! │  - Genesis state                                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Determinism**: the same seed, eligible set and producer count always
//!    yield the same producers in the same order
//! 2. **Canonical Order**: producers are sorted by signer address, then id
//! 3. **Atomic Freeze**: span record, last-span pointer and seed pointer are
//!    written in one batch or not at all
//! 4. **Seed Advance**: every successful freeze advances the seed pointer by 1
//! 5. **Page Cap**: listings return at most 20 spans
//!
//! ## Usage Example
//!
//! ```rust
//! use qc_18_span_rotation::{
//!     InMemoryKVStore, InMemorySeedSource, InMemoryValidatorSource, JsonSpanSerializer,
//!     SpanGenesis, SpanRotationApi, SpanRotationConfig, SpanRotationDependencies,
//!     SpanRotationService, Validator, ValidatorSet,
//! };
//! use primitive_types::H160;
//!
//! let validators: Vec<Validator> = (1..=6)
//!     .map(|id| Validator::new(id, 10, H160::from_low_u64_be(id), [0u8; 65]))
//!     .collect();
//! let source = InMemoryValidatorSource::new(validators.clone());
//!
//! let mut service = SpanRotationService::new(SpanRotationDependencies {
//!     kv_store: InMemoryKVStore::new(),
//!     validators: source,
//!     seed_source: InMemorySeedSource::with_synthetic_blocks(16),
//!     serializer: JsonSpanSerializer,
//! });
//!
//! let config = SpanRotationConfig::default();
//! let genesis = SpanGenesis::default_for(&config, ValidatorSet::new(validators)).unwrap();
//! service.init_genesis(&genesis).unwrap();
//!
//! let span = service.freeze_next_span(1, config.span_duration, &config.chain_id).unwrap();
//! assert_eq!(span.selected_producers.iter().map(|v| v.voting_power).sum::<i64>(), 4);
//! assert_eq!(service.get_last_span().unwrap(), span);
//! ```
//!
//! ## Module Structure
//!
//! - [`domain`]: Pure domain logic (entities, selection, genesis)
//! - [`ports`]: Hexagonal architecture interfaces (inbound/outbound)
//! - [`adapters`]: Port implementations and the query handler
//! - [`service`]: The span rotation service
//! - [`events`]: Span events for the host runtime

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;
pub mod telemetry;

mod config;
mod error;
mod metrics;

/// Subsystem identifier used as the event sender id
pub const SUBSYSTEM_ID: u8 = 18;

/// Largest page `list_spans` returns, whatever limit is requested
pub const MAX_SPAN_PAGE_LIMIT: u64 = 20;

pub use config::{LogConfig, SpanRotationConfig, DEFAULT_CHAIN_ID};
pub use error::{KVStoreError, Result, SeedSourceError, SerializationError, SpanError};
pub use metrics::{SpanMetrics, SpanMetricsSnapshot};

pub use domain::{
    Address, KeyPrefix, Param, PublicKey, SeedBlock, Span, SpanGenesis, SpanParams,
    StakingGenesis, Validator, ValidatorId, ValidatorSet,
};

pub use ports::inbound::{SpanPage, SpanRotationApi};
pub use ports::outbound::{BatchOperation, KeyValueStore, SeedSource, SpanSerializer, ValidatorSource};

pub use adapters::{
    BincodeSpanSerializer, InMemoryKVStore, InMemorySeedSource, InMemoryValidatorSource,
    JsonSpanSerializer, SpanQuery, SpanQueryHandler,
};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};

pub use events::{SpanAction, SpanEvent};
pub use service::{SharedSpanRotation, SpanRotationDependencies, SpanRotationService};
pub use telemetry::{init_logging, TelemetryError};
