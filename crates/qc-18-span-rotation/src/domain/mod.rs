//! # Domain Layer
//!
//! Pure domain logic for span rotation. No I/O happens here.
//!
//! ## Modules
//!
//! - `entities` - Validator, ValidatorSet, Span, SeedBlock
//! - `params` - Parameter registry snapshot and defaults
//! - `keys` - Key layout in the key-value store
//! - `selection` - Seeded, stake-weighted producer draws
//! - `genesis` - Staking and span genesis state

pub mod entities;
pub mod genesis;
pub mod keys;
pub mod params;
pub mod selection;

pub use entities::{
    sort_by_address, span_end_block, Address, PublicKey, SeedBlock, Span, Validator,
    ValidatorId, ValidatorSet,
};
pub use genesis::{SpanGenesis, StakingGenesis};
pub use keys::{KeyPrefix, Param};
pub use params::{SpanParams, DEFAULT_PRODUCER_COUNT, DEFAULT_SPAN_DURATION, DEFAULT_SPRINT_DURATION};
pub use selection::{
    draw_producer_ids, resolve_producers, tally_draws, ResolvedProducers, SeedStream,
    WeightedRanges, SELECTION_DOMAIN,
};
