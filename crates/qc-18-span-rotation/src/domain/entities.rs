//! Span rotation domain entities
//!
//! Validators come from the staking subsystem; spans are owned here and are
//! append-only once committed.

use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Numeric validator identifier assigned by the staking subsystem
pub type ValidatorId = u64;

/// Chain address controlling a validator
pub type Address = H160;

/// Uncompressed secp256k1 public key
pub type PublicKey = [u8; 65];

/// A staking validator as seen by span rotation.
///
/// For members of [`Span::selected_producers`], `voting_power` holds the
/// number of times the validator was drawn, not its stake.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Staking id
    pub id: ValidatorId,
    /// First epoch of the validity window
    pub start_epoch: u64,
    /// Exclusive end of the validity window, 0 while no exit is scheduled
    pub end_epoch: u64,
    /// Signing key
    #[serde_as(as = "Hex")]
    pub public_key: PublicKey,
    /// Stake-derived power, or draw count for selected producers
    pub voting_power: i64,
    /// Controlling address
    pub signer: Address,
}

impl Validator {
    /// Create a validator with an open-ended validity window starting at epoch 0
    pub fn new(id: ValidatorId, voting_power: i64, signer: Address, public_key: PublicKey) -> Self {
        Self {
            id,
            start_epoch: 0,
            end_epoch: 0,
            public_key,
            voting_power,
            signer,
        }
    }

    /// Set the validity window
    pub fn with_epochs(mut self, start_epoch: u64, end_epoch: u64) -> Self {
        self.start_epoch = start_epoch;
        self.end_epoch = end_epoch;
        self
    }

    /// Whether the validator is active at `epoch`
    pub fn is_active_at(&self, epoch: u64) -> bool {
        self.start_epoch <= epoch && (self.end_epoch == 0 || epoch < self.end_epoch)
    }

    /// Whether an exit has been scheduled for this validator
    pub fn is_exiting(&self) -> bool {
        self.end_epoch != 0
    }

    /// Selection weight: voting power clamped at zero
    pub fn weight(&self) -> u64 {
        self.voting_power.max(0) as u64
    }
}

/// Sort validators into canonical order: signer address ascending, then id.
pub fn sort_by_address(validators: &mut [Validator]) {
    validators.sort_by(|a, b| a.signer.cmp(&b.signer).then(a.id.cmp(&b.id)));
}

/// Snapshot of the staking validator set
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    /// Members in staking-store order
    pub validators: Vec<Validator>,
}

impl ValidatorSet {
    /// Create a new validator set
    pub fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    /// Get the number of validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Check if a validator is in the set
    pub fn contains(&self, id: ValidatorId) -> bool {
        self.validators.iter().any(|v| v.id == id)
    }

    /// Get validator by id
    pub fn get(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.iter().find(|v| v.id == id)
    }

    /// Aggregate voting power (negative powers count as zero)
    pub fn total_voting_power(&self) -> u64 {
        self.validators
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.weight()))
    }
}

/// A numbered sidechain block interval with its producer set
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Sequential span id
    #[serde(rename = "span_id")]
    pub id: u64,
    /// First sidechain block of the span
    pub start_block: u64,
    /// Last sidechain block of the span (inclusive)
    pub end_block: u64,
    /// Full validator set at freeze time
    pub validator_set: ValidatorSet,
    /// Producers sorted by signer address, powers are draw counts
    pub selected_producers: Vec<Validator>,
    /// Sidechain this span governs
    pub chain_id: String,
}

impl Span {
    /// Create a new span
    pub fn new(
        id: u64,
        start_block: u64,
        end_block: u64,
        validator_set: ValidatorSet,
        selected_producers: Vec<Validator>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start_block,
            end_block,
            validator_set,
            selected_producers,
            chain_id: chain_id.into(),
        }
    }

    /// Whether `block` falls inside this span
    pub fn contains_block(&self, block: u64) -> bool {
        self.start_block <= block && block <= self.end_block
    }

    /// Sum of producer selection weights
    pub fn producer_weight(&self) -> u64 {
        self.selected_producers
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.weight()))
    }
}

/// Compute the last block of a span starting at `start_block`.
///
/// A zero duration yields an open-ended span with `end_block == start_block`.
/// Returns `None` if the end block does not fit in 64 bits.
pub fn span_end_block(start_block: u64, duration: u64) -> Option<u64> {
    if duration == 0 {
        return Some(start_block);
    }
    start_block.checked_add(duration - 1)
}

/// External chain block used as a selection seed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBlock {
    /// Block index on the external chain
    pub number: U256,
    /// Block hash, the selection seed
    pub hash: H256,
}

impl SeedBlock {
    /// Create a seed block
    pub fn new(number: U256, hash: H256) -> Self {
        Self { number, hash }
    }
}
