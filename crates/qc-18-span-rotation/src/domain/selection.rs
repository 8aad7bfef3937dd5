//! Deterministic producer selection
//!
//! Producers are drawn with replacement, weighted by voting power, using an
//! external block hash as the only source of randomness. Every node holding
//! the same seed, eligible set and producer count derives the same draws.
//!
//! ## Byte-to-index mapping
//!
//! 1. Eligible validators are ordered by ascending id.
//! 2. `c[i]` is the running sum of `max(voting_power, 0)`; `T` is the total.
//! 3. Stream block `k` is `SHA-256(SELECTION_DOMAIN || seed || k as u64 BE)`,
//!    read as four consecutive big-endian `u64` words.
//! 4. A draw rejects words `w >= floor(u64::MAX / T) * T`, then takes
//!    `target = w mod T`.
//! 5. The drawn validator is the first index with `c[i] > target`.

use super::entities::{sort_by_address, Validator, ValidatorId};
use crate::error::SpanError;
use primitive_types::H256;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Domain separator mixed into every seed stream block
pub const SELECTION_DOMAIN: &[u8] = b"qc-18/producer-selection/v1";

const BLOCK_LEN: usize = 32;
const WORD_LEN: usize = 8;

/// Counter-mode SHA-256 expansion of a 32-byte seed.
#[derive(Debug, Clone)]
pub struct SeedStream {
    seed: [u8; 32],
    counter: u64,
    block: [u8; BLOCK_LEN],
    offset: usize,
}

impl SeedStream {
    /// Create a stream positioned before block 0
    pub fn new(seed: &H256) -> Self {
        Self {
            seed: seed.to_fixed_bytes(),
            counter: 0,
            block: [0u8; BLOCK_LEN],
            offset: BLOCK_LEN,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(SELECTION_DOMAIN);
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.block.copy_from_slice(&hasher.finalize());
        self.counter = self.counter.wrapping_add(1);
        self.offset = 0;
    }

    /// Next big-endian word of the stream
    pub fn next_u64(&mut self) -> u64 {
        if self.offset + WORD_LEN > BLOCK_LEN {
            self.refill();
        }
        let mut word = [0u8; WORD_LEN];
        word.copy_from_slice(&self.block[self.offset..self.offset + WORD_LEN]);
        self.offset += WORD_LEN;
        u64::from_be_bytes(word)
    }

    /// Uniform value in `0..bound` by rejection sampling. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "next_below requires a non-zero bound");
        let limit = (u64::MAX / bound) * bound;
        loop {
            let word = self.next_u64();
            if word < limit {
                return word % bound;
            }
        }
    }
}

/// Cumulative weight table over eligible validators, ordered by id.
#[derive(Debug, Clone)]
pub struct WeightedRanges {
    ids: Vec<ValidatorId>,
    cumulative: Vec<u64>,
}

impl WeightedRanges {
    /// Build the table.
    ///
    /// Fails with `NoVotingPower` when every weight is zero and with
    /// `VotingPowerOverflow` when the total does not fit in 64 bits.
    pub fn new(eligible: &[Validator]) -> Result<Self, SpanError> {
        let mut ordered: Vec<&Validator> = eligible.iter().collect();
        ordered.sort_by_key(|v| v.id);

        let mut ids = Vec::with_capacity(ordered.len());
        let mut cumulative = Vec::with_capacity(ordered.len());
        let mut total = 0u64;
        for validator in ordered {
            total = total
                .checked_add(validator.weight())
                .ok_or(SpanError::VotingPowerOverflow)?;
            ids.push(validator.id);
            cumulative.push(total);
        }

        if total == 0 {
            return Err(SpanError::NoVotingPower);
        }

        Ok(Self { ids, cumulative })
    }

    /// Total weight
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Validator owning `target`, which must be below [`total`](Self::total)
    pub fn pick(&self, target: u64) -> ValidatorId {
        let idx = self.cumulative.partition_point(|&c| c <= target);
        self.ids[idx]
    }
}

/// Draw `count` producer ids from `eligible` using `seed`.
///
/// When there is no surplus (`eligible.len() <= count`) every eligible id is
/// returned once, in input order, and the seed is not consulted.
pub fn draw_producer_ids(
    seed: &H256,
    eligible: &[Validator],
    count: u64,
) -> Result<Vec<ValidatorId>, SpanError> {
    if eligible.len() as u64 <= count {
        return Ok(eligible.iter().map(|v| v.id).collect());
    }

    let ranges = WeightedRanges::new(eligible)?;
    let total = ranges.total();
    let mut stream = SeedStream::new(seed);

    Ok((0..count)
        .map(|_| ranges.pick(stream.next_below(total)))
        .collect())
}

/// Count how many times each id was drawn.
pub fn tally_draws(ids: &[ValidatorId]) -> BTreeMap<ValidatorId, u64> {
    let mut tally = BTreeMap::new();
    for &id in ids {
        *tally.entry(id).or_insert(0u64) += 1;
    }
    tally
}

/// Producers resolved from a draw tally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProducers {
    /// Producers in canonical order, powers replaced by draw counts
    pub producers: Vec<Validator>,
    /// Drawn ids the validator source no longer knows
    pub unresolved: Vec<ValidatorId>,
}

/// Turn a tally into producer records.
///
/// Each producer's `voting_power` is replaced by its draw count. Ids that
/// `lookup` cannot resolve are reported in `unresolved` and left out.
pub fn resolve_producers<F>(tally: &BTreeMap<ValidatorId, u64>, mut lookup: F) -> ResolvedProducers
where
    F: FnMut(ValidatorId) -> Option<Validator>,
{
    let mut resolved = ResolvedProducers::default();
    for (&id, &draws) in tally {
        match lookup(id) {
            Some(mut validator) => {
                validator.voting_power = i64::try_from(draws).unwrap_or(i64::MAX);
                resolved.producers.push(validator);
            }
            None => resolved.unresolved.push(id),
        }
    }
    sort_by_address(&mut resolved.producers);
    resolved
}
