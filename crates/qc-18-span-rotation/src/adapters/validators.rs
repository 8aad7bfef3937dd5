//! In-memory validator source

use crate::domain::entities::{Validator, ValidatorId, ValidatorSet};
use crate::domain::genesis::StakingGenesis;
use crate::ports::outbound::ValidatorSource;
use std::collections::BTreeMap;

/// Validator source backed by a map, for tests and genesis tooling.
///
/// Eligibility is judged at `current_epoch`: a validator is eligible when it
/// is active at that epoch and has no scheduled exit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryValidatorSource {
    validators: BTreeMap<ValidatorId, Validator>,
    current_set: Option<ValidatorSet>,
    current_epoch: u64,
}

impl InMemoryValidatorSource {
    /// Create a source holding `validators`; the current set is all of them
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            validators: validators.into_iter().map(|v| (v.id, v)).collect(),
            current_set: None,
            current_epoch: 0,
        }
    }

    /// Create a source from staking genesis.
    ///
    /// Only the initial validator set is loaded, so lookups, eligibility and
    /// the current set all draw from the same validators.
    pub fn from_genesis(genesis: StakingGenesis) -> Self {
        let current_set = genesis.initial_validator_set();
        let mut source = Self::new(current_set.validators.clone());
        source.current_set = Some(current_set);
        source
    }

    /// Insert or replace a validator
    pub fn upsert(&mut self, validator: Validator) {
        self.validators.insert(validator.id, validator);
    }

    /// Forget a validator, as if it were pruned from staking state
    pub fn remove(&mut self, id: ValidatorId) -> Option<Validator> {
        self.validators.remove(&id)
    }

    /// Pin the current validator set instead of deriving it
    pub fn set_current_validator_set(&mut self, set: ValidatorSet) {
        self.current_set = Some(set);
    }

    /// Epoch used for eligibility checks
    pub fn current_epoch(&self) -> u64 {
        self.current_epoch
    }

    /// Move the eligibility epoch
    pub fn set_current_epoch(&mut self, epoch: u64) {
        self.current_epoch = epoch;
    }
}

impl ValidatorSource for InMemoryValidatorSource {
    fn all_validators(&self) -> Vec<Validator> {
        self.validators.values().cloned().collect()
    }

    fn span_eligible_validators(&self) -> Vec<Validator> {
        self.validators
            .values()
            .filter(|v| v.is_active_at(self.current_epoch) && !v.is_exiting())
            .cloned()
            .collect()
    }

    fn validator_by_id(&self, id: ValidatorId) -> Option<Validator> {
        self.validators.get(&id).cloned()
    }

    fn current_validator_set(&self) -> ValidatorSet {
        match &self.current_set {
            Some(set) => set.clone(),
            None => ValidatorSet::new(self.all_validators()),
        }
    }
}

impl From<StakingGenesis> for InMemoryValidatorSource {
    fn from(genesis: StakingGenesis) -> Self {
        Self::from_genesis(genesis)
    }
}
