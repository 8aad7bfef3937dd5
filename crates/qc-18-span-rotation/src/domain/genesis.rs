//! Genesis state for staking and span rotation

use super::entities::{span_end_block, Span, Validator, ValidatorSet};
use super::params::SpanParams;
use crate::adapters::InMemoryValidatorSource;
use crate::config::SpanRotationConfig;
use crate::error::{Result, SpanError};
use crate::ports::outbound::ValidatorSource;
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Validators known at chain start
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingGenesis {
    /// Every registered validator
    pub validators: Vec<Validator>,
    /// Explicit initial set; empty means "all validators"
    #[serde(default)]
    pub current_validator_set: ValidatorSet,
}

impl StakingGenesis {
    /// Create a staking genesis whose initial set is every validator
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            validators,
            current_validator_set: ValidatorSet::default(),
        }
    }

    /// Check the validator records for consistency
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for v in self.validators.iter().chain(&self.current_validator_set.validators) {
            if v.signer == H160::zero() {
                return Err(invalid(format!("validator {} has a zero signer", v.id)));
            }
            if v.voting_power < 0 {
                return Err(invalid(format!(
                    "validator {} has negative voting power {}",
                    v.id, v.voting_power
                )));
            }
            if v.end_epoch != 0 && v.end_epoch <= v.start_epoch {
                return Err(invalid(format!(
                    "validator {} ends at epoch {} before starting at {}",
                    v.id, v.end_epoch, v.start_epoch
                )));
            }
        }
        for v in &self.validators {
            if !seen.insert(v.id) {
                return Err(invalid(format!("duplicate validator id {}", v.id)));
            }
        }

        let mut in_set = HashSet::new();
        for v in &self.current_validator_set.validators {
            if !in_set.insert(v.id) {
                return Err(invalid(format!(
                    "duplicate validator id {} in current validator set",
                    v.id
                )));
            }
        }
        Ok(())
    }

    /// The validator set the first span is built from
    pub fn initial_validator_set(&self) -> ValidatorSet {
        if self.current_validator_set.is_empty() {
            ValidatorSet::new(self.validators.clone())
        } else {
            self.current_validator_set.clone()
        }
    }

    /// Capture the staking state `source` currently holds
    pub fn export<VS: ValidatorSource + ?Sized>(source: &VS) -> Self {
        Self {
            validators: source.all_validators(),
            current_validator_set: source.current_validator_set(),
        }
    }

    /// Build an in-memory validator source from the initial validator set
    pub fn into_validator_source(self) -> InMemoryValidatorSource {
        InMemoryValidatorSource::from_genesis(self)
    }
}

/// Initial span rotation state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanGenesis {
    /// Parameter registry contents
    pub params: SpanParams,
    /// Spans to seed the store with
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Starting seed pointer
    #[serde(default)]
    pub seed_pointer: U256,
}

impl SpanGenesis {
    /// Genesis with a single span 0 covering the first `span_duration`
    /// blocks, produced by the whole initial validator set.
    pub fn default_for(config: &SpanRotationConfig, validator_set: ValidatorSet) -> Result<Self> {
        let params = config.params();
        let end_block = span_end_block(0, params.span_duration).ok_or(
            SpanError::InvalidBlockRange {
                start_block: 0,
                duration: params.span_duration,
            },
        )?;
        let producers = validator_set.validators.clone();
        let first = Span::new(
            0,
            0,
            end_block,
            validator_set,
            producers,
            config.chain_id.clone(),
        );

        Ok(Self {
            params,
            spans: vec![first],
            seed_pointer: U256::zero(),
        })
    }

    /// Check the span records for consistency
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for span in &self.spans {
            if !seen.insert(span.id) {
                return Err(invalid(format!("duplicate span id {}", span.id)));
            }
            if span.end_block < span.start_block {
                return Err(invalid(format!(
                    "span {} ends at block {} before starting at {}",
                    span.id, span.end_block, span.start_block
                )));
            }
        }
        Ok(())
    }

    /// Highest span id, which becomes the last-span pointer
    pub fn last_span_id(&self) -> Option<u64> {
        self.spans.iter().map(|s| s.id).max()
    }
}

fn invalid(reason: String) -> SpanError {
    SpanError::InvalidGenesis { reason }
}
