//! # Freeze and Producer Selection
//!
//! Everything up to the final batch write is computed without touching the
//! store, so a failed freeze leaves no trace.

use super::*;
use crate::domain::entities::span_end_block;
use crate::domain::selection::{draw_producer_ids, resolve_producers, tally_draws};

impl<KV, VS, SS, SER> SpanRotationService<KV, VS, SS, SER>
where
    KV: KeyValueStore,
    VS: ValidatorSource,
    SS: SeedSource,
    SER: SpanSerializer,
{
    /// Select producers using the external block at `seed_index`.
    ///
    /// The seed source is only consulted when there are more eligible
    /// validators than producer slots.
    #[tracing::instrument(skip(self, seed_index, params), fields(seed_index = %seed_index))]
    pub(crate) fn select_at(&self, seed_index: U256, params: &SpanParams) -> Result<Vec<Validator>> {
        let count = params.producer_count.ok_or(SpanError::ProducerCountUnset)?;
        let eligible = self.validators.span_eligible_validators();

        if eligible.len() as u64 <= count {
            tracing::debug!(
                eligible = eligible.len(),
                count,
                "[qc-18] No surplus, eligible validators become producers"
            );
            return Ok(eligible);
        }

        let seed = self
            .seed_source
            .block_at(seed_index)
            .map_err(|e| SpanError::SeedUnavailable {
                index: seed_index,
                reason: e.to_string(),
            })?;

        let drawn = draw_producer_ids(&seed.hash, &eligible, count)?;
        let resolved = resolve_producers(&tally_draws(&drawn), |id| {
            self.validators.validator_by_id(id)
        });

        if !resolved.unresolved.is_empty() {
            tracing::warn!(
                unresolved = ?resolved.unresolved,
                "[qc-18] Dropping drawn producers unknown to the validator source"
            );
            self.metrics.record_unresolved(resolved.unresolved.len());
        }

        tracing::debug!(
            seed = ?seed.hash,
            eligible = eligible.len(),
            producers = resolved.producers.len(),
            "[qc-18] Producers selected"
        );
        Ok(resolved.producers)
    }

    /// Build the next span and commit it with both pointers in one batch.
    #[tracing::instrument(skip(self))]
    pub(crate) fn freeze(&mut self, id: u64, start_block: u64, chain_id: &str) -> Result<Span> {
        let params = self.load_params()?;
        let end_block = span_end_block(start_block, params.span_duration).ok_or(
            SpanError::InvalidBlockRange {
                start_block,
                duration: params.span_duration,
            },
        )?;

        let pointer = self.load_seed_pointer()?;
        let next_pointer = Self::next_seed_index(pointer)?;
        let producers = self.select_at(next_pointer, &params)?;
        let validator_set = self.validators.current_validator_set();

        let span = Span::new(id, start_block, end_block, validator_set, producers, chain_id);

        let ops = vec![
            self.span_put(&span)?,
            Self::last_span_put(span.id),
            Self::seed_pointer_put(next_pointer),
        ];
        self.kv_store.atomic_batch_write(ops)?;

        self.metrics.record_freeze();
        self.emit(SpanAction::FreezeSet, &span);

        tracing::info!(
            span_id = span.id,
            start_block = span.start_block,
            end_block = span.end_block,
            producers = span.selected_producers.len(),
            seed_pointer = %next_pointer,
            "[qc-18] Span frozen"
        );
        Ok(span)
    }
}
