//! # Span Rotation API Implementation

use super::*;
use crate::domain::keys::encode_u256;

impl<KV, VS, SS, SER> SpanRotationApi for SpanRotationService<KV, VS, SS, SER>
where
    KV: KeyValueStore,
    VS: ValidatorSource,
    SS: SeedSource,
    SER: SpanSerializer,
{
    fn add_span(&mut self, span: Span) -> Result<()> {
        self.commit_span(&span, true)?;
        self.metrics.record_span_committed();
        self.emit(SpanAction::AddSpan, &span);
        tracing::info!(span_id = span.id, "[qc-18] Span added");
        Ok(())
    }

    fn add_raw_span(&mut self, span: Span) -> Result<()> {
        self.commit_span(&span, false)?;
        self.metrics.record_raw_spans_committed(1);
        tracing::debug!(span_id = span.id, "[qc-18] Raw span added");
        Ok(())
    }

    fn get_span(&self, id: u64) -> Result<Span> {
        let bytes = self.get_span_record(id)?;
        Ok(self.serializer.deserialize(&bytes)?)
    }

    fn get_span_record(&self, id: u64) -> Result<Vec<u8>> {
        self.kv_store
            .get(&KeyPrefix::span_key(id))?
            .ok_or(SpanError::SpanNotFound { id })
    }

    fn get_last_span(&self) -> Result<Span> {
        let id = self.last_span_id()?;
        self.get_span(id)
    }

    fn last_span_id(&self) -> Result<u64> {
        Ok(self
            .read_u64(&KeyPrefix::last_span_id_key())?
            .unwrap_or(0))
    }

    fn list_spans_report(&self, page: u64, limit: u64) -> Result<SpanPage> {
        self.scan_page(page, limit)
    }

    fn get_all_spans_report(&self) -> Result<SpanPage> {
        let entries = self.kv_store.prefix_scan(KeyPrefix::Span.as_bytes())?;
        Ok(self.decode_spans(entries))
    }

    fn freeze_next_span(&mut self, id: u64, start_block: u64, chain_id: &str) -> Result<Span> {
        self.freeze(id, start_block, chain_id).map_err(|e| {
            self.metrics.record_freeze_failure();
            tracing::warn!(span_id = id, error = %e, "[qc-18] Freeze failed");
            e
        })
    }

    fn select_producers(&self) -> Result<Vec<Validator>> {
        let params = self.load_params()?;
        let pointer = self.load_seed_pointer()?;
        self.producers_after(pointer, &params)
    }

    fn get_seed_pointer(&self) -> Result<U256> {
        self.load_seed_pointer()
    }

    fn set_seed_pointer(&mut self, value: U256) -> Result<()> {
        self.kv_store
            .put(&KeyPrefix::seed_pointer_key(), &encode_u256(value))?;
        tracing::info!(seed_pointer = %value, "[qc-18] Seed pointer set");
        Ok(())
    }

    fn advance_seed_pointer(&mut self) -> Result<U256> {
        let next = Self::next_seed_index(self.load_seed_pointer()?)?;
        self.kv_store
            .put(&KeyPrefix::seed_pointer_key(), &encode_u256(next))?;
        self.metrics.record_seed_advance();
        Ok(next)
    }

    fn span_duration(&self) -> Result<u64> {
        Ok(self.load_params()?.span_duration)
    }

    fn set_span_duration(&mut self, value: u64) -> Result<()> {
        self.write_param(Param::SpanDuration, value)
    }

    fn sprint_duration(&self) -> Result<u64> {
        Ok(self.load_params()?.sprint_duration)
    }

    fn set_sprint_duration(&mut self, value: u64) -> Result<()> {
        self.write_param(Param::SprintDuration, value)
    }

    fn producer_count(&self) -> Result<u64> {
        self.read_u64(&KeyPrefix::param_key(Param::ProducerCount))?
            .ok_or(SpanError::ProducerCountUnset)
    }

    fn set_producer_count(&mut self, value: u64) -> Result<()> {
        self.write_param(Param::ProducerCount, value)
    }

    fn params(&self) -> Result<SpanParams> {
        self.load_params()
    }

    fn set_params(&mut self, params: SpanParams) -> Result<()> {
        let ops = self.params_ops(&params)?;
        self.kv_store.atomic_batch_write(ops)?;
        tracing::info!(?params, "[qc-18] Parameters updated");
        Ok(())
    }

    fn params_version(&self) -> Result<u64> {
        Ok(self
            .read_u64(&KeyPrefix::param_key(Param::Version))?
            .unwrap_or(0))
    }
}
