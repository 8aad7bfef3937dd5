//! # Span Rotation Service - Helper Methods
//!
//! Store access shared by the API, freeze and genesis paths.

use super::*;
use crate::domain::keys::{decode_u256, decode_u64, encode_u256, encode_u64};
use crate::MAX_SPAN_PAGE_LIMIT;

impl<KV, VS, SS, SER> SpanRotationService<KV, VS, SS, SER>
where
    KV: KeyValueStore,
    VS: ValidatorSource,
    SS: SeedSource,
    SER: SpanSerializer,
{
    pub(crate) fn read_u64(&self, key: &[u8]) -> Result<Option<u64>> {
        match self.kv_store.get(key)? {
            Some(bytes) => decode_u64(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn read_u256(&self, key: &[u8]) -> Result<Option<U256>> {
        match self.kv_store.get(key)? {
            Some(bytes) => decode_u256(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn encode_span(&self, span: &Span) -> Result<Vec<u8>> {
        Ok(self.serializer.serialize(span)?)
    }

    /// Batch entry writing `span` under its id.
    pub(crate) fn span_put(&self, span: &Span) -> Result<BatchOperation> {
        Ok(BatchOperation::put(
            KeyPrefix::span_key(span.id),
            self.encode_span(span)?,
        ))
    }

    pub(crate) fn last_span_put(id: u64) -> BatchOperation {
        BatchOperation::put(KeyPrefix::last_span_id_key(), encode_u64(id))
    }

    pub(crate) fn seed_pointer_put(value: U256) -> BatchOperation {
        BatchOperation::put(KeyPrefix::seed_pointer_key(), encode_u256(value))
    }

    pub(crate) fn load_seed_pointer(&self) -> Result<U256> {
        Ok(self
            .read_u256(&KeyPrefix::seed_pointer_key())?
            .unwrap_or_default())
    }

    /// Seed pointer value after one advance.
    pub(crate) fn next_seed_index(pointer: U256) -> Result<U256> {
        pointer
            .checked_add(U256::one())
            .ok_or_else(|| SpanError::SeedUnavailable {
                index: pointer,
                reason: "seed pointer exhausted".to_string(),
            })
    }

    pub(crate) fn load_params(&self) -> Result<SpanParams> {
        Ok(SpanParams {
            span_duration: self
                .read_u64(&KeyPrefix::param_key(Param::SpanDuration))?
                .unwrap_or(0),
            sprint_duration: self
                .read_u64(&KeyPrefix::param_key(Param::SprintDuration))?
                .unwrap_or(0),
            producer_count: self.read_u64(&KeyPrefix::param_key(Param::ProducerCount))?,
        })
    }

    /// Batch entries writing every parameter and bumping the version.
    pub(crate) fn params_ops(&self, params: &SpanParams) -> Result<Vec<BatchOperation>> {
        let count_key = KeyPrefix::param_key(Param::ProducerCount);
        let count_op = match params.producer_count {
            Some(count) => BatchOperation::put(count_key, encode_u64(count)),
            None => BatchOperation::delete(count_key),
        };
        Ok(vec![
            BatchOperation::put(
                KeyPrefix::param_key(Param::SpanDuration),
                encode_u64(params.span_duration),
            ),
            BatchOperation::put(
                KeyPrefix::param_key(Param::SprintDuration),
                encode_u64(params.sprint_duration),
            ),
            count_op,
            self.version_bump()?,
        ])
    }

    /// Write one parameter together with the version bump.
    pub(crate) fn write_param(&mut self, param: Param, value: u64) -> Result<()> {
        let ops = vec![
            BatchOperation::put(KeyPrefix::param_key(param), encode_u64(value)),
            self.version_bump()?,
        ];
        self.kv_store.atomic_batch_write(ops)?;
        tracing::debug!(param = param.name(), value, "[qc-18] Parameter updated");
        Ok(())
    }

    fn version_bump(&self) -> Result<BatchOperation> {
        let version = self
            .read_u64(&KeyPrefix::param_key(Param::Version))?
            .unwrap_or(0);
        Ok(BatchOperation::put(
            KeyPrefix::param_key(Param::Version),
            encode_u64(version.saturating_add(1)),
        ))
    }

    /// Decode scanned span records, skipping those that fail.
    pub(crate) fn decode_spans(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> SpanPage {
        let mut page = SpanPage::default();
        for (key, value) in entries {
            match self.serializer.deserialize(&value) {
                Ok(span) => page.spans.push(span),
                Err(e) => {
                    tracing::warn!(
                        key = ?key,
                        error = %e,
                        "[qc-18] Skipping undecodable span record"
                    );
                    page.skipped += 1;
                }
            }
        }
        if page.skipped > 0 {
            self.metrics.record_skipped(page.skipped);
        }
        page
    }

    /// One listing window: 1-based `page`, at most `min(limit, 20)` records.
    pub(crate) fn scan_page(&self, page: u64, limit: u64) -> Result<SpanPage> {
        let limit = limit.min(MAX_SPAN_PAGE_LIMIT);
        if limit == 0 {
            return Ok(SpanPage::default());
        }
        let offset = page.max(1).saturating_sub(1).saturating_mul(limit);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);

        let entries =
            self.kv_store
                .prefix_scan_page(KeyPrefix::Span.as_bytes(), offset, limit as usize)?;
        Ok(self.decode_spans(entries))
    }

    /// Persist a span, optionally moving the last-span pointer with it.
    pub(crate) fn commit_span(&mut self, span: &Span, move_pointer: bool) -> Result<()> {
        let mut ops = vec![self.span_put(span)?];
        if move_pointer {
            ops.push(Self::last_span_put(span.id));
        }
        self.kv_store.atomic_batch_write(ops)?;
        Ok(())
    }

    pub(crate) fn emit(&mut self, action: SpanAction, span: &Span) {
        self.events.push(SpanEvent::from_span(action, span));
    }

    /// Producers for the next freeze, with the seed pointer at `pointer`.
    pub(crate) fn producers_after(&self, pointer: U256, params: &SpanParams) -> Result<Vec<Validator>> {
        let index = Self::next_seed_index(pointer)?;
        self.select_at(index, params)
    }
}
