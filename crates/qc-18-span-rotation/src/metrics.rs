//! Metrics collection for span rotation

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for span rotation
#[derive(Debug, Default)]
pub struct SpanMetrics {
    /// Spans written through `add_span`, including frozen spans
    pub spans_committed: AtomicU64,

    /// Spans written without moving the last-span pointer
    pub raw_spans_committed: AtomicU64,

    /// Successful freezes
    pub spans_frozen: AtomicU64,

    /// Freezes that returned an error
    pub freeze_failures: AtomicU64,

    /// Seed pointer increments
    pub seed_pointer_advances: AtomicU64,

    /// Drawn ids the validator source could not resolve
    pub producers_unresolved: AtomicU64,

    /// Span records skipped during listing because they did not decode
    pub records_skipped: AtomicU64,
}

/// Point-in-time copy of [`SpanMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanMetricsSnapshot {
    /// See [`SpanMetrics::spans_committed`]
    pub spans_committed: u64,
    /// See [`SpanMetrics::raw_spans_committed`]
    pub raw_spans_committed: u64,
    /// See [`SpanMetrics::spans_frozen`]
    pub spans_frozen: u64,
    /// See [`SpanMetrics::freeze_failures`]
    pub freeze_failures: u64,
    /// See [`SpanMetrics::seed_pointer_advances`]
    pub seed_pointer_advances: u64,
    /// See [`SpanMetrics::producers_unresolved`]
    pub producers_unresolved: u64,
    /// See [`SpanMetrics::records_skipped`]
    pub records_skipped: u64,
}

impl SpanMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a span committed with the last-span pointer
    pub fn record_span_committed(&self) {
        self.spans_committed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record raw span writes
    pub fn record_raw_spans_committed(&self, count: usize) {
        self.raw_spans_committed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a successful freeze
    pub fn record_freeze(&self) {
        self.spans_frozen.fetch_add(1, Ordering::Relaxed);
        self.spans_committed.fetch_add(1, Ordering::Relaxed);
        self.seed_pointer_advances.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed freeze
    pub fn record_freeze_failure(&self) {
        self.freeze_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a standalone seed pointer increment
    pub fn record_seed_advance(&self) {
        self.seed_pointer_advances.fetch_add(1, Ordering::Relaxed);
    }

    /// Record producers dropped during resolution
    pub fn record_unresolved(&self, count: usize) {
        self.producers_unresolved
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record records skipped during a listing
    pub fn record_skipped(&self, count: usize) {
        self.records_skipped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Copy all counters
    pub fn snapshot(&self) -> SpanMetricsSnapshot {
        SpanMetricsSnapshot {
            spans_committed: self.spans_committed.load(Ordering::Relaxed),
            raw_spans_committed: self.raw_spans_committed.load(Ordering::Relaxed),
            spans_frozen: self.spans_frozen.load(Ordering::Relaxed),
            freeze_failures: self.freeze_failures.load(Ordering::Relaxed),
            seed_pointer_advances: self.seed_pointer_advances.load(Ordering::Relaxed),
            producers_unresolved: self.producers_unresolved.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
        }
    }
}
