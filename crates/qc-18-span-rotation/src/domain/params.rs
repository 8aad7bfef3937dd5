//! Parameter registry values

use serde::{Deserialize, Serialize};

/// Default span length in sidechain blocks
pub const DEFAULT_SPAN_DURATION: u64 = 100 * DEFAULT_SPRINT_DURATION;

/// Default sprint length in sidechain blocks
pub const DEFAULT_SPRINT_DURATION: u64 = 64;

/// Default number of producers drawn per span
pub const DEFAULT_PRODUCER_COUNT: u64 = 4;

/// Snapshot of the tunable span parameters.
///
/// Durations read as zero when unset, which is a valid degenerate
/// configuration. An unset producer count is kept distinct from zero because
/// selection cannot run without it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanParams {
    /// Sidechain blocks per span
    pub span_duration: u64,
    /// Sidechain blocks per sprint
    pub sprint_duration: u64,
    /// Producers drawn per span
    pub producer_count: Option<u64>,
}

impl SpanParams {
    /// Create a fully populated parameter set
    pub fn new(span_duration: u64, sprint_duration: u64, producer_count: u64) -> Self {
        Self {
            span_duration,
            sprint_duration,
            producer_count: Some(producer_count),
        }
    }

    /// Number of whole sprints in one span, if sprints are configured
    pub fn sprints_per_span(&self) -> Option<u64> {
        if self.sprint_duration == 0 {
            return None;
        }
        Some(self.span_duration / self.sprint_duration)
    }
}
