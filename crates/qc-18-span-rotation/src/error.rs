//! Error types for the span rotation subsystem

use primitive_types::U256;
use thiserror::Error;

/// Result type alias for span rotation operations
pub type Result<T> = std::result::Result<T, SpanError>;

/// Errors that can occur during span rotation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// Requested span (or the span behind the last-span pointer) does not exist
    #[error("Span not found: {id}")]
    SpanNotFound {
        /// Span id that was looked up
        id: u64,
    },

    /// A record could not be serialized or deserialized
    #[error("Encoding error: {message}")]
    Encoding {
        /// Codec failure description
        message: String,
    },

    /// Producer count is missing from the parameter registry
    #[error("Producer count not set in parameter registry")]
    ProducerCountUnset,

    /// The external seed source could not resolve the requested block
    #[error("Seed block {index} unavailable: {reason}")]
    SeedUnavailable {
        /// Seed pointer index that was requested
        index: U256,
        /// Failure reported by the seed source
        reason: String,
    },

    /// Underlying key-value store failure
    #[error("Store error: {message}")]
    Store {
        /// Store failure description
        message: String,
    },

    /// Every eligible validator has zero voting power, nothing to draw from
    #[error("Eligible validators carry no voting power")]
    NoVotingPower,

    /// Cumulative voting power does not fit in 64 bits
    #[error("Cumulative voting power overflows u64")]
    VotingPowerOverflow,

    /// The span end block does not fit in 64 bits
    #[error("Invalid block range: start {start_block} with duration {duration}")]
    InvalidBlockRange {
        /// Requested start block
        start_block: u64,
        /// Configured span duration
        duration: u64,
    },

    /// Genesis state failed validation
    #[error("Invalid genesis: {reason}")]
    InvalidGenesis {
        /// Validation failure
        reason: String,
    },
}

impl SpanError {
    /// Check if the error reports a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SpanNotFound { .. })
    }

    /// Check if the error is caused by missing or invalid configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ProducerCountUnset | Self::InvalidGenesis { .. })
    }

    /// Check if the calling layer may retry the operation later.
    ///
    /// The subsystem never retries on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SeedUnavailable { .. } | Self::Store { .. })
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError {
        /// Backend failure description
        message: String,
    },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError {
        /// Corruption description
        message: String,
    },
}

impl From<KVStoreError> for SpanError {
    fn from(err: KVStoreError) -> Self {
        SpanError::Store {
            message: err.to_string(),
        }
    }
}

/// Errors reported by an external seed source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedSourceError {
    /// The external chain has no block at this index (yet)
    #[error("block {0} not found")]
    BlockNotFound(U256),

    /// The external chain could not be reached
    #[error("seed source unreachable: {0}")]
    Unreachable(String),
}

/// Codec errors raised by span serializers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SerializationError {
    /// Codec failure description
    pub message: String,
}

impl From<SerializationError> for SpanError {
    fn from(err: SerializationError) -> Self {
        SpanError::Encoding {
            message: err.message,
        }
    }
}
