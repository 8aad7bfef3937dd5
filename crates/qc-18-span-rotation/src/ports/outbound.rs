//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the span rotation service requires from its host.

use crate::domain::entities::{SeedBlock, Span, Validator, ValidatorId, ValidatorSet};
use crate::error::{KVStoreError, SeedSourceError, SerializationError};
use primitive_types::U256;

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (feature `rocksdb`)
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All entries under `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;

    /// A window of `prefix_scan`: skip `offset` entries, return at most `limit`.
    fn prefix_scan_page(
        &self,
        prefix: &[u8],
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(self
            .prefix_scan(prefix)?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key
        key: Vec<u8>,
        /// Value
        value: Vec<u8>,
    },
    /// Delete a key.
    Delete {
        /// Key
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Abstract interface for span serialization.
pub trait SpanSerializer: Send + Sync {
    /// Serialize a span to bytes.
    fn serialize(&self, span: &Span) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to a span.
    fn deserialize(&self, data: &[u8]) -> Result<Span, SerializationError>;
}

/// Read access to the staking subsystem.
///
/// Implementations answer from already-committed state and have no side
/// effects visible to span rotation.
pub trait ValidatorSource: Send + Sync {
    /// Every known validator.
    fn all_validators(&self) -> Vec<Validator>;

    /// Validators whose activity window covers the upcoming span.
    fn span_eligible_validators(&self) -> Vec<Validator>;

    /// Look up a validator by id.
    fn validator_by_id(&self, id: ValidatorId) -> Option<Validator>;

    /// The validator set currently in force.
    fn current_validator_set(&self) -> ValidatorSet;
}

/// Read access to the external chain whose block hashes seed selection.
///
/// The same index must always yield the same hash.
pub trait SeedSource: Send + Sync {
    /// Block header at `index`.
    fn block_at(&self, index: U256) -> Result<SeedBlock, SeedSourceError>;
}
