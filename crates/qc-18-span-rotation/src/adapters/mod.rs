//! # Adapters Module
//!
//! Reference implementations of the outbound ports, plus the query handler.
//!
//! ## Modules
//!
//! - `memory`: ordered in-memory key-value store
//! - `rocksdb_store`: RocksDB key-value store (feature `rocksdb`)
//! - `serializer`: JSON and bincode span codecs
//! - `validators`: in-memory validator source
//! - `seed`: in-memory seed source
//! - `query`: read-only query pass-through

pub mod memory;
pub mod query;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;
pub mod seed;
pub mod serializer;
pub mod validators;

pub use memory::InMemoryKVStore;
pub use query::{SpanQuery, SpanQueryHandler};
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbStore};
pub use seed::InMemorySeedSource;
pub use serializer::{BincodeSpanSerializer, JsonSpanSerializer};
pub use validators::InMemoryValidatorSource;
