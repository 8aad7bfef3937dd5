//! In-memory seed source

use crate::domain::entities::SeedBlock;
use crate::error::SeedSourceError;
use crate::ports::outbound::SeedSource;
use primitive_types::{H256, U256};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Seed source serving a fixed table of external blocks.
///
/// Indexes outside the table fail with `BlockNotFound`, which lets tests
/// exercise the unavailable-seed path.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeedSource {
    blocks: BTreeMap<U256, H256>,
}

impl InMemorySeedSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with blocks `0..=last`, each hash derived from its index
    pub fn with_synthetic_blocks(last: u64) -> Self {
        let mut source = Self::new();
        for number in 0..=last {
            let index = U256::from(number);
            source.insert(index, synthetic_hash(index));
        }
        source
    }

    /// Add or replace a block
    pub fn insert(&mut self, number: U256, hash: H256) {
        self.blocks.insert(number, hash);
    }
}

impl SeedSource for InMemorySeedSource {
    fn block_at(&self, index: U256) -> Result<SeedBlock, SeedSourceError> {
        self.blocks
            .get(&index)
            .map(|hash| SeedBlock::new(index, *hash))
            .ok_or(SeedSourceError::BlockNotFound(index))
    }
}

fn synthetic_hash(index: U256) -> H256 {
    let mut raw = [0u8; 32];
    index.to_big_endian(&mut raw);
    H256::from_slice(&Sha256::digest(raw))
}
