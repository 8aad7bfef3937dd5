//! Key layout in the key-value store

use crate::error::SpanError;
use primitive_types::U256;

/// Key prefixes for the key-value store.
///
/// All keys are prefixed to namespace different data types.
#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Span records: `s:{id}` -> Span (id as 8-byte big-endian, so key order is id order)
    Span,
    /// Singletons: `m:last_span_id`, `m:seed_pointer`
    Metadata,
    /// Parameter registry: `p:{name}` -> u64
    Param,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Span => b"s:",
            KeyPrefix::Metadata => b"m:",
            KeyPrefix::Param => b"p:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Build a span key from a span id.
    pub fn span_key(id: u64) -> Vec<u8> {
        KeyPrefix::Span.key(&id.to_be_bytes())
    }

    /// Key of the last-span pointer.
    pub fn last_span_id_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"last_span_id")
    }

    /// Key of the seed pointer.
    pub fn seed_pointer_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(b"seed_pointer")
    }

    /// Key of a single parameter.
    pub fn param_key(param: Param) -> Vec<u8> {
        KeyPrefix::Param.key(param.name().as_bytes())
    }
}

/// Named entries of the parameter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Sidechain blocks per span
    SpanDuration,
    /// Sidechain blocks per sprint
    SprintDuration,
    /// Producers per span
    ProducerCount,
    /// Write counter of the registry
    Version,
}

impl Param {
    /// Registry name of the parameter
    pub fn name(&self) -> &'static str {
        match self {
            Param::SpanDuration => "span_duration",
            Param::SprintDuration => "sprint_duration",
            Param::ProducerCount => "producer_count",
            Param::Version => "version",
        }
    }
}

pub(crate) fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub(crate) fn decode_u64(key: &[u8], bytes: &[u8]) -> Result<u64, SpanError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| SpanError::Encoding {
        message: format!(
            "expected 8 bytes under {}, found {}",
            String::from_utf8_lossy(key),
            bytes.len()
        ),
    })?;
    Ok(u64::from_be_bytes(raw))
}

pub(crate) fn encode_u256(value: U256) -> Vec<u8> {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out.to_vec()
}

pub(crate) fn decode_u256(key: &[u8], bytes: &[u8]) -> Result<U256, SpanError> {
    if bytes.len() > 32 {
        return Err(SpanError::Encoding {
            message: format!(
                "expected at most 32 bytes under {}, found {}",
                String::from_utf8_lossy(key),
                bytes.len()
            ),
        });
    }
    Ok(U256::from_big_endian(bytes))
}
