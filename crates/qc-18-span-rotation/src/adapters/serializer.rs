//! Span serializers

use crate::domain::entities::Span;
use crate::error::SerializationError;
use crate::ports::outbound::SpanSerializer;

/// JSON span serializer, the default.
///
/// Field order follows the struct definition, so encoding is deterministic.
/// Unknown fields are ignored on decode.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSpanSerializer;

impl SpanSerializer for JsonSpanSerializer {
    fn serialize(&self, span: &Span) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(span).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn deserialize(&self, data: &[u8]) -> Result<Span, SerializationError> {
        serde_json::from_slice(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}

/// Compact span serializer using bincode.
///
/// Not forward compatible: adding a field breaks decoding of older records.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSpanSerializer;

impl SpanSerializer for BincodeSpanSerializer {
    fn serialize(&self, span: &Span) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(span).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn deserialize(&self, data: &[u8]) -> Result<Span, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
