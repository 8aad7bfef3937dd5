//! # Ports Layer
//!
//! - `inbound.rs` - Driving ports (API exposed to the host runtime)
//! - `outbound.rs` - Driven ports (dependencies required by the service)

pub mod inbound;
pub mod outbound;

pub use inbound::SpanRotationApi;
pub use outbound::{BatchOperation, KeyValueStore, SeedSource, SpanSerializer, ValidatorSource};
