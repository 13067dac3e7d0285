// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use bytes::Bytes;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::CorrelationKey;

/// The only message shape the broker itself ever inspects (§3).
///
/// `key` correlates a request with its eventual reply; `payload` is
/// opaque to the broker and carried verbatim between inbound/outbound
/// components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerEnvelope {
    /// Correlation key pairing this envelope with its reply.
    pub key: CorrelationKey,

    /// Opaque payload bytes; never parsed by the broker.
    pub payload: Bytes,
}

impl BrokerEnvelope {
    /// Build a new envelope from a key and payload.
    pub fn new(key: CorrelationKey, payload: impl Into<Bytes>) -> Self {
        Self {
            key,
            payload: payload.into(),
        }
    }

    /// The worker-readiness / producer-readiness sentinel: `key="0"`,
    /// `payload="0"` (§4.4, §4.5).
    pub fn ready() -> Self {
        Self {
            key: CorrelationKey::ready(),
            payload: Bytes::from_static(b"0"),
        }
    }

    /// True if this envelope carries the reserved readiness sentinel.
    pub fn is_ready_signal(&self) -> bool {
        !self.key.is_fresh_value() && self.payload.as_ref() == b"0"
    }
}
