//! Inbound component error types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::cache::CacheError;
use crate::codec::CodecError;

/// Failure modes of an inbound component's per-message processing (§7).
#[derive(Debug, Error)]
pub enum InboundError {
    /// The external transport channel closed.
    #[error("external transport closed")]
    TransportClosed,

    /// The broker's reply channel closed before a response arrived.
    #[error("broker reply channel closed")]
    BrokerChannelClosed,

    /// The client envelope's reply phase could not find its cache entry.
    #[error("cache miss reconstructing reply: {0}")]
    CacheMiss(#[from] CacheError),

    /// A received or reconstructed envelope failed to encode/decode.
    #[error("codec failure: {0}")]
    Codec(#[from] CodecError),

    /// The component's configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InboundError {
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss(_))
    }

    pub fn is_transport_closed(&self) -> bool {
        matches!(self, Self::TransportClosed | Self::BrokerChannelClosed)
    }
}
