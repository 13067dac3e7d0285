//! Crate-level error aggregation for applications assembling the broker
//! and its collaborators into one running system.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::broker::BrokerError;
use crate::cache::CacheError;
use crate::codec::CodecError;
use crate::inbound::InboundError;
use crate::outbound::OutboundError;
use crate::scatter::ScatterError;

/// Errors surfaced while assembling or running a complete broker system
/// (broker plus its registered inbound/outbound/scatter components).
#[derive(Error, Debug)]
pub enum SystemError {
    /// The broker's own event loop failed.
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),

    /// An inbound component failed.
    #[error("inbound component error: {0}")]
    Inbound(#[from] InboundError),

    /// An outbound component failed.
    #[error("outbound component error: {0}")]
    Outbound(#[from] OutboundError),

    /// The scatter/gather service failed.
    #[error("scatter service error: {0}")]
    Scatter(#[from] ScatterError),

    /// The Correlation Cache failed.
    #[error("correlation cache error: {0}")]
    Cache(#[from] CacheError),

    /// A wire envelope failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration validation failed before the system could start.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The system is shutting down and cannot accept new operations.
    #[error("system shutdown in progress")]
    ShuttingDown,
}

impl SystemError {
    /// True if the system can no longer make progress and must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SystemError::ShuttingDown)
    }

    /// True if the failure is local to one message or component and the
    /// rest of the system can keep running.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
