//! Outbound component error types.

use thiserror::Error;

/// Failure modes of an outbound worker's dispatch/feedback loop (§7).
#[derive(Debug, Error)]
pub enum OutboundError {
    /// The broker channel closed.
    #[error("broker channel closed")]
    BrokerChannelClosed,

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OutboundError {
    pub fn is_broker_channel_closed(&self) -> bool {
        matches!(self, Self::BrokerChannelClosed)
    }
}
