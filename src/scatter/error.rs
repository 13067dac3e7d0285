//! Scatter Service error types.

use thiserror::Error;

/// Failure modes of the Scatter Service's fan-out cycle (§7).
#[derive(Debug, Error)]
pub enum ScatterError {
    /// The broker channel closed.
    #[error("broker channel closed")]
    BrokerChannelClosed,

    /// The worker pool's push or pull channel closed mid-cycle.
    #[error("worker pool channel closed")]
    PoolChannelClosed,

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScatterError>();
    }

    #[test]
    fn test_pool_channel_closed_display() {
        let error = ScatterError::PoolChannelClosed;
        assert!(error.to_string().contains("worker pool"));
    }
}
