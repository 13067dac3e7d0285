//! Override hook for an outbound worker's payload handler.

use async_trait::async_trait;
use bytes::Bytes;

/// Application-specific handler applied to each dispatched payload (§4.4).
/// Defaults to identity.
#[async_trait]
pub trait OutboundHandler: Send + Sync {
    async fn handle(&self, payload: Bytes) -> Result<Bytes, String> {
        Ok(payload)
    }
}

/// The default, identity handler.
#[derive(Debug, Clone, Default)]
pub struct IdentityHandler;

#[async_trait]
impl OutboundHandler for IdentityHandler {}
