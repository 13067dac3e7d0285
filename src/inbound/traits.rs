//! Override hook for an inbound component's per-message payload transform.

use async_trait::async_trait;
use bytes::Bytes;

/// Application-specific transform applied to a message's payload before it
/// is forwarded to the broker (§4.3). Defaults to identity.
#[async_trait]
pub trait InboundTransform: Send + Sync {
    async fn process(&self, payload: Bytes) -> Bytes {
        payload
    }
}

/// The default, identity transform.
#[derive(Debug, Clone, Default)]
pub struct IdentityTransform;

#[async_trait]
impl InboundTransform for IdentityTransform {}
