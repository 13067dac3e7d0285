//! Override hooks for one fan-out cycle of the Scatter Service (§4.5).

use async_trait::async_trait;
use bytes::Bytes;

/// The three override points of a Scatter Service cycle. Defaults match
/// the collaborator this service is modelled on: a single-element
/// identity fan-out, a no-op feedback handler, and a one-byte
/// acknowledgement distinct from the broker's own (§9c).
#[async_trait]
pub trait ScatterHooks: Send + Sync {
    /// Derive the messages to push to the worker pool for one inbound
    /// message. Default: a single-element sequence, the identity.
    async fn scatter(&self, payload: Bytes) -> Vec<Bytes> {
        vec![payload]
    }

    /// Applied to each per-derived worker response as it comes back from
    /// the pool. Default: no-op.
    async fn handle_feedback(&self, _response: Bytes) {}

    /// The single value returned to the broker once the fan-out completes.
    /// Default: `b"0"`.
    fn reply_feedback(&self) -> Bytes {
        Bytes::from_static(b"0")
    }
}

/// The default hook set.
#[derive(Debug, Clone, Default)]
pub struct IdentityScatter;

#[async_trait]
impl ScatterHooks for IdentityScatter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_scatter_is_single_element_identity() {
        let hooks = IdentityScatter;
        let payload = Bytes::from_static(b"payload");
        let derived = hooks.scatter(payload.clone()).await;
        assert_eq!(derived, vec![payload]);
    }

    #[test]
    fn test_default_reply_feedback_is_zero_byte() {
        let hooks = IdentityScatter;
        assert_eq!(hooks.reply_feedback().as_ref(), b"0");
    }
}
