//! Broker error types with context.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::util::ComponentId;

/// Failure modes of the broker event loop (§7).
#[derive(Debug, Error)]
pub enum BrokerError {
    /// A producer or worker violated the one-envelope-at-a-time contract,
    /// e.g. two producers targeting the same busy worker while its buffer
    /// slot is already occupied (I1).
    #[error("protocol violation: {reason}")]
    ProtocolViolation {
        /// What was observed.
        reason: String,
    },

    /// A registered transport endpoint closed unexpectedly.
    #[error("transport failure for {component}: {reason}")]
    TransportFailure {
        /// The component whose channel failed.
        component: ComponentId,
        /// What went wrong.
        reason: String,
    },

    /// Feedback referenced an identity that was never registered.
    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    /// An inbound's route names an outbound component that was never
    /// registered.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// Attempted to register a component identity that is already in use.
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(ComponentId),
}

impl BrokerError {
    /// Build a [`BrokerError::ProtocolViolation`] with the given reason.
    pub fn protocol_violation(reason: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            reason: reason.into(),
        }
    }

    /// Build a [`BrokerError::TransportFailure`] naming the component.
    pub fn transport_failure(component: ComponentId, reason: impl Into<String>) -> Self {
        Self::TransportFailure {
            component,
            reason: reason.into(),
        }
    }

    /// True if this is a protocol-violation error.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation { .. })
    }

    /// True if this is a transport-failure error.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_violation_error() {
        let error = BrokerError::protocol_violation("second message buffered for busy worker");
        assert!(error.is_protocol_violation());
        assert!(error.to_string().contains("second message buffered"));
    }

    #[test]
    fn test_transport_failure_error() {
        let error = BrokerError::transport_failure(ComponentId::new("inbound-1"), "channel closed");
        assert!(error.is_transport_failure());
        assert!(error.to_string().contains("inbound-1"));
        assert!(error.to_string().contains("channel closed"));
    }

    #[test]
    fn test_unknown_component_error() {
        let error = BrokerError::UnknownComponent(ComponentId::new("ghost"));
        assert!(error.to_string().contains("ghost"));
    }

    #[test]
    fn test_unknown_route_error() {
        let error = BrokerError::UnknownRoute("worker-7".to_string());
        assert!(error.to_string().contains("worker-7"));
    }

    #[test]
    fn test_duplicate_registration_error() {
        let error = BrokerError::DuplicateRegistration(ComponentId::new("dup"));
        assert!(error.to_string().contains("dup"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BrokerError>();
    }
}
