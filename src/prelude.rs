//! Convenient glob import for building on top of this crate.
//!
//! ```rust
//! use palm_broker::prelude::*;
//! ```

// Broker
pub use crate::broker::{Broker, BrokerConfig, BrokerError, InboundRegistration, OutboundRegistration, CANONICAL_ACK};

// Correlation Cache
pub use crate::cache::{CacheError, CorrelationCache, InMemoryCorrelationCache};

// Envelopes
pub use crate::message::{BrokerEnvelope, ClientEnvelope};

// Inbound / Outbound / Scatter components
pub use crate::inbound::{IdentityTransform, InboundComponent, InboundConfig, InboundError, InboundTransform};
pub use crate::outbound::{HANDLER_FAILURE_MARKER, IdentityHandler, OutboundComponent, OutboundConfig, OutboundError, OutboundHandler};
pub use crate::scatter::{IdentityScatter, ScatterConfig, ScatterError, ScatterHooks, ScatterService, WorkerPool};

// Monitoring
pub use crate::monitoring::{
    BrokerEvent, EventSeverity, InMemoryMonitor, InboundEvent, Monitor, MonitoringConfig,
    NoopMonitor, OutboundEvent, ScatterEvent,
};

// System
pub use crate::system::SystemConfig;

// Identifiers
pub use crate::util::{ComponentId, CorrelationKey};
