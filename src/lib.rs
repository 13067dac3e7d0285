//! # palm-broker - a single-threaded work-dispatch broker runtime
//!
//! A message broker that pairs producers asking for work with a pool of
//! workers, with first-class support for a request/response protocol
//! layered on top (PALM) and a scatter/gather fan-out service.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use palm_broker::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let monitor = InMemoryMonitor::new(MonitoringConfig::default());
//!     let mut broker = Broker::new(BrokerConfig::new("broker-1", 64, u64::MAX), monitor);
//!
//!     let worker_rx = broker.register_outbound(
//!         ComponentId::new("worker-1"),
//!         OutboundRegistration::new("worker pool member"),
//!     )?;
//!
//!     broker.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Core Features
//!
//! ## Single-threaded broker core
//! - Broker state (ledger, buffer, available-worker queue) is owned
//!   exclusively by one cooperative event-loop task — no locking on the
//!   hot path.
//! - A biased `select!` drains outbound feedback before accepting new
//!   inbound work, so the ledger and buffer never grow unbounded under
//!   load (§4.6).
//!
//! ## Envelope translation at the edges
//! - [`inbound`] components translate external bytes into the broker's
//!   envelope shape, optionally layering the PALM request/response
//!   protocol via the [`cache`] module.
//! - [`outbound`] components dispatch work to external workers and
//!   report feedback back to the broker.
//! - [`scatter`] fans one inbound message out across an owned worker pool
//!   before acknowledging the broker, gathering every response first.
//!
//! ## Zero-Cost Abstractions
//! - Generic constraints over small hook traits ([`inbound::InboundTransform`],
//!   [`outbound::OutboundHandler`], [`scatter::ScatterHooks`]) instead of
//!   `Box<dyn Fn>`, so the override points compile away when unused.
//! - Compile-time dispatch via monomorphization for the [`monitoring::Monitor`]
//!   trait as well — there is no dynamic dispatch tax for observability.
//!
//! # Module Organization
//!
//! - [`message`] - the two wire-level envelope shapes (`BrokerEnvelope`,
//!   `ClientEnvelope`)
//! - [`codec`] - deterministic binary encodings for both envelope shapes
//! - [`cache`] - the Correlation Cache (C1), mapping a correlation key to
//!   the original client envelope bytes across one PALM round trip
//! - [`broker`] - the broker event loop (C6): registration, ledger,
//!   single-slot buffer, available-worker queue
//! - [`inbound`] - inbound components (C3): external bytes → broker
//!   envelope, optionally PALM-aware
//! - [`outbound`] - outbound components (C4): broker envelope → external
//!   worker dispatch and feedback
//! - [`scatter`] - the scatter/gather service (C5): fan-out to an owned
//!   worker pool with gathered feedback
//! - [`monitoring`] - event tracking for every collaborator above
//! - [`system`] - top-level configuration and assembly
//! - [`util`] - identifiers (`ComponentId`, `CorrelationKey`) and small
//!   serde helpers

pub mod broker;
pub mod cache;
pub mod codec;
pub mod inbound;
pub mod message;
pub mod monitoring;
pub mod outbound;
pub mod prelude;
pub mod scatter;
pub mod system;
pub mod util;

pub use broker::{Broker, BrokerConfig, BrokerError, CANONICAL_ACK};
pub use cache::{CacheError, CorrelationCache, InMemoryCorrelationCache};
pub use codec::CodecError;
pub use inbound::{IdentityTransform, InboundComponent, InboundConfig, InboundError, InboundTransform};
pub use message::{BrokerEnvelope, ClientEnvelope};
pub use monitoring::{
    BrokerEvent, BrokerEventKind, CacheEvent, CacheEventKind, EventSeverity, InMemoryMonitor,
    InboundEvent, InboundEventKind, Monitor, MonitoringConfig, MonitoringError, MonitoringEvent,
    MonitoringSnapshot, NoopMonitor, OutboundEvent, OutboundEventKind, ScatterEvent, ScatterEventKind,
};
pub use outbound::{HANDLER_FAILURE_MARKER, IdentityHandler, OutboundComponent, OutboundConfig, OutboundError, OutboundHandler};
pub use scatter::{IdentityScatter, ScatterConfig, ScatterError, ScatterHooks, ScatterService, WorkerPool};
pub use system::{SystemConfig, SystemError};
pub use util::{ComponentId, CorrelationKey};
