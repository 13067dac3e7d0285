//! The broker (C6): a single-threaded cooperative event loop routing
//! Broker Envelopes between inbound producers and outbound workers (§4.6).
//!
//! # Modules
//!
//! - [`error`]: [`BrokerError`] and its variants (§7)
//! - [`types`]: registrations, ledger, single-slot buffer, available set (§3)
//! - [`engine`]: the event loop itself, [`Broker`]
//!
//! # Example
//!
//! ```no_run
//! use palm_broker::broker::{Broker, BrokerConfig, InboundRegistration, OutboundRegistration};
//! use palm_broker::monitoring::{InMemoryMonitor, MonitoringConfig};
//! use palm_broker::util::ComponentId;
//!
//! # async fn example() {
//! let monitor = InMemoryMonitor::new(MonitoringConfig::default());
//! let mut broker = Broker::new(BrokerConfig::default(), monitor);
//!
//! broker
//!     .register_inbound(ComponentId::new("producer"), InboundRegistration::new("worker", true, "producer"))
//!     .unwrap();
//! broker
//!     .register_outbound(ComponentId::new("worker"), OutboundRegistration::new("worker"))
//!     .unwrap();
//!
//! broker.run().await.unwrap();
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{Broker, BrokerConfig, CANONICAL_ACK};
pub use error::BrokerError;
pub use types::{AvailableWorkers, Buffer, BufferedMessage, InboundRegistration, Ledger, OutboundRegistration};
