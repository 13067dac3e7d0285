//! # Monitoring Module
//!
//! Observability infrastructure for the broker and its collaborators, used in
//! place of an external tracing backend (see crate-level docs).
//!
//! ## Features
//! - **Generic Monitor<E> Trait**: one monitor implementation per event type
//! - **Zero-Cost Abstraction**: NoopMonitor compiles away when disabled
//! - **Lock-Free Recording**: atomic counters for concurrent event tracking
//! - **Type Safety**: MonitoringEvent trait ensures compile-time correctness
//!
//! ## Event Types
//! - `BrokerEvent`: the broker's routing/ledger/buffer event loop
//! - `InboundEvent`: inbound component envelope translation
//! - `OutboundEvent`: outbound worker dispatch/feedback
//! - `ScatterEvent`: scatter/gather fan-out cycles
//! - `CacheEvent`: Correlation Cache access
//!
//! ## Examples
//! ```
//! use palm_broker::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, BrokerEvent, BrokerEventKind};
//! use chrono::Utc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::new(config);
//!
//! monitor.record(BrokerEvent { timestamp: Utc::now(), event_kind: BrokerEventKind::Started }).await?;
//! let snapshot = monitor.snapshot().await?;
//! assert_eq!(snapshot.total_events, 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    BrokerEvent, BrokerEventKind, CacheEvent, CacheEventKind, InboundEvent, InboundEventKind,
    MonitoringConfig, MonitoringSnapshot, OutboundEvent, OutboundEventKind, ScatterEvent,
    ScatterEventKind,
};
