//! Monitoring event types and configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::{ComponentId, CorrelationKey};

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

// ============================================================================
// Broker Events
// ============================================================================

/// Events related to the broker's event loop (routing, ledger, buffer).
#[derive(Debug, Clone, Serialize)]
pub struct BrokerEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific broker event type
    pub event_kind: BrokerEventKind,
}

impl BrokerEvent {
    /// Build an event stamped with the current time.
    pub fn now(event_kind: BrokerEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            event_kind,
        }
    }
}

impl MonitoringEvent for BrokerEvent {
    const EVENT_TYPE: &'static str = "broker";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            BrokerEventKind::Started => EventSeverity::Info,
            BrokerEventKind::Shutdown { .. } => EventSeverity::Info,
            BrokerEventKind::WorkerAvailable { .. } => EventSeverity::Trace,
            BrokerEventKind::Dispatched { .. } => EventSeverity::Trace,
            BrokerEventKind::Buffered { .. } => EventSeverity::Debug,
            BrokerEventKind::BufferDrained { .. } => EventSeverity::Trace,
            BrokerEventKind::LedgerDrained { .. } => EventSeverity::Trace,
            BrokerEventKind::InboundGateClosed => EventSeverity::Debug,
            BrokerEventKind::InboundGateReopened => EventSeverity::Debug,
            BrokerEventKind::ProtocolViolation { .. } => EventSeverity::Critical,
        }
    }
}

/// Specific types of broker events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum BrokerEventKind {
    /// The broker's event loop started.
    Started,

    /// The broker ran its configured `max_messages` iterations and is
    /// closing its endpoints.
    Shutdown {
        /// Number of iterations actually processed.
        iterations: u64,
    },

    /// A worker sent feedback and was placed into the available set.
    WorkerAvailable {
        /// Identity of the worker.
        worker: ComponentId,
    },

    /// A message was dispatched to a worker (live or drained from buffer).
    Dispatched {
        /// Identity of the worker.
        worker: ComponentId,
        /// Correlation key of the dispatched message.
        key: CorrelationKey,
        /// Whether this dispatch came from the single-slot buffer.
        from_buffer: bool,
    },

    /// A message was stored in the single-slot buffer for a busy worker.
    Buffered {
        /// Identity of the worker the message is destined for.
        worker: ComponentId,
    },

    /// A previously buffered message was popped and dispatched.
    BufferDrained {
        /// Identity of the worker.
        worker: ComponentId,
    },

    /// A ledger entry was popped and its reply delivered to the waiting
    /// inbound producer.
    LedgerDrained {
        /// Correlation key that was drained.
        key: CorrelationKey,
        /// Inbound identity that was unblocked.
        inbound: ComponentId,
    },

    /// Inbound listening was suspended (a blocking dispatch or a buffer
    /// insertion is outstanding).
    InboundGateClosed,

    /// Inbound listening was re-enabled (available non-empty, buffer and
    /// ledger both empty).
    InboundGateReopened,

    /// A protocol violation was detected and the offending message dropped.
    ProtocolViolation {
        /// Human-readable description of the violation.
        reason: String,
    },
}

// ============================================================================
// Inbound Component Events
// ============================================================================

/// Events related to an inbound component's per-message processing.
#[derive(Debug, Clone, Serialize)]
pub struct InboundEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Identity of the inbound component.
    pub component: ComponentId,

    /// Specific inbound event type.
    pub event_kind: InboundEventKind,
}

impl InboundEvent {
    /// Build an event stamped with the current time.
    pub fn now(component: ComponentId, event_kind: InboundEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            component,
            event_kind,
        }
    }
}

impl MonitoringEvent for InboundEvent {
    const EVENT_TYPE: &'static str = "inbound";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            InboundEventKind::Started => EventSeverity::Info,
            InboundEventKind::MessageAccepted { .. } => EventSeverity::Trace,
            InboundEventKind::ReplyDelivered { .. } => EventSeverity::Trace,
            InboundEventKind::CacheMiss { .. } => EventSeverity::Error,
            InboundEventKind::Finished { .. } => EventSeverity::Info,
        }
    }
}

/// Specific types of inbound events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum InboundEventKind {
    /// The component registered with the broker and began processing.
    Started,

    /// A client message was translated and forwarded to the broker.
    MessageAccepted {
        /// Correlation key allocated for this message.
        key: CorrelationKey,
    },

    /// The broker's reply for a key was received and translated back.
    ReplyDelivered {
        /// Correlation key the reply was for.
        key: CorrelationKey,
    },

    /// A PALM reply phase could not find its cache entry (§7).
    CacheMiss {
        /// Correlation key that was missing from the cache.
        key: CorrelationKey,
    },

    /// The component processed its configured `max_messages` and stopped.
    Finished {
        /// Number of messages actually processed.
        processed: u64,
    },
}

// ============================================================================
// Outbound Component Events
// ============================================================================

/// Events related to an outbound worker's dispatch/feedback loop.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Identity of the outbound component.
    pub component: ComponentId,

    /// Specific outbound event type.
    pub event_kind: OutboundEventKind,
}

impl OutboundEvent {
    /// Build an event stamped with the current time.
    pub fn now(component: ComponentId, event_kind: OutboundEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            component,
            event_kind,
        }
    }
}

impl MonitoringEvent for OutboundEvent {
    const EVENT_TYPE: &'static str = "outbound";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            OutboundEventKind::Registered => EventSeverity::Info,
            OutboundEventKind::Dispatched { .. } => EventSeverity::Trace,
            OutboundEventKind::HandlerFailed { .. } => EventSeverity::Error,
            OutboundEventKind::Finished { .. } => EventSeverity::Info,
        }
    }
}

/// Specific types of outbound events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutboundEventKind {
    /// The worker sent its initial readiness envelope.
    Registered,

    /// A dispatched message was handled and feedback sent back.
    Dispatched {
        /// Correlation key of the handled message.
        key: CorrelationKey,
    },

    /// The `handle` override failed; a synthetic error envelope was sent
    /// so the broker's bookkeeping stays consistent.
    HandlerFailed {
        /// Correlation key of the message that failed.
        key: CorrelationKey,
        /// Description of the failure.
        reason: String,
    },

    /// The worker processed its configured `max_messages` and stopped.
    Finished {
        /// Number of messages actually handled.
        processed: u64,
    },
}

// ============================================================================
// Scatter Service Events
// ============================================================================

/// Events related to one fan-out cycle of the scatter service.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific scatter event type.
    pub event_kind: ScatterEventKind,
}

impl ScatterEvent {
    /// Build an event stamped with the current time.
    pub fn now(event_kind: ScatterEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            event_kind,
        }
    }
}

impl MonitoringEvent for ScatterEvent {
    const EVENT_TYPE: &'static str = "scatter";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ScatterEventKind::Registered => EventSeverity::Info,
            ScatterEventKind::FanOutStarted { .. } => EventSeverity::Debug,
            ScatterEventKind::Pushed { .. } => EventSeverity::Trace,
            ScatterEventKind::FeedbackHandled { .. } => EventSeverity::Trace,
            ScatterEventKind::FanOutCompleted { .. } => EventSeverity::Debug,
        }
    }
}

/// Specific types of scatter events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ScatterEventKind {
    /// The service sent its initial readiness envelope.
    Registered,

    /// A fan-out cycle began for one inbound message.
    FanOutStarted {
        /// Number of derived messages `scatter` produced.
        fan_out: usize,
    },

    /// One derived message was pushed to the worker pool.
    Pushed {
        /// Zero-based index of this push within the current fan-out.
        index: usize,
    },

    /// One pull-side response was handled by `handle_feedback`.
    FeedbackHandled {
        /// Zero-based index of this response within the current fan-out.
        index: usize,
    },

    /// All derived messages were pushed and their feedback collected.
    FanOutCompleted {
        /// Total number of derived messages processed.
        fan_out: usize,
    },
}

// ============================================================================
// Correlation Cache Events
// ============================================================================

/// Events related to Correlation Cache (C1) access.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific cache event type.
    pub event_kind: CacheEventKind,

    /// Additional event metadata.
    pub metadata: HashMap<String, String>,
}

impl CacheEvent {
    /// Build an event stamped with the current time and no extra metadata.
    pub fn now(event_kind: CacheEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            event_kind,
            metadata: HashMap::new(),
        }
    }
}

impl MonitoringEvent for CacheEvent {
    const EVENT_TYPE: &'static str = "cache";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            CacheEventKind::Put { .. } => EventSeverity::Trace,
            CacheEventKind::Hit { .. } => EventSeverity::Trace,
            CacheEventKind::Miss { .. } => EventSeverity::Warning,
            CacheEventKind::Deleted { .. } => EventSeverity::Trace,
        }
    }
}

/// Specific types of cache events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CacheEventKind {
    /// A client envelope was stored under a correlation key.
    Put {
        /// The key it was stored under.
        key: CorrelationKey,
    },
    /// A lookup found its entry.
    Hit {
        /// The key that was looked up.
        key: CorrelationKey,
    },
    /// A lookup found nothing.
    Miss {
        /// The key that was looked up.
        key: CorrelationKey,
    },
    /// An entry was removed.
    Deleted {
        /// The key that was removed.
        key: CorrelationKey,
    },
}
