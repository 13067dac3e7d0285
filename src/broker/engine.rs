//! The broker event loop (C6): a single-threaded cooperative scheduler
//! over two channel endpoints (§4.6, §5).

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::error::BrokerError;
use super::types::{AvailableWorkers, Buffer, BufferedMessage, InboundRegistration, Ledger, OutboundRegistration};
use crate::message::BrokerEnvelope;
use crate::monitoring::{BrokerEvent, BrokerEventKind, Monitor};
use crate::util::{ComponentId, CorrelationKey};

/// The broker's own canonical, non-blocking acknowledgement payload,
/// distinct from the Scatter Service's `reply_feedback()` default (§9c).
pub const CANONICAL_ACK: &[u8] = b"1";

/// Channel capacity and lifetime bounds for one broker instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Display name for this broker instance, used in monitoring events.
    pub name: String,
    /// Bounded capacity of the inbound and outbound mpsc channels.
    pub channel_capacity: usize,
    /// Number of event-loop iterations this broker runs before shutting
    /// down cleanly (§4.6 Termination).
    pub max_messages: u64,
}

impl BrokerConfig {
    pub fn new(name: impl Into<String>, channel_capacity: usize, max_messages: u64) -> Self {
        Self {
            name: name.into(),
            channel_capacity,
            max_messages,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            name: "broker".to_string(),
            channel_capacity: 64,
            max_messages: u64::MAX,
        }
    }
}

type Endpoint = (ComponentId, BrokerEnvelope);

/// The broker event loop (C6). Owns all routing state exclusively; no
/// broker-internal state is ever shared behind a lock (§5).
pub struct Broker<M: Monitor<BrokerEvent>> {
    config: BrokerConfig,
    monitor: M,

    inbound_tx: mpsc::Sender<Endpoint>,
    inbound_rx: mpsc::Receiver<Endpoint>,
    outbound_tx: mpsc::Sender<Endpoint>,
    outbound_rx: mpsc::Receiver<Endpoint>,

    reply_channels: HashMap<ComponentId, mpsc::Sender<BrokerEnvelope>>,
    inbound_registrations: HashMap<ComponentId, InboundRegistration>,
    outbound_registrations: HashMap<ComponentId, OutboundRegistration>,

    available: AvailableWorkers,
    ledger: Ledger,
    buffer: Buffer,

    inbound_enabled: bool,
    iterations: u64,
}

impl<M: Monitor<BrokerEvent>> Broker<M> {
    pub fn new(config: BrokerConfig, monitor: M) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(config.channel_capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(config.channel_capacity);

        Self {
            config,
            monitor,
            inbound_tx,
            inbound_rx,
            outbound_tx,
            outbound_rx,
            reply_channels: HashMap::new(),
            inbound_registrations: HashMap::new(),
            outbound_registrations: HashMap::new(),
            available: AvailableWorkers::new(),
            ledger: Ledger::new(),
            buffer: Buffer::new(),
            inbound_enabled: true,
            iterations: 0,
        }
    }

    /// The sender handle an inbound producer uses to send requests to the
    /// broker (shared by all inbound components).
    pub fn inbound_sender(&self) -> mpsc::Sender<Endpoint> {
        self.inbound_tx.clone()
    }

    /// The sender handle an outbound worker uses to send feedback to the
    /// broker (shared by all outbound components).
    pub fn outbound_sender(&self) -> mpsc::Sender<Endpoint> {
        self.outbound_tx.clone()
    }

    /// Register an inbound producer. Returns the receiver the producer
    /// should poll for its replies.
    pub fn register_inbound(
        &mut self,
        name: ComponentId,
        registration: InboundRegistration,
    ) -> Result<mpsc::Receiver<BrokerEnvelope>, BrokerError> {
        if self.reply_channels.contains_key(&name) {
            return Err(BrokerError::DuplicateRegistration(name));
        }
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.reply_channels.insert(name.clone(), tx);
        self.inbound_registrations.insert(name, registration);
        Ok(rx)
    }

    /// Register an outbound worker. Returns the receiver the worker should
    /// poll for dispatched work.
    pub fn register_outbound(
        &mut self,
        name: ComponentId,
        registration: OutboundRegistration,
    ) -> Result<mpsc::Receiver<BrokerEnvelope>, BrokerError> {
        if self.reply_channels.contains_key(&name) {
            return Err(BrokerError::DuplicateRegistration(name));
        }
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.reply_channels.insert(name.clone(), tx);
        self.outbound_registrations.insert(name, registration);
        Ok(rx)
    }

    async fn reply_to(&mut self, component: &ComponentId, envelope: BrokerEnvelope) {
        if let Some(sender) = self.reply_channels.get(component) {
            if sender.send(envelope).await.is_err() {
                let _ = self.monitor
                    .record(BrokerEvent::now(BrokerEventKind::ProtocolViolation {
                        reason: format!("reply channel for {component} closed"),
                    }))
                    .await;
            }
        }
    }

    async fn dispatch_to_worker(&mut self, worker: &ComponentId, envelope: BrokerEnvelope) {
        self.reply_to(worker, envelope).await;
    }

    /// A worker registers readiness or returns feedback from a prior
    /// dispatch (§4.6-2).
    async fn handle_outbound_event(&mut self, worker: ComponentId, envelope: BrokerEnvelope) {
        if !self.outbound_registrations.contains_key(&worker) {
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::ProtocolViolation {
                    reason: format!("feedback from unregistered worker {worker}"),
                }))
                .await;
            return;
        }

        if let Some(buffered) = self.buffer.take(worker.as_str()) {
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::BufferDrained {
                    worker: worker.clone(),
                }))
                .await;
            if buffered.block {
                self.ledger
                    .insert(buffered.envelope.key.clone(), buffered.waiting_inbound.clone());
            } else {
                self.reply_to(
                    &buffered.waiting_inbound,
                    BrokerEnvelope::new(buffered.envelope.key.clone(), Bytes::from_static(CANONICAL_ACK)),
                )
                .await;
            }
            self.dispatch_to_worker(&worker, buffered.envelope).await;
        } else {
            self.available.push(worker.clone());
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::WorkerAvailable {
                    worker: worker.clone(),
                }))
                .await;
        }

        if let Some(inbound) = self.ledger.take(&envelope.key) {
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::LedgerDrained {
                    key: envelope.key.clone(),
                    inbound: inbound.clone(),
                }))
                .await;
            self.reply_to(&inbound, envelope).await;
        }

        if !self.available.is_empty() && self.buffer.is_empty() && self.ledger.is_empty() {
            if !self.inbound_enabled {
                let _ = self.monitor
                    .record(BrokerEvent::now(BrokerEventKind::InboundGateReopened))
                    .await;
            }
            self.inbound_enabled = true;
        }
    }

    /// A producer sent a request (§4.6-3).
    async fn handle_inbound_event(&mut self, sender: ComponentId, envelope: BrokerEnvelope) {
        let registration = match self.inbound_registrations.get(&sender).cloned() {
            Some(registration) => registration,
            None => {
                let _ = self.monitor
                    .record(BrokerEvent::now(BrokerEventKind::ProtocolViolation {
                        reason: format!("request from unregistered inbound {sender}"),
                    }))
                    .await;
                return;
            }
        };

        if registration.is_unrouted() {
            self.reply_to(
                &sender,
                BrokerEnvelope::new(envelope.key.clone(), Bytes::from_static(CANONICAL_ACK)),
            )
            .await;
            return;
        }

        let worker = ComponentId::new(registration.route.clone());
        if self.available.remove(&worker) {
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::Dispatched {
                    worker: worker.clone(),
                    key: envelope.key.clone(),
                    from_buffer: false,
                }))
                .await;

            if registration.block {
                self.ledger.insert(envelope.key.clone(), sender.clone());
                self.inbound_enabled = false;
                let _ = self.monitor
                    .record(BrokerEvent::now(BrokerEventKind::InboundGateClosed))
                    .await;
            } else {
                self.reply_to(
                    &sender,
                    BrokerEnvelope::new(envelope.key.clone(), Bytes::from_static(CANONICAL_ACK)),
                )
                .await;
            }
            self.dispatch_to_worker(&worker, envelope).await;
        } else {
            let buffered = BufferedMessage {
                envelope,
                waiting_inbound: sender,
                block: registration.block,
            };
            if self
                .buffer
                .try_insert(registration.route.clone(), buffered)
                .is_err()
            {
                let _ = self.monitor
                    .record(BrokerEvent::now(BrokerEventKind::ProtocolViolation {
                        reason: format!("buffer slot for {} already occupied", registration.route),
                    }))
                    .await;
                return;
            }
            let _ = self.monitor
                .record(BrokerEvent::now(BrokerEventKind::Buffered {
                    worker: worker.clone(),
                }))
                .await;
            self.inbound_enabled = false;
        }
    }

    /// Run the event loop for `max_messages` iterations, then shut down
    /// cleanly (§4.6 Termination).
    pub async fn run(mut self) -> Result<(), BrokerError> {
        let _ = self.monitor
            .record(BrokerEvent::now(BrokerEventKind::Started))
            .await;

        while self.iterations < self.config.max_messages {
            tokio::select! {
                biased;

                outbound = self.outbound_rx.recv() => {
                    match outbound {
                        Some((worker, envelope)) => self.handle_outbound_event(worker, envelope).await,
                        None => break,
                    }
                }

                inbound = self.inbound_rx.recv(), if self.inbound_enabled => {
                    match inbound {
                        Some((sender, envelope)) => self.handle_inbound_event(sender, envelope).await,
                        None => break,
                    }
                }
            }

            self.iterations += 1;
        }

        let _ = self.monitor
            .record(BrokerEvent::now(BrokerEventKind::Shutdown {
                iterations: self.iterations,
            }))
            .await;

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::{InMemoryMonitor, MonitoringConfig};

    fn test_monitor() -> InMemoryMonitor<BrokerEvent> {
        InMemoryMonitor::new(MonitoringConfig::default())
    }

    #[tokio::test]
    async fn test_unrouted_inbound_gets_immediate_ack() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        let mut replies = broker
            .register_inbound(ComponentId::new("producer"), InboundRegistration::new("", false, "ack-only"))
            .unwrap();

        let key = CorrelationKey::fresh();
        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(key.clone(), Bytes::from_static(b"hi")),
            )
            .await;

        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.key, key);
        assert_eq!(reply.payload.as_ref(), CANONICAL_ACK);
    }

    #[tokio::test]
    async fn test_routed_inbound_dispatches_to_available_worker() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        let mut worker_rx = broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer"),
                InboundRegistration::new("worker-1", false, "routed"),
            )
            .unwrap();

        broker.available.push(ComponentId::new("worker-1"));

        let key = CorrelationKey::fresh();
        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(key.clone(), Bytes::from_static(b"payload")),
            )
            .await;

        let dispatched = worker_rx.recv().await.unwrap();
        assert_eq!(dispatched.key, key);
    }

    #[tokio::test]
    async fn test_routed_inbound_buffers_when_worker_busy() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer"),
                InboundRegistration::new("worker-1", true, "routed"),
            )
            .unwrap();

        // worker-1 is not in `available`, so this message is buffered.
        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(CorrelationKey::fresh(), Bytes::from_static(b"payload")),
            )
            .await;

        assert_eq!(broker.buffer.len(), 1);
        assert!(!broker.inbound_enabled);
    }

    #[tokio::test]
    async fn test_blocking_dispatch_populates_ledger_and_closes_gate() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer"),
                InboundRegistration::new("worker-1", true, "blocking"),
            )
            .unwrap();
        broker.available.push(ComponentId::new("worker-1"));

        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(CorrelationKey::fresh(), Bytes::from_static(b"payload")),
            )
            .await;

        assert_eq!(broker.ledger.len(), 1);
        assert!(!broker.inbound_enabled);
    }

    #[tokio::test]
    async fn test_outbound_feedback_drains_ledger_and_reopens_gate() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        let mut producer_rx = broker
            .register_inbound(
                ComponentId::new("producer"),
                InboundRegistration::new("worker-1", true, "blocking"),
            )
            .unwrap();
        broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker.available.push(ComponentId::new("worker-1"));

        let key = CorrelationKey::fresh();
        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(key.clone(), Bytes::from_static(b"payload")),
            )
            .await;
        assert!(!broker.inbound_enabled);

        broker
            .handle_outbound_event(
                ComponentId::new("worker-1"),
                BrokerEnvelope::new(key.clone(), Bytes::from_static(b"result")),
            )
            .await;

        let reply = producer_rx.recv().await.unwrap();
        assert_eq!(reply.key, key);
        assert_eq!(reply.payload.as_ref(), b"result");
        assert!(broker.ledger.is_empty());
        assert!(broker.inbound_enabled);
    }

    #[tokio::test]
    async fn test_buffered_message_dispatched_on_worker_feedback() {
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), test_monitor());
        let mut worker_rx = broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer"),
                InboundRegistration::new("worker-1", false, "routed"),
            )
            .unwrap();

        let key = CorrelationKey::fresh();
        broker
            .handle_inbound_event(
                ComponentId::new("producer"),
                BrokerEnvelope::new(key.clone(), Bytes::from_static(b"queued")),
            )
            .await;
        assert_eq!(broker.buffer.len(), 1);

        // worker-1's first message is its own readiness signal.
        broker
            .handle_outbound_event(ComponentId::new("worker-1"), BrokerEnvelope::ready())
            .await;

        let dispatched = worker_rx.recv().await.unwrap();
        assert_eq!(dispatched.key, key);
        assert!(broker.buffer.is_empty());
    }

    #[tokio::test]
    async fn test_second_buffer_insert_for_same_route_is_a_protocol_violation() {
        let monitor = test_monitor();
        let mut broker = Broker::new(BrokerConfig::new("b", 8, 10), monitor.clone());
        broker
            .register_outbound(ComponentId::new("worker-1"), OutboundRegistration::new("w"))
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer-1"),
                InboundRegistration::new("worker-1", true, "first"),
            )
            .unwrap();
        broker
            .register_inbound(
                ComponentId::new("producer-2"),
                InboundRegistration::new("worker-1", true, "second"),
            )
            .unwrap();

        // worker-1 is never pushed into `available`, so both requests
        // contend for the same buffer slot.
        broker
            .handle_inbound_event(
                ComponentId::new("producer-1"),
                BrokerEnvelope::new(CorrelationKey::fresh(), Bytes::from_static(b"first")),
            )
            .await;
        assert_eq!(broker.buffer.len(), 1);

        broker
            .handle_inbound_event(
                ComponentId::new("producer-2"),
                BrokerEnvelope::new(CorrelationKey::fresh(), Bytes::from_static(b"second")),
            )
            .await;

        // The second message is dropped; the broker loop is still alive and
        // the first slot is untouched.
        assert_eq!(broker.buffer.len(), 1);

        let snapshot = monitor.snapshot().await.unwrap();
        assert_eq!(snapshot.critical_count, 1);
    }

    #[tokio::test]
    async fn test_run_terminates_after_max_messages_iterations() {
        let broker = Broker::new(BrokerConfig::new("b", 8, 0), test_monitor());
        let result = broker.run().await;
        assert!(result.is_ok());
    }
}
