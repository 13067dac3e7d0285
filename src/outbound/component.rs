//! Outbound component (C4): a worker that registers readiness, then loops
//! receive → handle → reply (§4.4).

use bytes::Bytes;
use tokio::sync::mpsc;

use super::config::OutboundConfig;
use super::error::OutboundError;
use super::traits::{IdentityHandler, OutboundHandler};
use crate::message::BrokerEnvelope;
use crate::monitoring::{Monitor, OutboundEvent, OutboundEventKind};
use crate::util::ComponentId;

/// Marker payload sent back when `handle` fails, so the broker's ledger and
/// availability bookkeeping stay consistent even on failure (§4.4).
pub const HANDLER_FAILURE_MARKER: &[u8] = b"ERR";

type BrokerLink = (
    mpsc::Sender<(ComponentId, BrokerEnvelope)>,
    mpsc::Receiver<BrokerEnvelope>,
);

/// One outbound worker instance (C4).
pub struct OutboundComponent<H: OutboundHandler, Mon: Monitor<OutboundEvent>> {
    name: ComponentId,
    config: OutboundConfig,
    handler: H,
    monitor: Mon,
    broker_tx: mpsc::Sender<(ComponentId, BrokerEnvelope)>,
    broker_rx: mpsc::Receiver<BrokerEnvelope>,
}

impl<Mon: Monitor<OutboundEvent>> OutboundComponent<IdentityHandler, Mon> {
    pub fn new(config: OutboundConfig, monitor: Mon, broker_link: BrokerLink) -> Result<Self, OutboundError> {
        Self::with_handler(config, IdentityHandler, monitor, broker_link)
    }
}

impl<H: OutboundHandler, Mon: Monitor<OutboundEvent>> OutboundComponent<H, Mon> {
    pub fn with_handler(
        config: OutboundConfig,
        handler: H,
        monitor: Mon,
        broker_link: BrokerLink,
    ) -> Result<Self, OutboundError> {
        config.validate()?;
        let name = ComponentId::new(config.name.clone());
        let (broker_tx, broker_rx) = broker_link;
        Ok(Self {
            name,
            config,
            handler,
            monitor,
            broker_tx,
            broker_rx,
        })
    }

    /// Register readiness, then loop dispatch/handle/reply up to
    /// `max_messages` times (§4.4). Returns the number of messages handled.
    pub async fn start(mut self) -> Result<u64, OutboundError> {
        self.broker_tx
            .send((self.name.clone(), BrokerEnvelope::ready()))
            .await
            .map_err(|_| OutboundError::BrokerChannelClosed)?;

        let _ = self
            .monitor
            .record(OutboundEvent::now(self.name.clone(), OutboundEventKind::Registered))
            .await;

        let mut processed = 0u64;

        while processed < self.config.max_messages {
            let request = match self.broker_rx.recv().await {
                Some(envelope) => envelope,
                None => break,
            };

            let reply_payload = match self.handler.handle(request.payload.clone()).await {
                Ok(payload) => {
                    let _ = self
                        .monitor
                        .record(OutboundEvent::now(
                            self.name.clone(),
                            OutboundEventKind::Dispatched {
                                key: request.key.clone(),
                            },
                        ))
                        .await;
                    payload
                }
                Err(reason) => {
                    let _ = self
                        .monitor
                        .record(OutboundEvent::now(
                            self.name.clone(),
                            OutboundEventKind::HandlerFailed {
                                key: request.key.clone(),
                                reason,
                            },
                        ))
                        .await;
                    Bytes::from_static(HANDLER_FAILURE_MARKER)
                }
            };

            if self
                .broker_tx
                .send((self.name.clone(), BrokerEnvelope::new(request.key, reply_payload)))
                .await
                .is_err()
            {
                break;
            }

            processed += 1;
        }

        let _ = self
            .monitor
            .record(OutboundEvent::now(
                self.name.clone(),
                OutboundEventKind::Finished { processed },
            ))
            .await;

        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::{InMemoryMonitor, MonitoringConfig};
    use crate::util::CorrelationKey;
    use async_trait::async_trait;

    fn test_monitor() -> InMemoryMonitor<OutboundEvent> {
        InMemoryMonitor::new(MonitoringConfig::default())
    }

    #[tokio::test]
    async fn test_registers_readiness_then_echoes_payload() {
        let (broker_tx, mut broker_rx) = mpsc::channel(8);
        let (worker_tx, worker_rx) = mpsc::channel(8);

        let config = OutboundConfig::new("worker-1", 1);
        let component = OutboundComponent::new(config, test_monitor(), (broker_tx, worker_rx)).unwrap();

        let handle = tokio::spawn(component.start());

        let (sender, readiness) = broker_rx.recv().await.unwrap();
        assert_eq!(sender, ComponentId::new("worker-1"));
        assert!(readiness.is_ready_signal());

        let key = CorrelationKey::fresh();
        worker_tx
            .send(BrokerEnvelope::new(key.clone(), Bytes::from_static(b"task")))
            .await
            .unwrap();

        let (_sender, feedback) = broker_rx.recv().await.unwrap();
        assert_eq!(feedback.key, key);
        assert_eq!(feedback.payload.as_ref(), b"task");

        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }

    struct FailingHandler;

    #[async_trait]
    impl OutboundHandler for FailingHandler {
        async fn handle(&self, _payload: Bytes) -> Result<Bytes, String> {
            Err("boom".to_string())
        }
    }

    #[tokio::test]
    async fn test_handler_failure_still_sends_feedback() {
        let (broker_tx, mut broker_rx) = mpsc::channel(8);
        let (worker_tx, worker_rx) = mpsc::channel(8);

        let config = OutboundConfig::new("worker-1", 1);
        let component =
            OutboundComponent::with_handler(config, FailingHandler, test_monitor(), (broker_tx, worker_rx)).unwrap();

        let handle = tokio::spawn(component.start());
        let _ = broker_rx.recv().await.unwrap();

        let key = CorrelationKey::fresh();
        worker_tx
            .send(BrokerEnvelope::new(key.clone(), Bytes::from_static(b"task")))
            .await
            .unwrap();

        let (_sender, feedback) = broker_rx.recv().await.unwrap();
        assert_eq!(feedback.key, key);
        assert_eq!(feedback.payload.as_ref(), HANDLER_FAILURE_MARKER);

        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }
}
