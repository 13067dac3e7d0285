//! Scatter Service (C5): a producer that owns a push/pull worker pool and
//! fans one inbound message out to many derived messages (§4.5).

use bytes::Bytes;
use tokio::sync::mpsc;

use super::config::ScatterConfig;
use super::error::ScatterError;
use super::traits::{IdentityScatter, ScatterHooks};
use crate::message::BrokerEnvelope;
use crate::monitoring::{Monitor, ScatterEvent, ScatterEventKind};
use crate::util::ComponentId;

type BrokerLink = (
    mpsc::Sender<(ComponentId, BrokerEnvelope)>,
    mpsc::Receiver<BrokerEnvelope>,
);

/// The push/pull worker pool endpoints the scatter service owns.
pub struct WorkerPool {
    pub push_tx: mpsc::Sender<Bytes>,
    pub pull_rx: mpsc::Receiver<Bytes>,
}

/// One Scatter Service instance (C5).
pub struct ScatterService<H: ScatterHooks, Mon: Monitor<ScatterEvent>> {
    name: ComponentId,
    config: ScatterConfig,
    hooks: H,
    monitor: Mon,
    broker_tx: mpsc::Sender<(ComponentId, BrokerEnvelope)>,
    broker_rx: mpsc::Receiver<BrokerEnvelope>,
    pool: WorkerPool,
}

impl<Mon: Monitor<ScatterEvent>> ScatterService<IdentityScatter, Mon> {
    pub fn new(
        config: ScatterConfig,
        monitor: Mon,
        broker_link: BrokerLink,
        pool: WorkerPool,
    ) -> Result<Self, ScatterError> {
        Self::with_hooks(config, IdentityScatter, monitor, broker_link, pool)
    }
}

impl<H: ScatterHooks, Mon: Monitor<ScatterEvent>> ScatterService<H, Mon> {
    pub fn with_hooks(
        config: ScatterConfig,
        hooks: H,
        monitor: Mon,
        broker_link: BrokerLink,
        pool: WorkerPool,
    ) -> Result<Self, ScatterError> {
        config.validate()?;
        let name = ComponentId::new(config.name.clone());
        let (broker_tx, broker_rx) = broker_link;
        Ok(Self {
            name,
            config,
            hooks,
            monitor,
            broker_tx,
            broker_rx,
            pool,
        })
    }

    /// Register readiness, then run the push-N-pull-N fan-out cycle up to
    /// `max_messages` times (§4.5). Returns the number of inbound messages
    /// fanned out.
    pub async fn start(mut self) -> Result<u64, ScatterError> {
        self.broker_tx
            .send((self.name.clone(), BrokerEnvelope::ready()))
            .await
            .map_err(|_| ScatterError::BrokerChannelClosed)?;

        let _ = self
            .monitor
            .record(ScatterEvent::now(ScatterEventKind::Registered))
            .await;

        let mut cycles = 0u64;

        while cycles < self.config.max_messages {
            let request = match self.broker_rx.recv().await {
                Some(envelope) => envelope,
                None => break,
            };

            let derived = self.hooks.scatter(request.payload).await;
            let _ = self
                .monitor
                .record(ScatterEvent::now(ScatterEventKind::FanOutStarted {
                    fan_out: derived.len(),
                }))
                .await;

            for (index, message) in derived.iter().enumerate() {
                self.pool
                    .push_tx
                    .send(message.clone())
                    .await
                    .map_err(|_| ScatterError::PoolChannelClosed)?;
                let _ = self
                    .monitor
                    .record(ScatterEvent::now(ScatterEventKind::Pushed { index }))
                    .await;

                let response = self.pool.pull_rx.recv().await.ok_or(ScatterError::PoolChannelClosed)?;
                self.hooks.handle_feedback(response).await;
                let _ = self
                    .monitor
                    .record(ScatterEvent::now(ScatterEventKind::FeedbackHandled { index }))
                    .await;
            }

            let _ = self
                .monitor
                .record(ScatterEvent::now(ScatterEventKind::FanOutCompleted {
                    fan_out: derived.len(),
                }))
                .await;

            if self
                .broker_tx
                .send((self.name.clone(), BrokerEnvelope::new(request.key, self.hooks.reply_feedback())))
                .await
                .is_err()
            {
                break;
            }

            cycles += 1;
        }

        Ok(cycles)
    }
}
