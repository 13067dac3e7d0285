//! End-to-end integration test wiring a real broker between one PALM
//! inbound component and one outbound worker, the way a deployed system
//! would assemble the three collaborators.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use bytes::Bytes;
use palm_broker::broker::{Broker, BrokerConfig, InboundRegistration, OutboundRegistration};
use palm_broker::cache::InMemoryCorrelationCache;
use palm_broker::codec::client as client_codec;
use palm_broker::inbound::{InboundComponent, InboundConfig};
use palm_broker::message::ClientEnvelope;
use palm_broker::monitoring::{BrokerEvent, InMemoryMonitor, InboundEvent, MonitoringConfig, OutboundEvent};
use palm_broker::outbound::{OutboundComponent, OutboundConfig};
use palm_broker::util::ComponentId;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_client_envelope_round_trips_through_a_real_broker_and_worker() {
    let mut broker = Broker::new(
        BrokerConfig::new("broker", 16, u64::MAX),
        InMemoryMonitor::<BrokerEvent>::new(MonitoringConfig::default()),
    );

    let inbound_name = ComponentId::new("producer-1");
    let inbound_reply_rx = broker
        .register_inbound(inbound_name.clone(), InboundRegistration::new("worker-1", true, "producer-1"))
        .unwrap();

    let worker_name = ComponentId::new("worker-1");
    let worker_rx = broker
        .register_outbound(worker_name.clone(), OutboundRegistration::new("worker-1"))
        .unwrap();

    let broker_inbound_tx = broker.inbound_sender();
    let broker_outbound_tx = broker.outbound_sender();
    let broker_handle = tokio::spawn(broker.run());

    let cache = Arc::new(InMemoryCorrelationCache::new());
    let inbound_config = InboundConfig::new("producer-1", true, 1);
    let inbound_component = InboundComponent::new(
        inbound_config,
        cache,
        InMemoryMonitor::<InboundEvent>::new(MonitoringConfig::default()),
        (broker_inbound_tx, inbound_reply_rx),
    )
    .unwrap();

    let outbound_config = OutboundConfig::new("worker-1", 1);
    let outbound_component = OutboundComponent::new(
        outbound_config,
        InMemoryMonitor::<OutboundEvent>::new(MonitoringConfig::default()),
        (broker_outbound_tx, worker_rx),
    )
    .unwrap();

    let (external_tx_in, external_rx_in) = mpsc::channel(8);
    let (external_tx_out, mut external_rx_out) = mpsc::channel(8);

    let client_envelope = ClientEnvelope::new("client-1", "pipeline-1", "uppercase", "stage0", Bytes::from_static(b"hello"));
    let wire = Bytes::from(client_codec::encode(&client_envelope));
    external_tx_in.send(wire).await.unwrap();

    let inbound_handle = tokio::spawn(inbound_component.start(external_rx_in, external_tx_out));
    let outbound_handle = tokio::spawn(outbound_component.start());

    let reply = external_rx_out.recv().await.unwrap();
    let decoded = client_codec::decode(&reply).unwrap();
    assert_eq!(decoded.client_id, "client-1");
    assert_eq!(decoded.pipeline_id, "pipeline-1");
    // The default (identity) outbound handler echoes the payload back
    // unchanged.
    assert_eq!(decoded.payload.as_ref(), b"hello");

    assert_eq!(inbound_handle.await.unwrap().unwrap(), 1);
    assert_eq!(outbound_handle.await.unwrap().unwrap(), 1);

    broker_handle.abort();
}
