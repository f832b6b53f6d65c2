//! MQTT transport for the client.
//!
//! Provides [`BusHandle`], a thin layer that turns broker notifications into
//! [`BusEvent`]s and carries out [`Outbound`] requests. Routing logic remains
//! in the Sans-IO [`nako_app::Router`].

use std::time::Duration;

use nako_app::{BusEvent, Outbound};
use rumqttc::{AsyncClient, ClientError, Event, EventLoop, MqttOptions, Packet, QoS};
use thiserror::Error;
use tokio::sync::mpsc;

/// Capacity of the request queue between the client and its event loop.
const REQUEST_CAPACITY: usize = 64;
/// Capacity of the notification queue towards the runtime.
const EVENT_CAPACITY: usize = 256;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be queued for the broker.
    #[error("broker request failed: {0}")]
    Client(#[from] ClientError),
}

/// Broker connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusOptions {
    /// MQTT client id.
    pub client_id: String,
    /// Broker host name or address.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Keep-alive interval.
    pub keep_alive: Duration,
    /// Pause before retrying a failed connection.
    pub reconnect_delay: Duration,
}

impl BusOptions {
    /// Options with a 30 s keep-alive and a 5 s reconnect delay.
    pub fn new(client_id: String, host: String, port: u16) -> Self {
        Self {
            client_id,
            host,
            port,
            keep_alive: Duration::from_secs(30),
            reconnect_delay: Duration::from_secs(5),
        }
    }
}

/// Handle to the broker connection.
///
/// Requests go through the [`AsyncClient`]; notifications arrive on a channel
/// fed by an internal task that drives the MQTT event loop.
pub struct BusHandle {
    client: AsyncClient,
    events: mpsc::Receiver<BusEvent>,
    abort_handle: tokio::task::AbortHandle,
}

impl BusHandle {
    /// Queue a bus request. Everything is sent at QoS 0, not retained.
    ///
    /// Never waits: while the broker is unreachable the request queue fills
    /// up and further requests fail with [`ClientError::TryRequest`].
    pub fn execute(&self, request: Outbound) -> Result<(), TransportError> {
        match request {
            Outbound::Subscribe { topic } => {
                self.client.try_subscribe(topic, QoS::AtMostOnce)?;
            },
            Outbound::Publish { topic, payload } => {
                self.client.try_publish(topic, QoS::AtMostOnce, false, payload)?;
            },
        }
        Ok(())
    }

    /// Next notification. `None` once the event loop task has ended.
    pub async fn recv(&mut self) -> Option<BusEvent> {
        self.events.recv().await
    }

    /// Disconnect and stop the event loop task.
    pub fn stop(&self) {
        if let Err(e) = self.client.try_disconnect() {
            tracing::debug!(error = %e, "disconnect request not queued");
        }
        self.abort_handle.abort();
    }
}

/// Start connecting to the broker.
///
/// Returns immediately; the connection outcome is reported as
/// [`BusEvent::Connected`] or [`BusEvent::Disconnected`]. Must be called from
/// within a Tokio runtime.
pub fn connect(options: BusOptions) -> BusHandle {
    let mut mqtt = MqttOptions::new(options.client_id.clone(), options.host.clone(), options.port);
    mqtt.set_keep_alive(options.keep_alive);
    mqtt.set_clean_session(true);

    let (client, event_loop) = AsyncClient::new(mqtt, REQUEST_CAPACITY);
    let (events_tx, events_rx) = mpsc::channel(EVENT_CAPACITY);

    let handle = tokio::spawn(run_event_loop(event_loop, events_tx, options.reconnect_delay));

    BusHandle { client, events: events_rx, abort_handle: handle.abort_handle() }
}

/// Drive the MQTT event loop, forwarding notifications.
///
/// A poll error reports the disconnect, waits, and announces the retry; the
/// next poll reconnects.
async fn run_event_loop(
    mut event_loop: EventLoop,
    events: mpsc::Sender<BusEvent>,
    reconnect_delay: Duration,
) {
    loop {
        let event = match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => BusEvent::Connected,
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                BusEvent::Message { topic: publish.topic, payload: publish.payload.to_vec() }
            },
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "broker connection error");
                if events.send(BusEvent::Disconnected { reason: e.to_string() }).await.is_err() {
                    break;
                }
                tokio::time::sleep(reconnect_delay).await;
                BusEvent::Reconnecting
            },
        };

        if events.send(event).await.is_err() {
            break;
        }
    }

    tracing::debug!("bus event loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn full_request_queue_fails_instead_of_waiting() {
        let bus = connect(BusOptions::new("nako_test".into(), "127.0.0.1".into(), 1));

        let results: Vec<_> = (0..REQUEST_CAPACITY * 2)
            .map(|i| bus.execute(Outbound::publish("/gowon/input", format!("line {i}"))))
            .collect();

        assert!(results.iter().any(|r| matches!(r, Err(TransportError::Client(_)))));
        bus.stop();
    }
}
