//! # homesim-adapter-mqtt
//!
//! MQTT adapter — connects one simulated device to the broker.
//!
//! ## How it works
//!
//! [`MqttBus::connect`] makes a **single** connection attempt and fails with
//! [`MqttError::Connection`] if the broker does not acknowledge it. Once
//! connected, a background driver task keeps polling the `rumqttc` event loop:
//!
//! - inbound PUBLISH packets are pushed onto the device's handoff queue
//! - after a reconnect the command subscription is re-issued
//! - transient connection loss is logged; the client reconnects on the next poll
//!
//! Every subscribe and publish uses QoS 1 (at-least-once). Publishing never
//! waits on the client's request queue: when the queue is full (typically
//! because the broker went away) the publish fails immediately.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `homesim-app` and `homesim-domain`.

mod config;
mod driver;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use tokio::task::JoinHandle;

use homesim_app::ports::{InboxSender, MessagePublisher};
use homesim_domain::error::HomeSimError;

/// How long [`MqttBus::disconnect`] waits for the driver to flush.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// A topic to subscribe to and the queue its messages are handed to.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub topic: String,
    pub inbox: InboxSender,
}

impl Subscription {
    #[must_use]
    pub fn new(topic: impl Into<String>, inbox: InboxSender) -> Self {
        Self {
            topic: topic.into(),
            inbox,
        }
    }
}

/// A live broker session owned by one device.
pub struct MqttBus {
    client: AsyncClient,
    driver: JoinHandle<()>,
    subscribed: Option<String>,
}

impl MqttBus {
    /// Connect to the broker and, if given, subscribe to the command topic.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Connection`] when the broker is unreachable or
    /// refuses the session. No retry is attempted.
    pub async fn connect(
        config: &MqttConfig,
        subscription: Option<Subscription>,
    ) -> Result<Self, MqttError> {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive());

        let (client, mut eventloop) = AsyncClient::new(options, config.request_capacity);
        wait_for_connack(&mut eventloop).await?;

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            client_id = %config.client_id,
            "connected to broker"
        );

        let subscribed = match &subscription {
            Some(sub) => {
                client
                    .subscribe(sub.topic.clone(), QoS::AtLeastOnce)
                    .await
                    .map_err(MqttError::Client)?;
                tracing::info!(topic = %sub.topic, "subscribed");
                Some(sub.topic.clone())
            }
            None => None,
        };

        let driver = tokio::spawn(driver::drive(eventloop, client.clone(), subscription));

        Ok(Self {
            client,
            driver,
            subscribed,
        })
    }

    /// A cloneable handle implementing the [`MessagePublisher`] port.
    #[must_use]
    pub fn publisher(&self) -> MqttPublisher {
        MqttPublisher {
            client: self.client.clone(),
        }
    }

    /// Orderly shutdown: unsubscribe, send DISCONNECT, then stop the driver.
    pub async fn disconnect(mut self) {
        if let Some(topic) = self.subscribed.take()
            && let Err(err) = self.client.unsubscribe(topic.clone()).await
        {
            tracing::warn!(%err, %topic, "failed to unsubscribe");
        }
        if let Err(err) = self.client.disconnect().await {
            tracing::warn!(%err, "failed to request disconnect");
        }

        if tokio::time::timeout(SHUTDOWN_GRACE, &mut self.driver)
            .await
            .is_err()
        {
            tracing::warn!("MQTT driver did not stop in time, aborting");
            self.driver.abort();
        }
        tracing::info!("disconnected from broker");
    }
}

/// Poll until the broker acknowledges the session.
async fn wait_for_connack(eventloop: &mut EventLoop) -> Result<(), MqttError> {
    loop {
        match eventloop.poll().await {
            Ok(rumqttc::Event::Incoming(rumqttc::Packet::ConnAck(ack))) => {
                tracing::debug!(code = ?ack.code, "CONNACK received");
                return Ok(());
            }
            Ok(_) => {}
            Err(err) => return Err(MqttError::Connection(err)),
        }
    }
}

/// Publishing half of an [`MqttBus`].
///
/// Uses `try_publish` so a stalled connection surfaces as an error instead
/// of blocking the caller.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MessagePublisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), HomeSimError> {
        self.client
            .try_publish(topic, QoS::AtLeastOnce, false, payload)
            .map_err(|err| MqttError::Client(err).into_domain())
    }
}
