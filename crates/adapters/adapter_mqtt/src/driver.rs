//! Background task that polls the `rumqttc` event loop.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Outgoing, Packet, Publish, QoS};

use homesim_app::ports::{InboundMessage, InboxSender};

use crate::Subscription;

/// Pause between polls after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Poll until DISCONNECT has been sent. The task is aborted if that never
/// happens within the shutdown grace period.
pub(crate) async fn drive(
    mut eventloop: EventLoop,
    client: AsyncClient,
    subscription: Option<Subscription>,
) {
    loop {
        let event = match eventloop.poll().await {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%err, "broker connection lost, reconnecting");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        match event {
            Event::Incoming(Packet::Publish(publish)) => {
                if let Some(sub) = &subscription {
                    forward(&publish, &sub.inbox);
                }
            }
            Event::Incoming(Packet::ConnAck(_)) => {
                tracing::info!("reconnected to broker");
                if let Some(sub) = &subscription
                    && let Err(err) = client.try_subscribe(sub.topic.clone(), QoS::AtLeastOnce)
                {
                    tracing::warn!(%err, topic = %sub.topic, "failed to re-subscribe");
                }
            }
            Event::Outgoing(Outgoing::Disconnect) => {
                tracing::debug!("DISCONNECT sent, stopping driver");
                break;
            }
            _ => {}
        }
    }
}

/// Hand an inbound PUBLISH over to the device loop. Never blocks.
pub(crate) fn forward(publish: &Publish, inbox: &InboxSender) {
    let message = InboundMessage::new(publish.topic.clone(), publish.payload.to_vec());
    if inbox.send(message).is_err() {
        tracing::debug!(topic = %publish.topic, "inbox closed, dropping message");
    }
}
