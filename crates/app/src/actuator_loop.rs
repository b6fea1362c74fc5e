//! Actuator loop — the single consumer of the handoff queue.
//!
//! The broker client's delivery task only enqueues; this loop is the sole
//! owner of the actuator and therefore of its state cell. Messages are handled
//! strictly one at a time, in arrival order.
//!
//! Per message:
//! 1. decode the JSON body (malformed → log, skip)
//! 2. apply the command (unknown verb → log, skip)
//! 3. stamp and publish a [`StateNotification`] (failure → log)

use homesim_domain::actuator::{Actuator, ActuatorState};
use homesim_domain::envelope::{self, Command, StateNotification};
use homesim_domain::time::now;

use crate::ports::{Inbox, MessagePublisher};

/// Command processor for a single [`Actuator`].
pub struct ActuatorLoop<A, P> {
    actuator: A,
    publisher: P,
    state_topic: String,
    inbox: Inbox,
}

impl<A, P> ActuatorLoop<A, P>
where
    A: Actuator + Send,
    P: MessagePublisher,
{
    #[must_use]
    pub fn new(actuator: A, publisher: P, state_topic: impl Into<String>, inbox: Inbox) -> Self {
        Self {
            actuator,
            publisher,
            state_topic: state_topic.into(),
            inbox,
        }
    }

    /// Current value of the actuator's state cell.
    #[must_use]
    pub fn state(&self) -> ActuatorState {
        self.actuator.state()
    }

    /// Process one inbound body.
    ///
    /// Returns the notification when the command was recognised (whether or
    /// not the publish itself succeeded), `None` when the body was skipped.
    pub async fn handle(&mut self, payload: &[u8]) -> Option<StateNotification> {
        let device = self.actuator.name();

        let command = match Command::decode(payload) {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!(device, %err, "dropping malformed command payload");
                return None;
            }
        };

        let transition = match self.actuator.apply(&command) {
            Ok(transition) => transition,
            Err(err) => {
                tracing::info!(device, %err, "ignoring command");
                return None;
            }
        };

        tracing::info!(
            device,
            command = %command.verb,
            state = %transition.state,
            message = ?transition.message,
            "state changed"
        );

        let notification = StateNotification::new(transition, now());
        let payload = match envelope::encode(&notification) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(device, %err, "failed to encode state notification");
                return Some(notification);
            }
        };

        match self.publisher.publish(&self.state_topic, payload).await {
            Ok(()) => tracing::debug!(device, topic = %self.state_topic, "state published"),
            Err(err) => tracing::error!(device, %err, "failed to publish state"),
        }

        Some(notification)
    }

    /// Drain the handoff queue until every producer is gone.
    ///
    /// Returns the actuator so callers can inspect its final state.
    pub async fn run(mut self) -> A {
        tracing::info!(
            device = self.actuator.name(),
            topic = %self.state_topic,
            "actuator loop started"
        );

        while let Some(message) = self.inbox.recv().await {
            tracing::debug!(topic = %message.topic, bytes = message.payload.len(), "command received");
            self.handle(&message.payload).await;
        }

        tracing::debug!(device = self.actuator.name(), "inbox closed");
        self.actuator
    }
}

#[cfg(test)]
mod tests {
    use homesim_domain::actuator::{Alarm, Lamp};

    use super::*;
    use crate::ports::{InboundMessage, inbox};
    use crate::testing::RecordingPublisher;

    fn lamp(publisher: &RecordingPublisher) -> ActuatorLoop<Lamp, RecordingPublisher> {
        let (_tx, rx) = inbox();
        ActuatorLoop::new(Lamp::default(), publisher.clone(), "home/lamp/state", rx)
    }

    fn alarm(publisher: &RecordingPublisher) -> ActuatorLoop<Alarm, RecordingPublisher> {
        let (_tx, rx) = inbox();
        ActuatorLoop::new(Alarm::default(), publisher.clone(), "home/alarm/state", rx)
    }

    #[tokio::test]
    async fn should_turn_lamp_on_and_publish_once() {
        let publisher = RecordingPublisher::default();
        let mut device = lamp(&publisher);

        let notification = device.handle(br#"{"command":"on"}"#).await.unwrap();

        assert_eq!(notification.state, ActuatorState::On);
        assert_eq!(device.state(), ActuatorState::On);
        assert_eq!(publisher.topics(), vec!["home/lamp/state"]);
        let body = &publisher.bodies()[0];
        assert_eq!(body["state"], "ON");
        assert!(body.get("message").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn should_ignore_unknown_command() {
        let publisher = RecordingPublisher::default();
        let mut device = lamp(&publisher);

        assert!(device.handle(br#"{"command":"FOO"}"#).await.is_none());

        assert_eq!(device.state(), ActuatorState::Off);
        assert_eq!(publisher.count(), 0);
    }

    #[tokio::test]
    async fn should_ignore_missing_command() {
        let publisher = RecordingPublisher::default();
        let mut device = alarm(&publisher);

        assert!(device.handle(br#"{"message":"hello"}"#).await.is_none());

        assert_eq!(device.state(), ActuatorState::Off);
        assert_eq!(publisher.count(), 0);
    }

    #[tokio::test]
    async fn should_ignore_malformed_payload() {
        let publisher = RecordingPublisher::default();
        let mut device = lamp(&publisher);
        device.handle(br#"{"command":"ON"}"#).await.unwrap();

        assert!(device.handle(b"not json at all").await.is_none());

        assert_eq!(device.state(), ActuatorState::On);
        assert_eq!(publisher.count(), 1);
    }

    #[tokio::test]
    async fn should_default_alarm_message_to_emergency() {
        let publisher = RecordingPublisher::default();
        let mut device = alarm(&publisher);

        device.handle(br#"{"command":"TRIGGER"}"#).await.unwrap();

        let body = &publisher.bodies()[0];
        assert_eq!(body["state"], "ON");
        assert_eq!(body["message"], "Emergency!");
    }

    #[tokio::test]
    async fn should_echo_alarm_message_verbatim() {
        let publisher = RecordingPublisher::default();
        let mut device = alarm(&publisher);

        device
            .handle(br#"{"command":"TRIGGER","message":"fire"}"#)
            .await
            .unwrap();

        assert_eq!(publisher.bodies()[0]["message"], "fire");
    }

    #[tokio::test]
    async fn should_switch_lamp_on_whatever_the_message_type() {
        let publisher = RecordingPublisher::default();
        let mut device = lamp(&publisher);

        let notification = device.handle(br#"{"command":"ON","message":42}"#).await;

        assert!(notification.is_some());
        assert_eq!(device.state(), ActuatorState::On);
        assert_eq!(publisher.count(), 1);
        assert!(publisher.bodies()[0].get("message").is_none());
    }

    #[tokio::test]
    async fn should_echo_non_string_alarm_message() {
        let publisher = RecordingPublisher::default();
        let mut device = alarm(&publisher);

        device
            .handle(br#"{"command":"TRIGGER","message":{"zone":3}}"#)
            .await
            .unwrap();

        assert_eq!(device.state(), ActuatorState::On);
        let body = &publisher.bodies()[0];
        assert_eq!(body["state"], "ON");
        assert_eq!(body["message"]["zone"], 3);
    }

    #[tokio::test]
    async fn should_silence_alarm() {
        let publisher = RecordingPublisher::default();
        let mut device = alarm(&publisher);

        device.handle(br#"{"command":"silence"}"#).await.unwrap();

        assert_eq!(device.state(), ActuatorState::Silenced);
        assert_eq!(publisher.bodies()[0]["state"], "SILENCED");
    }

    #[tokio::test]
    async fn should_apply_state_even_when_publish_fails() {
        let publisher = RecordingPublisher::failing_first(1);
        let mut device = lamp(&publisher);

        let notification = device.handle(br#"{"command":"ON"}"#).await;

        assert!(notification.is_some());
        assert_eq!(device.state(), ActuatorState::On);
        assert_eq!(publisher.count(), 0);
    }

    #[tokio::test]
    async fn should_process_commands_in_arrival_order() {
        let publisher = RecordingPublisher::default();
        let (tx, rx) = inbox();
        let device = ActuatorLoop::new(Alarm::default(), publisher.clone(), "s", rx);

        tx.send(InboundMessage::new("c", r#"{"command":"TRIGGER"}"#)).unwrap();
        tx.send(InboundMessage::new("c", r#"{"command":"RESET"}"#)).unwrap();
        drop(tx);

        let alarm = device.run().await;

        assert_eq!(alarm.state(), ActuatorState::Off);
        let states: Vec<_> = publisher
            .bodies()
            .iter()
            .map(|b| b["state"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(states, vec!["ON", "OFF"]);
    }

    #[tokio::test]
    async fn should_keep_draining_after_malformed_message() {
        let publisher = RecordingPublisher::default();
        let (tx, rx) = inbox();
        let device = ActuatorLoop::new(Lamp::default(), publisher.clone(), "s", rx);

        tx.send(InboundMessage::new("c", "{{{")).unwrap();
        tx.send(InboundMessage::new("c", r#"{"command":"BLINK"}"#)).unwrap();
        tx.send(InboundMessage::new("c", r#"{"command":"ON"}"#)).unwrap();
        drop(tx);

        let lamp = device.run().await;

        assert_eq!(lamp.state(), ActuatorState::On);
        assert_eq!(publisher.count(), 1);
    }
}
