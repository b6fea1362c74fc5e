//! Message bus port — outbound publishing and the inbound handoff queue.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use homesim_domain::error::HomeSimError;

/// Publishes encoded envelopes to the broker.
///
/// Implementations deliver with at-least-once assurance.
pub trait MessagePublisher: Send + Sync {
    /// Publish `payload` on `topic`.
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), HomeSimError>> + Send;
}

impl<T: MessagePublisher> MessagePublisher for Arc<T> {
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), HomeSimError>> + Send {
        (**self).publish(topic, payload)
    }
}

/// A message delivered by the broker on a subscribed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Producer half of the handoff queue, held by the bus client's delivery task.
pub type InboxSender = mpsc::UnboundedSender<InboundMessage>;

/// Consumer half of the handoff queue, owned by the device loop.
pub type Inbox = mpsc::UnboundedReceiver<InboundMessage>;

/// Create a handoff queue.
///
/// Unbounded so the delivery side never waits on the device loop.
#[must_use]
pub fn inbox() -> (InboxSender, Inbox) {
    mpsc::unbounded_channel()
}
