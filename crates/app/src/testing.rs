//! In-memory publisher used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use homesim_domain::error::HomeSimError;

use crate::ports::MessagePublisher;

/// Records every successful publish; can be told to fail the first `n` calls.
#[derive(Clone, Default)]
pub(crate) struct RecordingPublisher {
    published: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    failures_left: Arc<AtomicUsize>,
}

impl RecordingPublisher {
    pub(crate) fn failing_first(n: usize) -> Self {
        let publisher = Self::default();
        publisher.failures_left.store(n, Ordering::SeqCst);
        publisher
    }

    pub(crate) fn topics(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    pub(crate) fn bodies(&self) -> Vec<serde_json::Value> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| serde_json::from_slice(payload).unwrap())
            .collect()
    }

    pub(crate) fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), HomeSimError> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(HomeSimError::Bus(Box::new(std::io::Error::other(
                "broker unavailable",
            ))));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }
}
