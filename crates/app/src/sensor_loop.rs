//! Sensor loop — sample, stamp, publish, then wait for the next tick.
//!
//! The cadence is driven by a [`tokio::time::Interval`], so the loop can be
//! cancelled by dropping its future and tested with virtual time. A failed
//! publish is logged and the loop carries on with the next tick; nothing is
//! retried.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::MissedTickBehavior;

use homesim_domain::envelope::{self, Reading};
use homesim_domain::error::HomeSimError;
use homesim_domain::sensor::Sensor;
use homesim_domain::time::now;

use crate::ports::MessagePublisher;

/// Periodic publisher for a single [`Sensor`].
pub struct SensorLoop<S, P> {
    sensor: S,
    publisher: P,
    topic: String,
    rng: StdRng,
}

impl<S, P> SensorLoop<S, P>
where
    S: Sensor + Send,
    P: MessagePublisher,
{
    /// Create a loop publishing `sensor` readings on `topic`, seeded from the OS.
    #[must_use]
    pub fn new(sensor: S, publisher: P, topic: impl Into<String>) -> Self {
        Self {
            sensor,
            publisher,
            topic: topic.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source (useful for deterministic runs).
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Draw one value and publish it, stamped with the current instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope cannot be encoded or the publisher
    /// rejects the message.
    pub async fn publish_reading(&mut self) -> Result<Reading, HomeSimError> {
        let value = self.sensor.sample(&mut self.rng);
        let reading = Reading::new(self.sensor.metric(), value, self.sensor.unit(), now());
        let payload = envelope::encode(&reading)?;
        self.publisher.publish(&self.topic, payload).await?;
        Ok(reading)
    }

    /// Publish forever at the sensor's fixed interval, starting immediately.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.sensor.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            metric = self.sensor.metric(),
            topic = %self.topic,
            interval_secs = self.sensor.interval().as_secs(),
            "sensor loop started"
        );

        loop {
            ticker.tick().await;
            match self.publish_reading().await {
                Ok(reading) => tracing::info!(
                    metric = reading.metric,
                    value = %reading.value,
                    unit = reading.unit.unwrap_or_default(),
                    topic = %self.topic,
                    "reading published"
                ),
                Err(err) => tracing::error!(%err, topic = %self.topic, "failed to publish reading"),
            }
        }
    }
}
