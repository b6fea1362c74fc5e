//! MQTT connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for a single device's broker session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier. Must be unique per device.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Capacity of the client's outgoing request queue.
    pub request_capacity: usize,
}

impl MqttConfig {
    /// Build a configuration for `client_id` against `host:port`, keeping the
    /// remaining defaults.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, client_id: impl Into<String>) -> Self {
        Self {
            broker_host: host.into(),
            broker_port: port,
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "mosquitto".to_string(),
            broker_port: 1883,
            client_id: "homesim".to_string(),
            keep_alive_secs: 60,
            request_capacity: 16,
        }
    }
}
