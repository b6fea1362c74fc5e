//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory (or the path in
//! `HOMESIM_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values
//! (`BROKER`, `PORT`, `SENSOR_TEMPERATURE`, `LAMP_TOPIC_CMD`, …).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use homesim_adapter_mqtt::MqttConfig;
use homesim_domain::device::DeviceKind;

const DEFAULT_CONFIG_FILE: &str = "homesim.toml";

/// Top-level configuration shared by every device binary.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection settings.
    pub broker: BrokerConfig,
    /// Topic names per device.
    pub topics: TopicsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Broker connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub keep_alive_secs: u16,
}

/// Inbound and outbound topics.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub temperature: String,
    pub humidity: String,
    pub motion: String,
    pub lamp_command: String,
    pub lamp_state: String,
    pub alarm_command: String,
    pub alarm_state: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
    /// Per-sensor log files. Actuators log to the console only.
    pub temperature_file: PathBuf,
    pub humidity_file: PathBuf,
    pub motion_file: PathBuf,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMESIM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let strings = [
            ("BROKER", &mut self.broker.host),
            ("SENSOR_TEMPERATURE", &mut self.topics.temperature),
            ("SENSOR_HUMIDITY", &mut self.topics.humidity),
            ("SENSOR_MOTION", &mut self.topics.motion),
            ("LAMP_TOPIC_CMD", &mut self.topics.lamp_command),
            ("LAMP_TOPIC_STATE", &mut self.topics.lamp_state),
            ("ALARM_TOPIC_CMD", &mut self.topics.alarm_command),
            ("ALARM_TOPIC_STATE", &mut self.topics.alarm_state),
        ];
        for (key, field) in strings {
            if let Some(val) = lookup(key) {
                *field = val;
            }
        }

        let paths = [
            ("LOG_TEMPERATURE", &mut self.logging.temperature_file),
            ("LOG_HUMIDITY", &mut self.logging.humidity_file),
            ("LOG_MOTION", &mut self.logging.motion_file),
        ];
        for (key, field) in paths {
            if let Some(val) = lookup(key) {
                *field = PathBuf::from(val);
            }
        }

        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("HOMESIM_LOG")) {
            self.logging.filter = filter;
        }

        if let Some(port) = lookup("PORT").and_then(|val| val.parse().ok()) {
            self.broker.port = port;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.broker.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.broker.host.is_empty() {
            return Err(ConfigError::Validation("broker host must not be empty".to_string()));
        }
        for kind in DeviceKind::ALL {
            let missing_command_topic =
                kind.is_actuator() && self.inbound_topic(kind).is_none_or(str::is_empty);
            if self.outbound_topic(kind).is_empty() || missing_command_topic {
                return Err(ConfigError::Validation(format!(
                    "topics for {kind} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Broker session settings for `kind`, using its fixed client identity.
    #[must_use]
    pub fn mqtt(&self, kind: DeviceKind) -> MqttConfig {
        let mut mqtt = MqttConfig::new(&self.broker.host, self.broker.port, kind.client_id());
        mqtt.keep_alive_secs = self.broker.keep_alive_secs;
        mqtt
    }

    /// Topic the device publishes on.
    #[must_use]
    pub fn outbound_topic(&self, kind: DeviceKind) -> &str {
        match kind {
            DeviceKind::TemperatureSensor => &self.topics.temperature,
            DeviceKind::HumiditySensor => &self.topics.humidity,
            DeviceKind::MotionSensor => &self.topics.motion,
            DeviceKind::Lamp => &self.topics.lamp_state,
            DeviceKind::Alarm => &self.topics.alarm_state,
        }
    }

    /// Command topic, for actuators only.
    #[must_use]
    pub fn inbound_topic(&self, kind: DeviceKind) -> Option<&str> {
        match kind {
            DeviceKind::Lamp => Some(&self.topics.lamp_command),
            DeviceKind::Alarm => Some(&self.topics.alarm_command),
            _ => None,
        }
    }

    /// Log file for sensors; `None` for actuators.
    #[must_use]
    pub fn log_file(&self, kind: DeviceKind) -> Option<&Path> {
        match kind {
            DeviceKind::TemperatureSensor => Some(&self.logging.temperature_file),
            DeviceKind::HumiditySensor => Some(&self.logging.humidity_file),
            DeviceKind::MotionSensor => Some(&self.logging.motion_file),
            DeviceKind::Lamp | DeviceKind::Alarm => None,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "mosquitto".to_string(),
            port: 1883,
            keep_alive_secs: 60,
        }
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            temperature: "home/sensor/temperature".to_string(),
            humidity: "home/sensor/humidity".to_string(),
            motion: "home/sensor/motion".to_string(),
            lamp_command: "home/lamp/command".to_string(),
            lamp_state: "home/lamp/state".to_string(),
            alarm_command: "home/alarm/command".to_string(),
            alarm_state: "home/alarm/state".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            temperature_file: PathBuf::from("logs/temperature.log"),
            humidity_file: PathBuf::from("logs/humidity.log"),
            motion_file: PathBuf::from("logs/motion.log"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
