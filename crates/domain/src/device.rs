//! Device kinds — the five simulated programs and their broker identities.

use std::fmt;

/// One of the simulated devices. Each runs as its own process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    TemperatureSensor,
    HumiditySensor,
    MotionSensor,
    Lamp,
    Alarm,
}

impl DeviceKind {
    /// Every device kind, sensors first.
    pub const ALL: [Self; 5] = [
        Self::TemperatureSensor,
        Self::HumiditySensor,
        Self::MotionSensor,
        Self::Lamp,
        Self::Alarm,
    ];

    /// Fixed client identity used when connecting to the broker.
    #[must_use]
    pub fn client_id(self) -> &'static str {
        match self {
            Self::TemperatureSensor => "temperature_sensor",
            Self::HumiditySensor => "humidity_sensor",
            Self::MotionSensor => "motion_sensor",
            Self::Lamp => "lamp_actuator",
            Self::Alarm => "alarm_actuator",
        }
    }

    /// Whether this device only publishes readings.
    #[must_use]
    pub fn is_sensor(self) -> bool {
        matches!(
            self,
            Self::TemperatureSensor | Self::HumiditySensor | Self::MotionSensor
        )
    }

    /// Whether this device consumes commands and publishes state.
    #[must_use]
    pub fn is_actuator(self) -> bool {
        !self.is_sensor()
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureSensor => f.write_str("temperature-sensor"),
            Self::HumiditySensor => f.write_str("humidity-sensor"),
            Self::MotionSensor => f.write_str("motion-sensor"),
            Self::Lamp => f.write_str("lamp-actuator"),
            Self::Alarm => f.write_str("alarm-actuator"),
        }
    }
}
