//! Sensors — synthetic value generators with a fixed publish cadence.
//!
//! Values are drawn from a flat uniform distribution with no correlation to
//! earlier readings. The random source is passed in so callers decide how it
//! is seeded.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;

/// Value carried by a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Number(f64),
    Flag(bool),
}

impl fmt::Display for ReadingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Flag(v) => write!(f, "{v}"),
        }
    }
}

/// A device that periodically produces a reading.
pub trait Sensor {
    /// JSON key under which the value is published (e.g. `"temperature"`).
    fn metric(&self) -> &'static str;

    /// Optional unit published alongside the value.
    fn unit(&self) -> Option<&'static str>;

    /// Fixed delay between two publishes.
    fn interval(&self) -> Duration;

    /// Draw a fresh synthetic value.
    fn sample<R: Rng>(&self, rng: &mut R) -> ReadingValue;
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Temperature in °C, uniform in `[20.0, 30.0]`, every 5 s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureSensor;

impl TemperatureSensor {
    pub const MIN: f64 = 20.0;
    pub const MAX: f64 = 30.0;
}

impl Sensor for TemperatureSensor {
    fn metric(&self) -> &'static str {
        "temperature"
    }

    fn unit(&self) -> Option<&'static str> {
        Some("\u{b0}C")
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(5)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> ReadingValue {
        ReadingValue::Number(round2(rng.random_range(Self::MIN..=Self::MAX)))
    }
}

/// Relative humidity in %, uniform in `[30.0, 70.0]`, every 7 s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumiditySensor;

impl HumiditySensor {
    pub const MIN: f64 = 30.0;
    pub const MAX: f64 = 70.0;
}

impl Sensor for HumiditySensor {
    fn metric(&self) -> &'static str {
        "humidity"
    }

    fn unit(&self) -> Option<&'static str> {
        Some("%")
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(7)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> ReadingValue {
        ReadingValue::Number(round2(rng.random_range(Self::MIN..=Self::MAX)))
    }
}

/// Presence detector — a fair coin flip every 4 s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSensor;

impl Sensor for MotionSensor {
    fn metric(&self) -> &'static str {
        "motion"
    }

    fn unit(&self) -> Option<&'static str> {
        None
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(4)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> ReadingValue {
        ReadingValue::Flag(rng.random_bool(0.5))
    }
}
