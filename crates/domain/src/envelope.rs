//! Envelope codec — the flat JSON bodies exchanged over topics.
//!
//! | Body | Direction | Shape |
//! |------|-----------|-------|
//! | [`Reading`] | sensor → broker | `{"<metric>": value, "unit"?: str, "timestamp": str}` |
//! | [`Command`] | broker → actuator | `{"command"?: str, "message"?: any}` |
//! | [`StateNotification`] | actuator → broker | `{"state": str, "timestamp": str, "message"?: any}` |
//!
//! Encoding is deterministic (field order is fixed). Decoding is permissive:
//! missing fields fall back to defaults and unknown fields are ignored.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::actuator::{ActuatorState, Transition};
use crate::error::EnvelopeError;
use crate::sensor::ReadingValue;
use crate::time::{self, Timestamp};

/// A sensor value stamped at the moment it is published.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub metric: &'static str,
    pub value: ReadingValue,
    pub unit: Option<&'static str>,
    pub timestamp: Timestamp,
}

impl Reading {
    #[must_use]
    pub fn new(
        metric: &'static str,
        value: ReadingValue,
        unit: Option<&'static str>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            metric,
            value,
            unit,
            timestamp,
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.unit.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.metric, &self.value)?;
        if let Some(unit) = self.unit {
            map.serialize_entry("unit", unit)?;
        }
        map.serialize_entry("timestamp", &time::to_iso8601(&self.timestamp))?;
        map.end()
    }
}

/// An inbound instruction for an actuator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Command {
    /// Verb, uppercased on decode. Empty when the body has no `command`.
    #[serde(rename = "command")]
    pub verb: String,
    /// Optional payload attached to the command, echoed back as-is.
    pub message: Option<Value>,
}

impl Command {
    /// Build a command directly (verb is uppercased).
    #[must_use]
    pub fn new(verb: &str, message: Option<&str>) -> Self {
        Self {
            verb: verb.to_uppercase(),
            message: message.map(Value::from),
        }
    }

    /// Decode a command body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Malformed`] when the body is not a JSON
    /// object or a field has the wrong type.
    pub fn decode(payload: &[u8]) -> Result<Self, EnvelopeError> {
        let mut command: Self = serde_json::from_slice(payload).map_err(EnvelopeError::Malformed)?;
        command.verb = command.verb.to_uppercase();
        Ok(command)
    }
}

/// Outbound state report emitted after a recognised command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateNotification {
    pub state: ActuatorState,
    #[serde(serialize_with = "time::serialize_iso8601")]
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl StateNotification {
    /// Stamp a transition with the publish instant.
    #[must_use]
    pub fn new(transition: Transition, timestamp: Timestamp) -> Self {
        Self {
            state: transition.state,
            timestamp,
            message: transition.message,
        }
    }
}

/// Serialize an outbound body.
///
/// # Errors
///
/// Returns [`EnvelopeError::Encode`] if serialization fails.
pub fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, EnvelopeError> {
    serde_json::to_vec(body).map_err(EnvelopeError::Encode)
}
