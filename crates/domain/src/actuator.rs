//! Actuators — devices driven by inbound commands.
//!
//! Each actuator owns a single state cell. [`Actuator::apply`] mutates it
//! exactly once for a recognised verb and leaves it untouched otherwise.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::envelope::Command;
use crate::error::UnknownCommand;

/// Current condition of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActuatorState {
    On,
    #[default]
    Off,
    Silenced,
}

impl fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("ON"),
            Self::Off => f.write_str("OFF"),
            Self::Silenced => f.write_str("SILENCED"),
        }
    }
}

/// Outcome of a recognised command: the new state plus an optional echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ActuatorState,
    pub message: Option<Value>,
}

/// A device that reacts to commands.
pub trait Actuator {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Current value of the state cell.
    fn state(&self) -> ActuatorState;

    /// Apply a command to the state cell.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCommand`] when the verb is not recognised; the state
    /// is left unchanged in that case.
    fn apply(&mut self, command: &Command) -> Result<Transition, UnknownCommand>;
}

/// Verbs understood by the [`Lamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampCommand {
    On,
    Off,
}

impl FromStr for LampCommand {
    type Err = UnknownCommand;

    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        match verb {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            other => Err(UnknownCommand {
                verb: other.to_string(),
            }),
        }
    }
}

/// A lamp that can be switched on and off.
#[derive(Debug, Default)]
pub struct Lamp {
    state: ActuatorState,
}

impl Actuator for Lamp {
    fn name(&self) -> &'static str {
        "lamp"
    }

    fn state(&self) -> ActuatorState {
        self.state
    }

    fn apply(&mut self, command: &Command) -> Result<Transition, UnknownCommand> {
        self.state = match command.verb.parse::<LampCommand>()? {
            LampCommand::On => ActuatorState::On,
            LampCommand::Off => ActuatorState::Off,
        };
        Ok(Transition {
            state: self.state,
            message: None,
        })
    }
}

/// Verbs understood by the [`Alarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCommand {
    Trigger,
    Reset,
    Silence,
}

impl FromStr for AlarmCommand {
    type Err = UnknownCommand;

    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        match verb {
            "TRIGGER" => Ok(Self::Trigger),
            "RESET" => Ok(Self::Reset),
            "SILENCE" => Ok(Self::Silence),
            other => Err(UnknownCommand {
                verb: other.to_string(),
            }),
        }
    }
}

/// An emergency alarm.
///
/// Every notification echoes the command's `message`, falling back to
/// [`Alarm::DEFAULT_MESSAGE`].
#[derive(Debug, Default)]
pub struct Alarm {
    state: ActuatorState,
}

impl Alarm {
    pub const DEFAULT_MESSAGE: &'static str = "Emergency!";
}

impl Actuator for Alarm {
    fn name(&self) -> &'static str {
        "alarm"
    }

    fn state(&self) -> ActuatorState {
        self.state
    }

    fn apply(&mut self, command: &Command) -> Result<Transition, UnknownCommand> {
        self.state = match command.verb.parse::<AlarmCommand>()? {
            AlarmCommand::Trigger => ActuatorState::On,
            AlarmCommand::Reset => ActuatorState::Off,
            AlarmCommand::Silence => ActuatorState::Silenced,
        };
        let message = command
            .message
            .clone()
            .unwrap_or_else(|| Value::from(Self::DEFAULT_MESSAGE));
        Ok(Transition {
            state: self.state,
            message: Some(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_off() {
        assert_eq!(Lamp::default().state(), ActuatorState::Off);
        assert_eq!(Alarm::default().state(), ActuatorState::Off);
    }

    #[test]
    fn should_start_off_after_every_restart() {
        let mut lamp = Lamp::default();
        lamp.apply(&Command::new("on", None)).unwrap();
        drop(lamp);
        assert_eq!(Lamp::default().state(), ActuatorState::Off);

        let mut alarm = Alarm::default();
        alarm.apply(&Command::new("silence", None)).unwrap();
        drop(alarm);
        assert_eq!(Alarm::default().state(), ActuatorState::Off);
    }

    #[test]
    fn should_switch_lamp_on_and_off() {
        let mut lamp = Lamp::default();
        let t = lamp.apply(&Command::new("ON", None)).unwrap();
        assert_eq!(t.state, ActuatorState::On);
        assert_eq!(lamp.state(), ActuatorState::On);
        assert!(t.message.is_none());

        let t = lamp.apply(&Command::new("off", None)).unwrap();
        assert_eq!(t.state, ActuatorState::Off);
        assert_eq!(lamp.state(), ActuatorState::Off);
    }

    #[test]
    fn should_leave_lamp_unchanged_on_unknown_verb() {
        let mut lamp = Lamp::default();
        lamp.apply(&Command::new("ON", None)).unwrap();
        let err = lamp.apply(&Command::new("TOGGLE", None)).unwrap_err();
        assert_eq!(err.verb, "TOGGLE");
        assert_eq!(lamp.state(), ActuatorState::On);
    }

    #[test]
    fn should_not_accept_alarm_verbs_on_lamp() {
        let mut lamp = Lamp::default();
        assert!(lamp.apply(&Command::new("TRIGGER", None)).is_err());
        assert_eq!(lamp.state(), ActuatorState::Off);
    }

    #[test]
    fn should_map_alarm_verbs_to_states() {
        let mut alarm = Alarm::default();
        assert_eq!(
            alarm.apply(&Command::new("TRIGGER", None)).unwrap().state,
            ActuatorState::On
        );
        assert_eq!(
            alarm.apply(&Command::new("SILENCE", None)).unwrap().state,
            ActuatorState::Silenced
        );
        assert_eq!(
            alarm.apply(&Command::new("RESET", None)).unwrap().state,
            ActuatorState::Off
        );
    }

    #[test]
    fn should_default_trigger_message() {
        let mut alarm = Alarm::default();
        let t = alarm.apply(&Command::new("TRIGGER", None)).unwrap();
        assert_eq!(t.message, Some(Value::from("Emergency!")));
    }

    #[test]
    fn should_echo_trigger_message_verbatim() {
        let mut alarm = Alarm::default();
        let t = alarm.apply(&Command::new("TRIGGER", Some("fire"))).unwrap();
        assert_eq!(t.message, Some(Value::from("fire")));
    }

    #[test]
    fn should_echo_structured_alarm_message() {
        let mut alarm = Alarm::default();
        let command = Command::decode(br#"{"command":"TRIGGER","message":{"zone":3}}"#).unwrap();
        let t = alarm.apply(&command).unwrap();
        assert_eq!(t.state, ActuatorState::On);
        assert_eq!(t.message, Some(serde_json::json!({ "zone": 3 })));
    }

    #[test]
    fn should_leave_alarm_unchanged_on_empty_verb() {
        let mut alarm = Alarm::default();
        alarm.apply(&Command::new("TRIGGER", None)).unwrap();
        assert!(alarm.apply(&Command::default()).is_err());
        assert_eq!(alarm.state(), ActuatorState::On);
    }

    #[test]
    fn should_serialize_state_uppercase() {
        assert_eq!(
            serde_json::to_string(&ActuatorState::Silenced).unwrap(),
            "\"SILENCED\""
        );
        assert_eq!(ActuatorState::Off.to_string(), "OFF");
    }
}
