//! # homesim-app
//!
//! Application layer — device loops and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **message bus port** that the broker adapter implements:
//!   - `MessagePublisher` — publish an encoded envelope on a topic
//!   - `InboundMessage` + the handoff queue that carries deliveries from the
//!     bus client's own task into the device loop
//! - Provide the two device loops:
//!   - `SensorLoop` — timer-driven sample → stamp → publish
//!   - `ActuatorLoop` — drain the handoff queue, apply commands, publish state
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod actuator_loop;
pub mod ports;
pub mod sensor_loop;

#[cfg(test)]
pub(crate) mod testing;
