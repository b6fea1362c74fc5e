//! # homesim-domain
//!
//! Pure domain model for the simulated home-automation fleet.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **device kinds** and their fixed broker identities
//! - Define **sensors** (temperature, humidity, motion) and how they sample values
//! - Define **actuators** (lamp, alarm), their commands and state transitions
//! - Define the **envelope** — the flat JSON bodies exchanged over topics
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! The message bus is expressed as a port in the `app` crate.

pub mod error;
pub mod time;

pub mod actuator;
pub mod device;
pub mod envelope;
pub mod sensor;
