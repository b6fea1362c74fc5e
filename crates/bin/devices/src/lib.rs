//! # homesim-devices
//!
//! Composition root for the simulated fleet. Each binary under `src/bin`
//! runs exactly one device:
//!
//! | Binary | Device | Topics (defaults) |
//! |--------|--------|-------------------|
//! | `temperature-sensor` | uniform 20–30 °C every 5 s | → `home/sensor/temperature` |
//! | `humidity-sensor` | uniform 30–70 % every 7 s | → `home/sensor/humidity` |
//! | `motion-sensor` | coin flip every 4 s | → `home/sensor/motion` |
//! | `lamp-actuator` | `ON` / `OFF` | `home/lamp/command` → `home/lamp/state` |
//! | `alarm-actuator` | `TRIGGER` / `RESET` / `SILENCE` | `home/alarm/command` → `home/alarm/state` |
//!
//! ## Responsibilities
//! - Load `.env`, configuration file and environment overrides
//! - Initialise tracing (console, plus a log file for sensors)
//! - Connect to the broker once; exit with the error if that fails
//! - Run the device loop until Ctrl-C / SIGTERM, then unsubscribe and disconnect
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod logging;
mod runner;

pub use runner::{RunError, run};
