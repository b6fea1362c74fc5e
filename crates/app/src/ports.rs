//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the device loops and the outside world.
//! They are defined here (in `app`) so that both the loops and the broker
//! adapter can depend on them without creating circular dependencies.

pub mod message_bus;

pub use message_bus::{Inbox, InboxSender, InboundMessage, MessagePublisher, inbox};
