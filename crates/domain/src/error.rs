//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeSimError`] at port boundaries.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HomeSimError {
    /// An envelope could not be encoded or decoded.
    #[error("envelope error")]
    Envelope(#[from] EnvelopeError),

    /// The message bus rejected an operation.
    #[error("message bus error")]
    Bus(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures of the JSON envelope codec.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The inbound body is not JSON, or not the expected shape.
    #[error("malformed payload")]
    Malformed(#[source] serde_json::Error),

    /// An outbound value could not be serialized.
    #[error("failed to encode payload")]
    Encode(#[source] serde_json::Error),
}

/// A command verb that the receiving actuator does not understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {verb:?}")]
pub struct UnknownCommand {
    /// The (uppercased) verb that was received.
    pub verb: String,
}
