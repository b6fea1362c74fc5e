//! MQTT adapter error types.

use homesim_domain::error::HomeSimError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The broker could not be reached or refused the session.
    #[error("failed to connect to MQTT broker")]
    Connection(#[source] rumqttc::ConnectionError),

    /// The rumqttc client returned an error (request queue closed).
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`HomeSimError::Bus`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> HomeSimError {
        HomeSimError::Bus(Box::new(self))
    }
}

impl From<MqttError> for HomeSimError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
