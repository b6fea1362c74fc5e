//! Device lifecycle: configure, connect, loop, clean up.

use homesim_adapter_mqtt::{MqttBus, MqttConfig, MqttError, Subscription};
use homesim_app::actuator_loop::ActuatorLoop;
use homesim_app::ports::inbox;
use homesim_app::sensor_loop::SensorLoop;
use homesim_domain::actuator::{Actuator, Alarm, Lamp};
use homesim_domain::device::DeviceKind;
use homesim_domain::sensor::{HumiditySensor, MotionSensor, Sensor, TemperatureSensor};

use crate::config::{Config, ConfigError};
use crate::logging::{self, LoggingError};

/// Errors that end a device process.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error")]
    Config(#[from] ConfigError),
    #[error("logging setup failed")]
    Logging(#[from] LoggingError),
    #[error("broker connection failed")]
    Broker(#[from] MqttError),
}

/// Run the device `kind` until the process is asked to stop.
///
/// # Errors
///
/// Returns an error if configuration or logging cannot be set up, or if the
/// single connection attempt to the broker fails.
pub async fn run(kind: DeviceKind) -> Result<(), RunError> {
    let dotenv = dotenvy::dotenv().ok();
    let config = Config::load()?;
    logging::init(&config.logging.filter, config.log_file(kind))?;

    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let role = if kind.is_sensor() { "sensor" } else { "actuator" };
    tracing::info!(device = %kind, role, client_id = kind.client_id(), "starting");

    let mqtt = config.mqtt(kind);
    let topics = &config.topics;
    match kind {
        DeviceKind::TemperatureSensor => {
            run_sensor(&mqtt, TemperatureSensor, &topics.temperature).await?;
        }
        DeviceKind::HumiditySensor => run_sensor(&mqtt, HumiditySensor, &topics.humidity).await?,
        DeviceKind::MotionSensor => run_sensor(&mqtt, MotionSensor, &topics.motion).await?,
        DeviceKind::Lamp => {
            run_actuator(&mqtt, Lamp::default(), &topics.lamp_command, &topics.lamp_state).await?;
        }
        DeviceKind::Alarm => {
            run_actuator(&mqtt, Alarm::default(), &topics.alarm_command, &topics.alarm_state)
                .await?;
        }
    }

    tracing::info!(device = %kind, "stopped");
    Ok(())
}

async fn run_sensor<S>(mqtt: &MqttConfig, sensor: S, topic: &str) -> Result<(), MqttError>
where
    S: Sensor + Send,
{
    let bus = MqttBus::connect(mqtt, None)
        .await
        .inspect_err(|err| tracing::error!(%err, "could not reach broker"))?;

    let device = SensorLoop::new(sensor, bus.publisher(), topic);
    tokio::select! {
        () = device.run() => {}
        () = shutdown_signal() => tracing::info!("shutdown requested"),
    }

    bus.disconnect().await;
    Ok(())
}

async fn run_actuator<A>(
    mqtt: &MqttConfig,
    actuator: A,
    command_topic: &str,
    state_topic: &str,
) -> Result<(), MqttError>
where
    A: Actuator + Send,
{
    let (tx, rx) = inbox();
    let bus = MqttBus::connect(mqtt, Some(Subscription::new(command_topic, tx)))
        .await
        .inspect_err(|err| tracing::error!(%err, "could not reach broker"))?;

    let device = ActuatorLoop::new(actuator, bus.publisher(), state_topic, rx);
    tokio::select! {
        _ = device.run() => tracing::warn!("command queue closed"),
        () = shutdown_signal() => tracing::info!("shutdown requested"),
    }

    bus.disconnect().await;
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
