//! Alarm actuator — TRIGGER, RESET, SILENCE.

use homesim_domain::device::DeviceKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    homesim_devices::run(DeviceKind::Alarm).await?;
    Ok(())
}
