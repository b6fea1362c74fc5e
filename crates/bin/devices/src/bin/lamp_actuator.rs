//! Lamp actuator — switches ON/OFF on command.

use homesim_domain::device::DeviceKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    homesim_devices::run(DeviceKind::Lamp).await?;
    Ok(())
}
