//! Temperature sensor — publishes a reading every 5 s.

use homesim_domain::device::DeviceKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    homesim_devices::run(DeviceKind::TemperatureSensor).await?;
    Ok(())
}
