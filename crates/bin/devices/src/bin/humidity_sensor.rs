//! Humidity sensor — publishes a reading every 7 s.

use homesim_domain::device::DeviceKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    homesim_devices::run(DeviceKind::HumiditySensor).await?;
    Ok(())
}
