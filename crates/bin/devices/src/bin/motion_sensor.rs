//! Motion sensor — publishes a presence flag every 4 s.

use homesim_domain::device::DeviceKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    homesim_devices::run(DeviceKind::MotionSensor).await?;
    Ok(())
}
