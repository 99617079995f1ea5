//! Device implementations

pub mod sim;

use crate::config::DeviceConfig;
use mudra_core::{Error, Result, SensorSource, TracePlayer};
use sim::SimulatedArmband;
use std::time::{Duration, Instant};

/// Interval between connection checks during discovery
const DISCOVERY_POLL: Duration = Duration::from_millis(50);

/// Create a sensor source based on configuration
pub fn create_device(config: &DeviceConfig) -> Result<Box<dyn SensorSource>> {
    match config.device_type.as_str() {
        "sim" => Ok(Box::new(SimulatedArmband::new(&config.simulation))),
        "trace" => {
            let path = config.trace_path.as_deref().ok_or_else(|| {
                Error::Config("device type \"trace\" needs trace_path".to_string())
            })?;
            let mut player = TracePlayer::open(path)?;
            player.set_speed(config.trace_speed);
            Ok(Box::new(player))
        }
        other => Err(Error::Config(format!("Unknown device type: {}", other))),
    }
}

/// Block until `device` reports connected, or fail after `timeout`.
pub fn wait_for_connection(device: &dyn SensorSource, timeout: Duration) -> Result<()> {
    let start = Instant::now();
    while !device.is_connected() {
        if start.elapsed() >= timeout {
            return Err(Error::DeviceUnavailable(format!(
                "no armband connected after {} ms",
                timeout.as_millis()
            )));
        }
        std::thread::sleep(DISCOVERY_POLL);
    }
    log::info!("Device connected after {:?}", start.elapsed());
    Ok(())
}
