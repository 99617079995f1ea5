//! Configuration for the Mudra application
//!
//! Loads the device, session and logging settings from a TOML file. Every
//! field has a default, so an empty file (or no file) is a valid setup.
//!
//! ```toml
//! [device]
//! type = "sim"                 # "sim" or "trace"
//! discovery_timeout_ms = 10000
//!
//! [device.simulation]
//! noise_stddev_deg = 1.5
//! seed = 0                     # 0 = random
//!
//! [[device.simulation.keyframes]]
//! roll = 0.0
//! pitch = 0.0
//! yaw = 60.0
//! duration_ms = 800
//!
//! [session]
//! sampling_period_ms = 100
//! tolerance_bins = 2
//!
//! [logging]
//! level = "info"
//! ```

use mudra_core::{Result, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sensor device selection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device type: "sim" (simulated armband) or "trace" (replay a capture)
    #[serde(rename = "type", default = "default_device_type")]
    pub device_type: String,

    /// How long to wait for the device to connect (default: 10000)
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,

    /// Trace file replayed when `type = "trace"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_path: Option<String>,

    /// Trace playback speed, 0 = as fast as possible (default: 1.0)
    #[serde(default = "default_trace_speed")]
    pub trace_speed: f32,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// One pose of the simulated motion, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Keyframe {
    #[serde(default)]
    pub roll: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
    /// Time to move here from the previous keyframe (default: 600)
    #[serde(default = "default_keyframe_duration_ms")]
    pub duration_ms: u64,
}

impl Keyframe {
    pub fn new(roll: f32, pitch: f32, yaw: f32, duration_ms: u64) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            duration_ms,
        }
    }
}

/// Simulated armband settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Pause after each pass while the arm returns to the first pose (default: 1500)
    #[serde(default = "default_rest_ms")]
    pub rest_ms: u64,

    /// Orientation samples per second (default: 50)
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: f32,

    /// Gaussian orientation noise per axis, degrees (default: 1.5)
    #[serde(default = "default_noise_stddev_deg")]
    pub noise_stddev_deg: f32,

    /// Probability that a sample is lost in transit (default: 0.02)
    #[serde(default = "default_drop_rate")]
    pub drop_rate: f32,

    /// Simulated pairing delay before the armband connects (default: 500)
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,

    /// Random seed, 0 = random entropy
    #[serde(default)]
    pub seed: u64,

    /// Time scale, 1.0 = real time, 0 = no sleeping (default: 1.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Poses of one pass of the motion
    #[serde(default = "default_keyframes")]
    pub keyframes: Vec<Keyframe>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            discovery_timeout_ms: default_discovery_timeout_ms(),
            trace_path: None,
            trace_speed: default_trace_speed(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rest_ms: default_rest_ms(),
            sample_rate_hz: default_sample_rate_hz(),
            noise_stddev_deg: default_noise_stddev_deg(),
            drop_rate: default_drop_rate(),
            connect_delay_ms: default_connect_delay_ms(),
            seed: 0,
            speed: default_speed(),
            keyframes: default_keyframes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_device_type() -> String {
    "sim".to_string()
}
fn default_discovery_timeout_ms() -> u64 {
    10_000
}
fn default_trace_speed() -> f32 {
    1.0
}
fn default_keyframe_duration_ms() -> u64 {
    600
}
// Raise the forearm, turn it outward, lower it again
fn default_keyframes() -> Vec<Keyframe> {
    vec![
        Keyframe::new(0.0, 0.0, 0.0, 400),
        Keyframe::new(0.0, 50.0, 0.0, 800),
        Keyframe::new(0.0, 50.0, 70.0, 800),
        Keyframe::new(60.0, 10.0, 70.0, 800),
    ]
}
fn default_rest_ms() -> u64 {
    1500
}
fn default_sample_rate_hz() -> f32 {
    50.0
}
fn default_noise_stddev_deg() -> f32 {
    1.5
}
fn default_drop_rate() -> f32 {
    0.02
}
fn default_connect_delay_ms() -> u64 {
    500
}
fn default_speed() -> f32 {
    1.0
}
fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
