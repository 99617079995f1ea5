//! Session configuration
//!
//! Replaces the fixed sampling frequency, tolerance and strike constants with
//! a structure passed into every recording and matching session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters shared by recording and matching sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Length of one sampling slice in milliseconds (default: 100, i.e. 10 Hz)
    #[serde(default = "default_sampling_period_ms")]
    pub sampling_period_ms: u64,

    /// Per-axis bin difference still counted as a match (default: 2)
    #[serde(default = "default_tolerance_bins")]
    pub tolerance_bins: u8,

    /// Consecutive mismatches tolerated before a match attempt restarts (default: 2)
    #[serde(default = "default_max_strikes")]
    pub max_strikes: u32,

    /// Number of quantization bins per axis (default: 18)
    #[serde(default = "default_resolution")]
    pub resolution: u8,
}

fn default_sampling_period_ms() -> u64 {
    100
}
fn default_tolerance_bins() -> u8 {
    2
}
fn default_max_strikes() -> u32 {
    2
}
fn default_resolution() -> u8 {
    18
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sampling_period_ms: default_sampling_period_ms(),
            tolerance_bins: default_tolerance_bins(),
            max_strikes: default_max_strikes(),
            resolution: default_resolution(),
        }
    }
}

impl SessionConfig {
    /// Sampling slice as a [`Duration`].
    pub fn sampling_period(&self) -> Duration {
        Duration::from_millis(self.sampling_period_ms)
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate_hz(&self) -> f32 {
        if self.sampling_period_ms == 0 {
            0.0
        } else {
            1000.0 / self.sampling_period_ms as f32
        }
    }
}
