//! Quantizer: continuous orientation to discrete waypoint.
//!
//! Roll and yaw cover `[-π, π]`, pitch covers `[-π/2, π/2]`. Each is rescaled
//! linearly onto `[0, resolution)` and truncated toward zero.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{EulerAngles, Quaternion, Waypoint};

/// Maps orientations onto `resolution` bins per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    resolution: u8,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(18)
    }
}

impl Quantizer {
    /// Create a quantizer with the given number of bins per axis.
    ///
    /// A resolution of zero is treated as one bin.
    pub fn new(resolution: u8) -> Self {
        Self {
            resolution: resolution.max(1),
        }
    }

    /// Number of bins per axis.
    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    /// Quantize a quaternion orientation.
    pub fn quantize(&self, orientation: &Quaternion) -> Waypoint {
        self.quantize_euler(&orientation.to_euler())
    }

    /// Quantize Euler angles in radians.
    pub fn quantize_euler(&self, angles: &EulerAngles) -> Waypoint {
        Waypoint {
            roll: self.bin((angles.roll + PI) / TAU),
            pitch: self.bin((angles.pitch + FRAC_PI_2) / PI),
            yaw: self.bin((angles.yaw + PI) / TAU),
        }
    }

    /// Orientation at the center of the bins of `w`.
    ///
    /// Quantizing the result yields `w` again; synthetic sources use it to
    /// turn scripted waypoints into samples.
    pub fn center(&self, w: &Waypoint) -> EulerAngles {
        let fraction = |bin: u8| {
            (bin.min(self.resolution - 1) as f32 + 0.5) / self.resolution as f32
        };
        EulerAngles {
            roll: fraction(w.roll) * TAU - PI,
            pitch: fraction(w.pitch) * PI - FRAC_PI_2,
            yaw: fraction(w.yaw) * TAU - PI,
        }
    }

    /// Bin index for a fraction of the axis range.
    ///
    /// The closed upper endpoint truncates to `resolution`; it belongs to the
    /// last bin.
    #[inline]
    fn bin(&self, fraction: f32) -> u8 {
        let scaled = (fraction * self.resolution as f32) as u32;
        scaled.min(self.resolution as u32 - 1) as u8
    }
}
