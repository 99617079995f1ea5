//! Orientation representations.
//!
//! The sensor reports orientation as a unit quaternion; the quantizer works
//! on roll/pitch/yaw Euler angles (ZYX convention) derived from it.

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Quaternion representation [w, x, y, z].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create a quaternion from its components.
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Create identity quaternion (no rotation).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Build a quaternion from Euler angles in radians (ZYX convention).
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Convert quaternion to Euler angles (ZYX convention).
    pub fn to_euler(&self) -> EulerAngles {
        // Roll (X axis rotation)
        let sinr_cosp = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr_cosp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        // Pitch (Y axis rotation), clamped against gimbal-lock rounding
        let sinp = (2.0 * (self.w * self.y - self.z * self.x)).clamp(-1.0, 1.0);
        let pitch = sinp.asin();

        // Yaw (Z axis rotation)
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        EulerAngles { roll, pitch, yaw }
    }
}

/// Euler angles in radians.
///
/// Roll and yaw lie in `[-π, π]`, pitch in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl EulerAngles {
    /// Create Euler angles in radians.
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Create Euler angles from degrees.
    pub fn from_degrees(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            roll: roll.to_radians(),
            pitch: pitch.to_radians().clamp(-FRAC_PI_2, FRAC_PI_2),
            yaw: yaw.to_radians(),
        }
    }

    /// Convert to a unit quaternion.
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(self.roll, self.pitch, self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_is_level() {
        let euler = Quaternion::identity().to_euler();
        assert_relative_eq!(euler.roll, 0.0);
        assert_relative_eq!(euler.pitch, 0.0);
        assert_relative_eq!(euler.yaw, 0.0);
    }

    #[test]
    fn test_euler_conversion_recovers_angles() {
        let angles = EulerAngles::from_degrees(30.0, -20.0, 120.0);
        let back = angles.to_quaternion().to_euler();

        assert_relative_eq!(back.roll, angles.roll, epsilon = 1e-5);
        assert_relative_eq!(back.pitch, angles.pitch, epsilon = 1e-5);
        assert_relative_eq!(back.yaw, angles.yaw, epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_clamped_when_slightly_denormalized() {
        // Straight up with a little scale error: sinp exceeds 1.0 before clamping
        let s = std::f32::consts::FRAC_1_SQRT_2 * 1.001;
        let q = Quaternion::new(s, 0.0, s, 0.0);
        let euler = q.to_euler();
        assert!(euler.pitch.is_finite());
        assert_relative_eq!(euler.pitch, FRAC_PI_2, epsilon = 1e-3);
    }
}
