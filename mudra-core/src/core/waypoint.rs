//! Discretized orientation waypoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dominant orientation bucket at one sample instant.
///
/// Each axis holds a bin index in `[0, resolution - 1]`. No wraparound is
/// applied: bins at opposite ends of the roll or yaw range are far apart even
/// though the angles they cover are adjacent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    pub roll: u8,
    pub pitch: u8,
    pub yaw: u8,
}

impl Waypoint {
    /// Create a waypoint from bin indices.
    pub const fn new(roll: u8, pitch: u8, yaw: u8) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Largest per-axis bin difference to `other`.
    #[inline]
    pub fn max_axis_diff(&self, other: &Waypoint) -> u8 {
        self.roll
            .abs_diff(other.roll)
            .max(self.pitch.abs_diff(other.pitch))
            .max(self.yaw.abs_diff(other.yaw))
    }

    /// True when every axis differs from `other` by at most `tolerance` bins.
    #[inline]
    pub fn within_tolerance(&self, other: &Waypoint, tolerance: u8) -> bool {
        self.max_axis_diff(other) <= tolerance
    }

    /// True when every axis differs from `other` by at most one bin.
    ///
    /// Includes exact equality.
    #[inline]
    pub fn is_adjacent(&self, other: &Waypoint) -> bool {
        self.within_tolerance(other, 1)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[R: {}][P: {}][Y: {}]", self.roll, self.pitch, self.yaw)
    }
}

impl From<(u8, u8, u8)> for Waypoint {
    fn from((roll, pitch, yaw): (u8, u8, u8)) -> Self {
        Self::new(roll, pitch, yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance() {
        let a = Waypoint::new(5, 5, 5);
        assert!(a.within_tolerance(&Waypoint::new(7, 3, 5), 2));
        assert!(!a.within_tolerance(&Waypoint::new(8, 5, 5), 2));
        // Every axis must agree at once
        assert!(!a.within_tolerance(&Waypoint::new(5, 5, 2), 2));
    }

    #[test]
    fn test_tolerance_symmetric() {
        for r in 0..18u8 {
            for p in [0u8, 3, 9, 17] {
                let a = Waypoint::new(r, p, 9);
                let b = Waypoint::new(9, 8, r);
                for tol in 0..4 {
                    assert_eq!(a.within_tolerance(&b, tol), b.within_tolerance(&a, tol));
                }
            }
        }
    }

    #[test]
    fn test_adjacent() {
        let a = Waypoint::new(5, 5, 5);
        assert!(a.is_adjacent(&a));
        assert!(a.is_adjacent(&Waypoint::new(6, 4, 5)));
        assert!(!a.is_adjacent(&Waypoint::new(7, 5, 5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Waypoint::new(3, 9, 17).to_string(), "[R: 3][P: 9][Y: 17]");
    }
}
