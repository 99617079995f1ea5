//! Gesture waypoint sequence.
//!
//! A [`Gesture`] is the ordered motion path recorded by a therapist. It is
//! built only through a [`GestureRecorder`], which is consumed when the
//! recording ends, so a finished gesture can no longer grow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::core::Waypoint;
use crate::error::Result;

/// Ordered, immutable reference sequence of waypoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    #[serde(rename = "gesture")]
    waypoints: Vec<Waypoint>,
}

impl Gesture {
    /// Number of waypoints (steps) in the gesture.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint at step `n`, if any.
    pub fn get(&self, n: usize) -> Option<&Waypoint> {
        self.waypoints.get(n)
    }

    /// All waypoints in motion order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Iterate over the waypoints in motion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    /// True when step `n` exists and is tolerance-equal to `w`.
    pub fn step_matches(&self, n: usize, w: &Waypoint, tolerance: u8) -> bool {
        self.waypoints
            .get(n)
            .is_some_and(|target| target.within_tolerance(w, tolerance))
    }

    /// Pretty-printed JSON export:
    /// `{"gesture": [{"roll": r, "pitch": p, "yaw": y}, ...]}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a gesture from its JSON export.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Index<usize> for Gesture {
    type Output = Waypoint;

    fn index(&self, n: usize) -> &Waypoint {
        &self.waypoints[n]
    }
}

impl<'a> IntoIterator for &'a Gesture {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

impl FromIterator<Waypoint> for Gesture {
    fn from_iter<T: IntoIterator<Item = Waypoint>>(iter: T) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Waypoint>> for Gesture {
    fn from(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }
}

/// One waypoint per line, as printed after a recording.
impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.waypoints.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "R: {} P: {} Y: {}", w.roll, w.pitch, w.yaw)?;
        }
        Ok(())
    }
}

/// Append-only builder used while a recording session is active.
#[derive(Debug, Default)]
pub struct GestureRecorder {
    waypoints: Vec<Waypoint>,
}

impl GestureRecorder {
    /// Start an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a significant waypoint.
    pub fn push(&mut self, w: Waypoint) {
        self.waypoints.push(w);
    }

    /// Number of waypoints recorded so far.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Most recently appended waypoint.
    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// End the recording and hand over the finished gesture.
    pub fn finish(self) -> Gesture {
        Gesture {
            waypoints: self.waypoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_appends_in_order() {
        let mut rec = GestureRecorder::new();
        assert!(rec.is_empty());
        rec.push(Waypoint::new(5, 5, 5));
        rec.push(Waypoint::new(10, 5, 5));
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.last(), Some(&Waypoint::new(10, 5, 5)));

        let gesture = rec.finish();
        assert_eq!(
            gesture.waypoints(),
            &[Waypoint::new(5, 5, 5), Waypoint::new(10, 5, 5)]
        );
        assert_eq!(gesture[1], Waypoint::new(10, 5, 5));
    }

    #[test]
    fn test_step_matches() {
        let gesture: Gesture = vec![Waypoint::new(5, 5, 5)].into();
        assert!(gesture.step_matches(0, &Waypoint::new(7, 4, 6), 2));
        assert!(!gesture.step_matches(0, &Waypoint::new(8, 5, 5), 2));
        assert!(!gesture.step_matches(1, &Waypoint::new(5, 5, 5), 2));
    }

    #[test]
    fn test_json_export_shape() {
        let gesture: Gesture = vec![Waypoint::new(1, 2, 3)].into();
        let value: serde_json::Value = serde_json::from_str(&gesture.to_json().unwrap()).unwrap();
        assert_eq!(value["gesture"][0]["roll"], 1);
        assert_eq!(value["gesture"][0]["pitch"], 2);
        assert_eq!(value["gesture"][0]["yaw"], 3);

        let back = Gesture::from_json(&gesture.to_json().unwrap()).unwrap();
        assert_eq!(back, gesture);
    }

    #[test]
    fn test_display_lists_steps() {
        let gesture: Gesture = vec![Waypoint::new(1, 2, 3), Waypoint::new(4, 5, 6)].into();
        assert_eq!(gesture.to_string(), "R: 1 P: 2 Y: 3\nR: 4 P: 5 Y: 6");
        assert_eq!(Gesture::default().to_string(), "");
    }
}
