//! Scripted sensor source for tests and synthetic runs.
//!
//! Each scripted slice is returned by exactly one [`poll`](SensorSource::poll)
//! call, without sleeping. The source disconnects once the script is used up.

use std::collections::VecDeque;
use std::time::Duration;

use crate::core::{Event, Input, Waypoint};
use crate::io::source::SensorSource;
use crate::preprocessing::Quantizer;

/// Replays a fixed list of slices.
///
/// # Example
///
/// ```
/// use mudra_core::{Event, ScriptedSource, SensorSource};
/// use std::time::Duration;
///
/// let mut source = ScriptedSource::new()
///     .waypoints([(5, 5, 5), (10, 5, 5)])
///     .event(Event::StopRecording);
///
/// assert_eq!(source.remaining(), 3);
/// assert_eq!(source.poll(Duration::from_millis(100)).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    slices: VecDeque<Vec<Input>>,
    quantizer: Quantizer,
    clock_us: u64,
    period_us: u64,
    begun_sessions: u32,
    in_session: bool,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSource {
    /// Empty script at 18 bins per axis and a 100 ms slice clock.
    pub fn new() -> Self {
        Self::with_resolution(18)
    }

    /// Empty script whose waypoints are expressed at `resolution` bins per axis.
    pub fn with_resolution(resolution: u8) -> Self {
        Self {
            slices: VecDeque::new(),
            quantizer: Quantizer::new(resolution),
            clock_us: 0,
            period_us: 100_000,
            begun_sessions: 0,
            in_session: false,
        }
    }

    /// Append a raw slice.
    pub fn slice(mut self, inputs: Vec<Input>) -> Self {
        self.clock_us += self.period_us;
        self.slices.push_back(inputs);
        self
    }

    /// Append a slice holding one sample at the center of `w`'s bins.
    pub fn waypoint(self, w: impl Into<Waypoint>) -> Self {
        let orientation = self.quantizer.center(&w.into()).to_quaternion();
        let ts = self.clock_us + self.period_us;
        self.slice(vec![Input::sample(orientation, ts)])
    }

    /// Append one sample slice per waypoint.
    pub fn waypoints<W: Into<Waypoint>>(self, ws: impl IntoIterator<Item = W>) -> Self {
        ws.into_iter().fold(self, |s, w| s.waypoint(w))
    }

    /// Append a slice holding only `event`.
    pub fn event(self, event: Event) -> Self {
        let ts = self.clock_us + self.period_us;
        self.slice(vec![Input::event(event, ts)])
    }

    /// Append a slice holding `event` followed by a sample of `w`.
    pub fn event_with(self, event: Event, w: impl Into<Waypoint>) -> Self {
        let ts = self.clock_us + self.period_us;
        let orientation = self.quantizer.center(&w.into()).to_quaternion();
        self.slice(vec![
            Input::event(event, ts),
            Input::sample(orientation, ts),
        ])
    }

    /// Append `n` empty slices.
    pub fn idle(self, n: usize) -> Self {
        (0..n).fold(self, |s, _| s.slice(Vec::new()))
    }

    /// Slices not yet polled.
    pub fn remaining(&self) -> usize {
        self.slices.len()
    }

    /// Number of sessions started against this source.
    pub fn sessions_begun(&self) -> u32 {
        self.begun_sessions
    }

    /// True between `begin_session` and `end_session`.
    pub fn in_session(&self) -> bool {
        self.in_session
    }
}

impl SensorSource for ScriptedSource {
    fn poll(&mut self, _timeout: Duration) -> Vec<Input> {
        self.slices.pop_front().unwrap_or_default()
    }

    fn is_connected(&self) -> bool {
        !self.slices.is_empty()
    }

    fn begin_session(&mut self) {
        self.begun_sessions += 1;
        self.in_session = true;
    }

    fn end_session(&mut self) {
        self.in_session = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_quantize_to_script() {
        let quantizer = Quantizer::default();
        let mut source = ScriptedSource::new().waypoints([(3, 9, 14), (12, 4, 0)]);

        let first = source.poll(Duration::ZERO);
        let sample = first[0].as_sample().unwrap();
        assert_eq!(quantizer.quantize(&sample.data), Waypoint::new(3, 9, 14));

        let second = source.poll(Duration::ZERO);
        let sample = second[0].as_sample().unwrap();
        assert_eq!(quantizer.quantize(&sample.data), Waypoint::new(12, 4, 0));
        assert!(sample.timestamp_us > first[0].timestamp_us());
    }

    #[test]
    fn test_disconnects_when_exhausted() {
        let mut source = ScriptedSource::new().idle(2);
        assert!(source.is_connected());
        assert!(source.poll(Duration::ZERO).is_empty());
        assert!(source.is_connected());
        source.poll(Duration::ZERO);
        assert!(!source.is_connected());
        assert!(source.poll(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_event_with_orders_event_first() {
        let mut source = ScriptedSource::new().event_with(Event::AbortMatching, (5, 5, 5));
        let slice = source.poll(Duration::ZERO);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].as_event(), Some(Event::AbortMatching));
        assert!(slice[1].as_sample().is_some());
    }
}
