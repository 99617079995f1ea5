//! Sample-and-hold slice pump shared by both sessions.

use crate::config::SessionConfig;
use crate::core::{Event, Input, Waypoint};
use crate::io::SensorSource;
use crate::preprocessing::Quantizer;
use std::time::Duration;

/// What one sampling period delivered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    /// Events in arrival order
    pub events: Vec<Event>,
    /// Quantized orientation held at the end of the slice
    pub waypoint: Waypoint,
}

impl Slice {
    pub fn has(&self, event: Event) -> bool {
        self.events.contains(&event)
    }
}

/// Polls a source once per period and holds the latest quantized sample.
///
/// The source is told the session ended when the pump is dropped.
pub(crate) struct Pump<S: SensorSource> {
    source: S,
    quantizer: Quantizer,
    period: Duration,
    held: Waypoint,
    slices: u64,
}

impl<S: SensorSource> Pump<S> {
    /// Wrap `source` and notify it that a session is beginning.
    pub fn new(mut source: S, config: &SessionConfig) -> Self {
        source.begin_session();
        Self {
            source,
            quantizer: Quantizer::new(config.resolution),
            period: config.sampling_period(),
            held: Waypoint::default(),
            slices: 0,
        }
    }

    /// Poll one slice; `None` once the source has disconnected.
    pub fn next_slice(&mut self) -> Option<Slice> {
        if !self.source.is_connected() {
            return None;
        }

        let mut events = Vec::new();
        let mut latest = None;
        for input in self.source.poll(self.period) {
            match input {
                Input::Sample(sample) => latest = Some(sample),
                Input::Event(event) => {
                    log::debug!("Event '{}' at {} us", event.data, event.timestamp_us);
                    events.push(event.data);
                }
            }
        }
        if let Some(sample) = latest {
            self.held = self.quantizer.quantize(&sample.data);
        }

        self.slices += 1;
        Some(Slice {
            events,
            waypoint: self.held,
        })
    }

    /// Slices polled so far.
    pub fn slices(&self) -> u64 {
        self.slices
    }
}

impl<S: SensorSource> Drop for Pump<S> {
    fn drop(&mut self) {
        self.source.end_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedSource;

    #[test]
    fn test_holds_last_sample_across_empty_slices() {
        let source = ScriptedSource::new().waypoint((4, 12, 7)).idle(1);
        let mut pump = Pump::new(source, &SessionConfig::default());

        assert_eq!(pump.next_slice().unwrap().waypoint, Waypoint::new(4, 12, 7));
        assert_eq!(pump.next_slice().unwrap().waypoint, Waypoint::new(4, 12, 7));
        assert!(pump.next_slice().is_none());
        assert_eq!(pump.slices(), 2);
    }

    #[test]
    fn test_default_waypoint_before_first_sample() {
        let source = ScriptedSource::new().event(Event::Begin);
        let mut pump = Pump::new(source, &SessionConfig::default());

        let slice = pump.next_slice().unwrap();
        assert!(slice.has(Event::Begin));
        assert_eq!(slice.waypoint, Waypoint::default());
    }

    #[test]
    fn test_latest_sample_in_slice_wins() {
        let q = Quantizer::default();
        let sample = |w: (u8, u8, u8), ts| Input::sample(q.center(&w.into()).to_quaternion(), ts);
        let source = ScriptedSource::new().slice(vec![sample((1, 1, 1), 10), sample((9, 3, 5), 20)]);
        let mut pump = Pump::new(source, &SessionConfig::default());

        assert_eq!(pump.next_slice().unwrap().waypoint, Waypoint::new(9, 3, 5));
    }

    #[test]
    fn test_notifies_session_bounds() {
        let mut source = ScriptedSource::new().idle(3);
        {
            let mut pump = Pump::new(&mut source, &SessionConfig::default());
            pump.next_slice();
        }
        assert_eq!(source.sessions_begun(), 1);
        assert!(!source.in_session());
        assert_eq!(source.remaining(), 2);
    }
}
