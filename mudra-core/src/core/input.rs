//! Inputs delivered by a sensor source: orientation samples and named events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::orientation::Quaternion;
use super::timestamped::Timestamped;
use crate::error::Error;

/// One orientation reading with its timestamp.
pub type Sample = Timestamped<Quaternion>;

/// Discrete named signal from the device's pose classifier or the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Event {
    /// The performer started a motion
    Begin,
    /// End the current recording session
    StopRecording,
    /// Abandon the current matching session
    AbortMatching,
}

impl Event {
    /// Kebab-case name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Begin => "begin",
            Event::StopRecording => "stop-recording",
            Event::AbortMatching => "abort-matching",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Event {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "begin" => Ok(Event::Begin),
            "stop-recording" => Ok(Event::StopRecording),
            "abort-matching" => Ok(Event::AbortMatching),
            other => Err(Error::InvalidInput(format!("unknown event '{}'", other))),
        }
    }
}

/// A single notification from a sensor source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Orientation update
    Sample(Sample),
    /// Discrete event
    Event(Timestamped<Event>),
}

impl Input {
    /// Shorthand for an orientation input.
    pub fn sample(orientation: Quaternion, timestamp_us: u64) -> Self {
        Input::Sample(Timestamped::new(orientation, timestamp_us))
    }

    /// Shorthand for an event input.
    pub fn event(event: Event, timestamp_us: u64) -> Self {
        Input::Event(Timestamped::new(event, timestamp_us))
    }

    /// Timestamp of this input in microseconds.
    pub fn timestamp_us(&self) -> u64 {
        match self {
            Input::Sample(s) => s.timestamp_us,
            Input::Event(e) => e.timestamp_us,
        }
    }

    /// Get as sample if this is one.
    pub fn as_sample(&self) -> Option<&Sample> {
        match self {
            Input::Sample(s) => Some(s),
            _ => None,
        }
    }

    /// Get as event if this is one.
    pub fn as_event(&self) -> Option<Event> {
        match self {
            Input::Event(e) => Some(e.data),
            _ => None,
        }
    }
}
