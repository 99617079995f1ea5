//! Recording session: capture a new gesture from a live source.

use std::ops::ControlFlow;

use super::pump::Pump;
use crate::config::SessionConfig;
use crate::core::{Event, Waypoint};
use crate::gesture::{Gesture, GestureRecorder};
use crate::io::SensorSource;
use crate::preprocessing::Debouncer;

/// One recording run.
///
/// Every debounced waypoint is appended verbatim. The run ends at the first
/// slice carrying [`Event::StopRecording`], before that slice's sample is
/// consumed, or when the source disconnects.
pub struct RecordSession<S: SensorSource> {
    pump: Pump<S>,
    debouncer: Debouncer,
    gesture: GestureRecorder,
    stopped: bool,
}

impl<S: SensorSource> RecordSession<S> {
    /// Start recording from `source`.
    pub fn new(source: S, config: &SessionConfig) -> Self {
        log::info!(
            "Recording started ({} ms sampling, {} bins)",
            config.sampling_period_ms,
            config.resolution
        );
        Self {
            pump: Pump::new(source, config),
            debouncer: Debouncer::new(),
            gesture: GestureRecorder::new(),
            stopped: false,
        }
    }

    /// Process one slice.
    ///
    /// Continues with the waypoint appended during the slice, if any, and
    /// breaks once recording has ended.
    pub fn step(&mut self) -> ControlFlow<(), Option<Waypoint>> {
        if self.stopped {
            return ControlFlow::Break(());
        }

        let Some(slice) = self.pump.next_slice() else {
            log::info!("Source closed, recording ended");
            self.stopped = true;
            return ControlFlow::Break(());
        };
        if slice.has(Event::StopRecording) {
            log::info!("Stop requested, recording ended");
            self.stopped = true;
            return ControlFlow::Break(());
        }

        let appended = self.debouncer.filter(slice.waypoint);
        if let Some(w) = appended {
            log::debug!("Step {}: {}", self.gesture.len(), w);
            self.gesture.push(w);
        }
        ControlFlow::Continue(appended)
    }

    /// Waypoints recorded so far.
    pub fn len(&self) -> usize {
        self.gesture.len()
    }

    /// True before the first waypoint is appended.
    pub fn is_empty(&self) -> bool {
        self.gesture.is_empty()
    }

    /// Record until stopped and return the gesture.
    pub fn run(mut self) -> Gesture {
        while self.step().is_continue() {}
        self.finish()
    }

    /// End the session and return what was recorded.
    pub fn finish(self) -> Gesture {
        log::info!(
            "Recorded {} waypoints over {} slices ({} suppressed)",
            self.gesture.len(),
            self.pump.slices(),
            self.debouncer.dropped()
        );
        self.gesture.finish()
    }
}

/// Record a gesture from `source` until stopped.
pub fn record<S: SensorSource>(source: S, config: &SessionConfig) -> Gesture {
    RecordSession::new(source, config).run()
}
