//! Matching session: follow a reference gesture with strike tolerance.
//!
//! [`Matcher`] is the pure state machine over debounced waypoints;
//! [`MatchSession`] drives it from a live source.

use std::fmt;
use std::ops::ControlFlow;

use super::pump::Pump;
use crate::config::SessionConfig;
use crate::core::{Event, Waypoint};
use crate::gesture::Gesture;
use crate::io::SensorSource;
use crate::preprocessing::Debouncer;

/// Result of feeding one significant waypoint to a [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    /// Waypoint matched; `progress` steps are now complete
    Advanced { progress: usize },
    /// Waypoint matched the final step
    Completed,
    /// Mismatch tolerated; `strikes` used so far
    Strike { strikes: u32 },
    /// Mismatch with no strikes left; progress back to the first step
    Reset,
}

/// Why a matching session ended without completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// An abort-matching event arrived
    Event,
    /// The source disconnected
    SourceClosed,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Event => write!(f, "aborted"),
            AbortReason::SourceClosed => write!(f, "source closed"),
        }
    }
}

/// How a matching session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Completed,
    Aborted(AbortReason),
}

impl MatchOutcome {
    /// True only for a full performance of the gesture.
    pub fn is_completed(&self) -> bool {
        matches!(self, MatchOutcome::Completed)
    }
}

/// Progress/strike state machine for one performance of a gesture.
///
/// A mismatch costs a strike; a mismatch with `max_strikes` already used
/// sends progress back to zero and clears the strikes. Strikes are not
/// cleared by a successful step, so they count across the whole attempt.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    gesture: &'a Gesture,
    tolerance: u8,
    max_strikes: u32,
    progress: usize,
    strikes: u32,
}

impl<'a> Matcher<'a> {
    pub fn new(gesture: &'a Gesture, config: &SessionConfig) -> Self {
        Self {
            gesture,
            tolerance: config.tolerance_bins,
            max_strikes: config.max_strikes,
            progress: 0,
            strikes: 0,
        }
    }

    /// Compare a significant waypoint against the current target step.
    pub fn feed(&mut self, w: Waypoint) -> MatchStep {
        if self.is_complete() {
            return MatchStep::Completed;
        }

        if self.gesture.step_matches(self.progress, &w, self.tolerance) {
            self.progress += 1;
            if self.is_complete() {
                MatchStep::Completed
            } else {
                MatchStep::Advanced {
                    progress: self.progress,
                }
            }
        } else if self.strikes >= self.max_strikes {
            self.progress = 0;
            self.strikes = 0;
            MatchStep::Reset
        } else {
            self.strikes += 1;
            MatchStep::Strike {
                strikes: self.strikes,
            }
        }
    }

    /// Steps matched so far.
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Strikes used so far.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    /// Step the next waypoint must match, `None` once complete.
    pub fn target(&self) -> Option<&Waypoint> {
        self.gesture.get(self.progress)
    }

    /// True once every step has matched (immediately for an empty gesture).
    pub fn is_complete(&self) -> bool {
        self.progress >= self.gesture.len()
    }

    /// Start over from the first step.
    pub fn reset(&mut self) {
        self.progress = 0;
        self.strikes = 0;
    }
}

/// One attempt at performing a gesture from a live source.
///
/// There is no timeout: the attempt runs until the gesture completes, an
/// [`Event::AbortMatching`] arrives, or the source disconnects. The abort
/// check comes before the slice's sample.
pub struct MatchSession<'a, S: SensorSource> {
    pump: Pump<S>,
    debouncer: Debouncer,
    matcher: Matcher<'a>,
    outcome: Option<MatchOutcome>,
}

impl<'a, S: SensorSource> MatchSession<'a, S> {
    /// Start matching `gesture` against `source`.
    pub fn new(source: S, gesture: &'a Gesture, config: &SessionConfig) -> Self {
        log::info!(
            "Matching started ({} steps, tolerance {}, {} strikes)",
            gesture.len(),
            config.tolerance_bins,
            config.max_strikes
        );
        Self {
            pump: Pump::new(source, config),
            debouncer: Debouncer::new(),
            matcher: Matcher::new(gesture, config),
            outcome: None,
        }
    }

    /// Process one slice.
    ///
    /// Continues with the matcher's reaction to the slice's significant
    /// waypoint, if any, and breaks with the outcome once the attempt ends.
    pub fn step(&mut self) -> ControlFlow<MatchOutcome, Option<MatchStep>> {
        if let Some(outcome) = self.outcome {
            return ControlFlow::Break(outcome);
        }
        if self.matcher.is_complete() {
            return self.end(MatchOutcome::Completed);
        }

        let Some(slice) = self.pump.next_slice() else {
            return self.end(MatchOutcome::Aborted(AbortReason::SourceClosed));
        };
        if slice.has(Event::AbortMatching) {
            return self.end(MatchOutcome::Aborted(AbortReason::Event));
        }

        let Some(w) = self.debouncer.filter(slice.waypoint) else {
            return ControlFlow::Continue(None);
        };
        let step = self.matcher.feed(w);
        match step {
            MatchStep::Completed => return self.end(MatchOutcome::Completed),
            MatchStep::Advanced { progress } => {
                log::debug!("{} matched, {}/{}", w, progress, self.gesture_len())
            }
            MatchStep::Strike { strikes } => log::debug!("{} missed, strike {}", w, strikes),
            MatchStep::Reset => log::debug!("{} missed with no strikes left, reset", w),
        }
        ControlFlow::Continue(Some(step))
    }

    /// Matcher state.
    pub fn matcher(&self) -> &Matcher<'a> {
        &self.matcher
    }

    /// Run the attempt to its end.
    pub fn run(mut self) -> MatchOutcome {
        loop {
            if let ControlFlow::Break(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn gesture_len(&self) -> usize {
        self.matcher.gesture.len()
    }

    fn end(&mut self, outcome: MatchOutcome) -> ControlFlow<MatchOutcome, Option<MatchStep>> {
        match outcome {
            MatchOutcome::Completed => log::info!("Gesture completed"),
            MatchOutcome::Aborted(reason) => log::info!(
                "Matching ended at step {}: {}",
                self.matcher.progress(),
                reason
            ),
        }
        self.outcome = Some(outcome);
        ControlFlow::Break(outcome)
    }
}

/// Perform one attempt of `gesture` against `source`.
pub fn match_gesture<S: SensorSource>(
    source: S,
    gesture: &Gesture,
    config: &SessionConfig,
) -> MatchOutcome {
    MatchSession::new(source, gesture, config).run()
}
