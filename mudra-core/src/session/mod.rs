//! Recording and matching sessions.
//!
//! A session runs one bounded pass over a [`SensorSource`]: once per sampling
//! period it polls the source, checks the slice's events, then quantizes and
//! debounces the held orientation.
//!
//! ```text
//! poll(period) ──► events? ──► held sample ──► Quantizer ──► Debouncer
//!                    │                                          │
//!                 stop/abort                          Recorder / Matcher
//! ```
//!
//! Both sessions can be driven one slice at a time with `step()` (for live
//! feedback) or to the end with `run()`.
//!
//! [`SensorSource`]: crate::io::SensorSource

mod matcher;
mod pump;
mod recorder;

pub use matcher::{AbortReason, MatchOutcome, MatchSession, MatchStep, Matcher, match_gesture};
pub use recorder::{RecordSession, record};
