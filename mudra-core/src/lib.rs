//! Mudra core - waypoint gesture recording and recognition
//!
//! Records a physical motion as a short sequence of discretized orientation
//! waypoints and later recognizes whether a live orientation stream reproduces
//! that sequence, tolerating sensor noise and timing jitter.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   poll(period)   ┌───────────┐   ┌───────────┐   ┌────────────────────┐
//! │ SensorSource │ ───────────────► │ Quantizer │ ─►│ Debouncer │ ─►│ Recorder | Matcher │
//! │ (io/)        │  samples+events  └───────────┘   └───────────┘   └────────────────────┘
//! └──────────────┘                                                     │             │
//!                                                                      ▼             ▼
//!                                                               Gesture ──► GestureLibrary
//! ```
//!
//! - [`core`]: orientation, waypoint and input types
//! - [`preprocessing`]: quantizer and debouncer
//! - [`gesture`]: gesture sequence and name-keyed library
//! - [`session`]: recording and matching sessions driven by a source
//! - [`io`]: the [`SensorSource`] trait, scripted sources and trace files
//!
//! The engine is single-threaded: a session pumps its source once per
//! sampling period and owns all of its state for its lifetime.

pub mod config;
pub mod core;
pub mod error;
pub mod gesture;
pub mod io;
pub mod preprocessing;
pub mod session;

// Re-export commonly used types
pub use config::SessionConfig;
pub use crate::core::{Event, EulerAngles, Input, Quaternion, Sample, Timestamped, Waypoint};
pub use error::{Error, Result};
pub use gesture::{Gesture, GestureLibrary, GestureRecorder};
pub use io::{ScriptedSource, SensorSource, TraceInfo, TracePlayer, TraceRecorder};
pub use preprocessing::{Debouncer, Quantizer, debounce};
pub use session::{
    AbortReason, MatchOutcome, MatchSession, MatchStep, Matcher, RecordSession, match_gesture,
    record,
};
