//! Input sources.
//!
//! - [`SensorSource`]: the polling seam every session is driven through
//! - [`ScriptedSource`]: pre-built slices for tests and synthetic runs
//! - [`trace`]: capture an input stream to disk and replay it later

pub mod scripted;
pub mod source;
pub mod trace;

pub use scripted::ScriptedSource;
pub use source::SensorSource;
pub use trace::{TraceHeader, TraceInfo, TracePlayer, TraceRecorder};
