//! Trace file recording and playback for offline testing.
//!
//! A trace captures the raw inputs of a device (orientation samples and
//! events) so that recording and matching sessions can be replayed without
//! hardware.
//!
//! # File Format
//!
//! Trace files use a simple binary format with Postcard serialization:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Header (64 bytes)                                │
//! │ - Magic: "MTRC" (4 bytes)                        │
//! │ - Version: u16                                   │
//! │ - Start time: u64 (microseconds)                 │
//! │ - End time: u64 (microseconds)                   │
//! │ - Message / sample / event counts: u64           │
//! │ - Reserved                                       │
//! ├──────────────────────────────────────────────────┤
//! │ Message Stream                                   │
//! │ [len:u32][postcard Input]...                     │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Example: Playback
//!
//! ```ignore
//! use mudra_core::{SessionConfig, TracePlayer, record};
//!
//! let mut player = TracePlayer::open("therapist.trace")?;
//! let gesture = record(&mut player, &SessionConfig::default());
//! println!("{} steps", gesture.len());
//! ```

mod player;
mod recorder;
mod types;

pub use player::TracePlayer;
pub use recorder::TraceRecorder;
pub use types::{HEADER_SIZE, TRACE_MAGIC, TRACE_VERSION, TraceHeader, TraceInfo};
