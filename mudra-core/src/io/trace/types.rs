//! Core data types for the trace file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Magic bytes at start of trace file.
pub const TRACE_MAGIC: [u8; 4] = *b"MTRC";

/// Current trace file format version.
pub const TRACE_VERSION: u16 = 1;

/// Size of the trace file header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Trace file header (64 bytes fixed size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Magic bytes: "MTRC"
    pub magic: [u8; 4],
    /// File format version
    pub version: u16,
    /// Timestamp of first message (microseconds)
    pub start_time_us: u64,
    /// Timestamp of last message (microseconds)
    pub end_time_us: u64,
    /// Total number of messages in the file
    pub message_count: u64,
    /// Number of orientation samples
    pub sample_count: u64,
    /// Number of events
    pub event_count: u64,
}

impl TraceHeader {
    /// Create a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: TRACE_MAGIC,
            version: TRACE_VERSION,
            start_time_us: 0,
            end_time_us: 0,
            message_count: 0,
            sample_count: 0,
            event_count: 0,
        }
    }

    /// Check if magic bytes and version are valid.
    pub fn is_valid(&self) -> bool {
        self.magic == TRACE_MAGIC && self.version == TRACE_VERSION
    }

    /// Get recording duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us.saturating_sub(self.start_time_us)
    }

    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us() as f64 / 1_000_000.0
    }
}

impl Default for TraceHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a finished trace file.
#[derive(Debug, Clone)]
pub struct TraceInfo {
    /// Path to the trace file
    pub path: PathBuf,
    /// Recording duration in microseconds
    pub duration_us: u64,
    /// Total number of messages
    pub message_count: u64,
    /// Number of orientation samples
    pub sample_count: u64,
    /// Number of events
    pub event_count: u64,
    /// File size in bytes
    pub file_size_bytes: u64,
}

impl TraceInfo {
    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us as f64 / 1_000_000.0
    }

    /// Get average sample rate in Hz.
    pub fn sample_rate_hz(&self) -> f64 {
        if self.duration_us == 0 {
            0.0
        } else {
            self.sample_count as f64 / self.duration_secs()
        }
    }
}
