//! Trace recorder for capturing device input.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::types::{HEADER_SIZE, TraceHeader, TraceInfo};
use crate::core::Input;
use crate::error::Result;

/// Writes device input to a trace file.
///
/// Messages are length-prefixed postcard records. The header is reserved on
/// creation and filled in by [`finish`](Self::finish). A recorder dropped
/// without `finish` still writes the header, so an interrupted capture
/// stays readable up to its last message.
///
/// # Example
///
/// ```ignore
/// use mudra_core::{Event, Input, TraceRecorder};
///
/// let mut recorder = TraceRecorder::create("session.trace")?;
/// recorder.record(&Input::event(Event::Begin, 1_000))?;
/// let info = recorder.finish()?;
/// println!("Recorded {} messages", info.message_count);
/// ```
pub struct TraceRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    message_count: u64,
    sample_count: u64,
    event_count: u64,
    start_time_us: Option<u64>,
    end_time_us: u64,
    finished: bool,
}

impl TraceRecorder {
    /// Create a recorder writing to `path`, truncating any existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        // Header placeholder
        writer.write_all(&[0u8; HEADER_SIZE])?;

        Ok(Self {
            writer,
            path,
            message_count: 0,
            sample_count: 0,
            event_count: 0,
            start_time_us: None,
            end_time_us: 0,
            finished: false,
        })
    }

    /// Append one input.
    pub fn record(&mut self, input: &Input) -> Result<()> {
        let timestamp = input.timestamp_us();
        if self.start_time_us.is_none() {
            self.start_time_us = Some(timestamp);
        }
        self.end_time_us = timestamp;

        let bytes = postcard::to_allocvec(input)?;
        let len = bytes.len() as u32;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.message_count += 1;
        match input {
            Input::Sample(_) => self.sample_count += 1,
            Input::Event(_) => self.event_count += 1,
        }
        Ok(())
    }

    /// Messages written so far.
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    /// Time span of the recorded messages in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us
            .saturating_sub(self.start_time_us.unwrap_or(0))
    }

    /// Write the final header and close the file.
    pub fn finish(mut self) -> Result<TraceInfo> {
        let file_size = self.write_header()?;
        self.finished = true;

        log::debug!(
            "Trace {} finished: {} messages, {} bytes",
            self.path.display(),
            self.message_count,
            file_size
        );

        Ok(TraceInfo {
            path: self.path.clone(),
            duration_us: self.duration_us(),
            message_count: self.message_count,
            sample_count: self.sample_count,
            event_count: self.event_count,
            file_size_bytes: file_size,
        })
    }

    /// Patch the header at offset 0; returns the file size.
    fn write_header(&mut self) -> Result<u64> {
        self.writer.flush()?;
        let file_size = self.writer.stream_position()?;

        let header = TraceHeader {
            start_time_us: self.start_time_us.unwrap_or(0),
            end_time_us: self.end_time_us,
            message_count: self.message_count,
            sample_count: self.sample_count,
            event_count: self.event_count,
            ..TraceHeader::new()
        };
        let header_bytes = postcard::to_allocvec(&header)?;
        let mut header_buffer = [0u8; HEADER_SIZE];
        let copy_len = header_bytes.len().min(HEADER_SIZE);
        header_buffer[..copy_len].copy_from_slice(&header_bytes[..copy_len]);

        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_all(&header_buffer)?;
        self.writer.flush()?;
        Ok(file_size)
    }
}

impl Drop for TraceRecorder {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        match self.write_header() {
            Ok(_) => log::warn!(
                "Trace {} closed without finish, {} messages kept",
                self.path.display(),
                self.message_count
            ),
            Err(e) => log::error!("Trace {} left without header: {}", self.path.display(), e),
        }
    }
}
