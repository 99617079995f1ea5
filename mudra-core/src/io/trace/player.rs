//! Trace player for replaying recorded device input.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::time::Duration;

use super::types::{HEADER_SIZE, TraceHeader};
use crate::core::Input;
use crate::error::{Error, Result};
use crate::io::source::SensorSource;

/// Largest message accepted when reading a trace.
const MAX_MESSAGE_BYTES: usize = 1_000_000;

/// Replays a trace file.
///
/// Used directly, the player is an iterator over the recorded inputs. As a
/// [`SensorSource`] it regroups the inputs into slices on the recorded
/// clock: each `poll(timeout)` returns the inputs whose timestamps fall in
/// the next `timeout` of trace time.
///
/// # Example
///
/// ```ignore
/// use mudra_core::TracePlayer;
///
/// let mut player = TracePlayer::open("session.trace")?;
/// while let Some(input) = player.next_immediate()? {
///     println!("{} us", input.timestamp_us());
/// }
///
/// // Replay as a live device at real-time pace
/// player.rewind()?;
/// player.set_speed(1.0);
/// ```
pub struct TracePlayer {
    reader: BufReader<File>,
    header: TraceHeader,
    playback_speed: f32,
    messages_read: u64,
    pending: Option<Input>,
    clock_us: Option<u64>,
    exhausted: bool,
}

impl TracePlayer {
    /// Open a trace file for playback.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);

        let mut header_buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buffer)?;

        let header: TraceHeader = postcard::from_bytes(&header_buffer)
            .map_err(|e| Error::Trace(format!("Failed to parse header: {}", e)))?;
        if !header.is_valid() {
            return Err(Error::Trace(format!(
                "{} is not a trace file",
                path.as_ref().display()
            )));
        }

        log::info!(
            "Opened trace {}: {} messages over {:.1} s",
            path.as_ref().display(),
            header.message_count,
            header.duration_secs()
        );

        Ok(Self {
            reader,
            header,
            playback_speed: 0.0,
            messages_read: 0,
            pending: None,
            clock_us: None,
            exhausted: false,
        })
    }

    /// Get the trace header.
    pub fn header(&self) -> &TraceHeader {
        &self.header
    }

    /// Get total message count.
    pub fn message_count(&self) -> u64 {
        self.header.message_count
    }

    /// Get number of messages read so far.
    pub fn messages_read(&self) -> u64 {
        self.messages_read
    }

    /// Set playback speed used when polled as a source.
    ///
    /// - 0.0 = as fast as possible (no sleeping)
    /// - 1.0 = real-time
    /// - 2.0 = 2x speed
    pub fn set_speed(&mut self, speed: f32) {
        self.playback_speed = speed.max(0.0);
    }

    /// Get current playback speed.
    pub fn speed(&self) -> f32 {
        self.playback_speed
    }

    /// Read the next input without timing delay.
    ///
    /// Returns `None` at end of file.
    pub fn next_immediate(&mut self) -> Result<Option<Input>> {
        let mut len_bytes = [0u8; 4];
        match self.reader.read_exact(&mut len_bytes) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_bytes) as usize;
        if len > MAX_MESSAGE_BYTES {
            return Err(Error::Trace(format!("Message too large: {} bytes", len)));
        }

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload)?;
        let input: Input = postcard::from_bytes(&payload)?;

        self.messages_read += 1;
        Ok(Some(input))
    }

    /// Reset to the beginning of the file.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        self.messages_read = 0;
        self.pending = None;
        self.clock_us = None;
        self.exhausted = false;
        Ok(())
    }

    /// Peek at the next input for slicing, reading ahead by one message.
    fn peek(&mut self) -> Option<&Input> {
        if self.pending.is_none() && !self.exhausted {
            match self.next_immediate() {
                Ok(Some(input)) => self.pending = Some(input),
                Ok(None) => self.exhausted = true,
                Err(e) => {
                    log::warn!("Trace playback stopped: {}", e);
                    self.exhausted = true;
                }
            }
        }
        self.pending.as_ref()
    }
}

impl SensorSource for TracePlayer {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        let Some(first_ts) = self.peek().map(Input::timestamp_us) else {
            return Vec::new();
        };

        let slice_start = *self.clock_us.get_or_insert(first_ts);
        let slice_end = slice_start.saturating_add(timeout.as_micros() as u64);

        let mut inputs = Vec::new();
        while self.peek().is_some_and(|input| input.timestamp_us() < slice_end) {
            inputs.extend(self.pending.take());
        }
        self.clock_us = Some(slice_end);

        if self.playback_speed > 0.0 {
            std::thread::sleep(timeout.div_f32(self.playback_speed));
        }
        inputs
    }

    fn is_connected(&self) -> bool {
        !self.exhausted || self.pending.is_some()
    }
}

/// Iterator implementation for `for input in player { }` syntax.
impl Iterator for TracePlayer {
    type Item = Result<Input>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(input) = self.pending.take() {
            return Some(Ok(input));
        }
        self.next_immediate().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, Quaternion};
    use crate::io::trace::TraceRecorder;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Event at 0 µs, then `samples` samples every 40 ms starting at 10 ms.
    fn create_test_trace(dir: &TempDir, samples: u64) -> PathBuf {
        let path = dir.path().join("test.trace");
        let mut recorder = TraceRecorder::create(&path).unwrap();
        recorder.record(&Input::event(Event::Begin, 0)).unwrap();
        for i in 0..samples {
            recorder
                .record(&Input::sample(Quaternion::identity(), 10_000 + i * 40_000))
                .unwrap();
        }
        recorder.finish().unwrap();
        path
    }

    #[test]
    fn test_player_open_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_trace(&temp_dir, 20);

        let player = TracePlayer::open(&path).unwrap();
        assert!(player.header().is_valid());
        assert_eq!(player.message_count(), 21);
        assert_eq!(player.header().sample_count, 20);
        assert_eq!(player.header().event_count, 1);
    }

    #[test]
    fn test_rejects_foreign_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("junk.trace");
        std::fs::write(&path, [0xAAu8; 128]).unwrap();

        assert!(matches!(TracePlayer::open(&path), Err(Error::Trace(_))));
    }

    #[test]
    fn test_player_iterator_and_rewind() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_trace(&temp_dir, 5);

        let mut player = TracePlayer::open(&path).unwrap();
        let inputs: Vec<_> = (&mut player).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(inputs.len(), 6);
        assert_eq!(inputs[0].as_event(), Some(Event::Begin));

        player.rewind().unwrap();
        assert_eq!(player.messages_read(), 0);
        assert!(player.next_immediate().unwrap().is_some());
    }

    #[test]
    fn test_poll_slices_on_recorded_clock() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_trace(&temp_dir, 5);
        let mut player = TracePlayer::open(&path).unwrap();
        let period = Duration::from_millis(100);

        // [0, 100 ms): event + samples at 10, 50, 90 ms
        let first = player.poll(period);
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].as_event(), Some(Event::Begin));

        // [100, 200 ms): samples at 130, 170 ms
        let second = player.poll(period);
        assert_eq!(second.len(), 2);
        assert!(!player.is_connected());
        assert!(player.poll(period).is_empty());
    }

    #[test]
    fn test_poll_reports_gaps_as_empty_slices() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gap.trace");
        let mut recorder = TraceRecorder::create(&path).unwrap();
        recorder
            .record(&Input::sample(Quaternion::identity(), 1_000_000))
            .unwrap();
        recorder
            .record(&Input::sample(Quaternion::identity(), 1_250_000))
            .unwrap();
        recorder.finish().unwrap();

        let mut player = TracePlayer::open(&path).unwrap();
        let period = Duration::from_millis(100);
        assert_eq!(player.poll(period).len(), 1);
        assert!(player.poll(period).is_empty());
        assert!(player.is_connected());
        assert_eq!(player.poll(period).len(), 1);
        assert!(!player.is_connected());
    }
}
