//! Live trace capture
//!
//! Tees every input a device delivers into a trace file, so a session can
//! later be replayed with `type = "trace"`.

use mudra_core::{Input, Result, SensorSource, TraceInfo, TraceRecorder};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Shared handle to an open capture.
///
/// Lets code outside the session (the Ctrl-C handler) close the trace
/// before the process exits. Finishing is idempotent: only the first call
/// writes the header.
#[derive(Clone, Default)]
pub struct CaptureHandle {
    recorder: Arc<Mutex<Option<TraceRecorder>>>,
}

impl CaptureHandle {
    fn new(recorder: Option<TraceRecorder>) -> Self {
        Self {
            recorder: Arc::new(Mutex::new(recorder)),
        }
    }

    /// True while inputs are being written.
    pub fn is_capturing(&self) -> bool {
        self.recorder.lock().is_some()
    }

    /// Finalize the trace file, if still open.
    pub fn finish(&self) -> Result<Option<TraceInfo>> {
        let recorder = self.recorder.lock().take();
        recorder.map(TraceRecorder::finish).transpose()
    }

    fn record_all(&self, inputs: &[Input]) {
        let mut guard = self.recorder.lock();
        if let Some(recorder) = guard.as_mut()
            && let Err(e) = inputs.iter().try_for_each(|input| recorder.record(input))
        {
            log::warn!("Trace capture stopped: {}", e);
            // Dropping the recorder still writes the header for what was kept
            guard.take();
        }
    }
}

/// Source wrapper that records everything it passes through.
pub struct Capturing<S> {
    inner: S,
    handle: CaptureHandle,
}

impl<S: SensorSource> Capturing<S> {
    /// Capture `inner` into a new trace at `path`.
    pub fn to_file(inner: S, path: impl AsRef<Path>) -> Result<Self> {
        let recorder = TraceRecorder::create(path.as_ref())?;
        log::info!("Capturing device input to {}", path.as_ref().display());
        Ok(Self {
            inner,
            handle: CaptureHandle::new(Some(recorder)),
        })
    }

    /// Pass `inner` through without capturing.
    pub fn disabled(inner: S) -> Self {
        Self {
            inner,
            handle: CaptureHandle::default(),
        }
    }

    /// Handle for closing the capture from elsewhere.
    pub fn handle(&self) -> CaptureHandle {
        self.handle.clone()
    }

    pub fn is_capturing(&self) -> bool {
        self.handle.is_capturing()
    }

    /// Finalize the trace file, if any.
    pub fn finish(self) -> Result<Option<TraceInfo>> {
        self.handle.finish()
    }
}

impl<S: SensorSource> SensorSource for Capturing<S> {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        let inputs = self.inner.poll(timeout);
        self.handle.record_all(&inputs);
        inputs
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn begin_session(&mut self) {
        self.inner.begin_session();
    }

    fn end_session(&mut self) {
        self.inner.end_session();
    }
}
