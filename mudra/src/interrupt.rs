//! Ctrl-C handling
//!
//! During a session, Ctrl-C stops a recording or aborts a match attempt at
//! the next slice. Outside a session it exits the program.

use mudra_core::{Error, Event, Input, Result, SensorSource};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Exit status after Ctrl-C outside a session
const INTERRUPTED_EXIT_CODE: i32 = 130;

type ExitHook = Box<dyn FnOnce() + Send>;

/// Flags shared between the Ctrl-C handler and the session source.
#[derive(Default)]
pub struct InterruptState {
    requested: AtomicBool,
    in_session: AtomicBool,
    on_exit: Mutex<Option<ExitHook>>,
}

impl InterruptState {
    /// Record an interrupt; returns false when no session is running.
    pub fn request(&self) -> bool {
        if self.in_session.load(Ordering::SeqCst) {
            self.requested.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Take a pending interrupt, clearing it.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    pub fn in_session(&self) -> bool {
        self.in_session.load(Ordering::SeqCst)
    }

    /// Register cleanup to run before an interrupt exits the process.
    pub fn on_exit(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_exit.lock() = Some(Box::new(hook));
    }

    /// React to Ctrl-C; returns true when the process should exit.
    ///
    /// Inside a session the request is left for the source to pick up.
    /// Outside one the exit hook runs first.
    pub fn on_signal(&self) -> bool {
        if self.request() {
            return false;
        }
        let hook = self.on_exit.lock().take();
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    fn set_session(&self, active: bool) {
        self.requested.store(false, Ordering::SeqCst);
        self.in_session.store(active, Ordering::SeqCst);
    }
}

/// Install the process Ctrl-C handler.
pub fn setup_ctrl_c_handler() -> Result<Arc<InterruptState>> {
    let state = Arc::new(InterruptState::default());
    let s = Arc::clone(&state);
    ctrlc::set_handler(move || {
        if s.on_signal() {
            log::info!("Received shutdown signal");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        log::info!("Interrupt received, ending session");
    })
    .map_err(|e| Error::Config(format!("Error setting Ctrl-C handler: {}", e)))?;
    Ok(state)
}

/// Source wrapper that turns a pending interrupt into session-ending events.
///
/// Both `stop-recording` and `abort-matching` are injected, so the interrupt
/// ends whichever kind of session is running.
pub struct Interruptible<S> {
    inner: S,
    state: Arc<InterruptState>,
}

impl<S: SensorSource> Interruptible<S> {
    pub fn new(inner: S, state: Arc<InterruptState>) -> Self {
        Self { inner, state }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SensorSource> SensorSource for Interruptible<S> {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        let mut inputs = self.inner.poll(timeout);
        if self.state.take() {
            let ts = inputs.last().map(Input::timestamp_us).unwrap_or_default();
            inputs.push(Input::event(Event::StopRecording, ts));
            inputs.push(Input::event(Event::AbortMatching, ts));
        }
        inputs
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn begin_session(&mut self) {
        self.state.set_session(true);
        self.inner.begin_session();
    }

    fn end_session(&mut self) {
        self.state.set_session(false);
        self.inner.end_session();
    }
}
