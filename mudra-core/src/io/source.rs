//! Sensor source abstraction.
//!
//! Implement this trait to drive recording and matching sessions from a
//! device, a replayed trace, or a synthetic script.

use std::time::Duration;

use crate::core::Input;

/// Cooperative, poll-based source of orientation samples and events.
///
/// # Required Methods
///
/// - [`poll`](Self::poll): block for at most one slice and return what arrived
/// - [`is_connected`](Self::is_connected): whether more input can arrive
///
/// # Optional Methods
///
/// - [`begin_session`](Self::begin_session): called once when a session starts
/// - [`end_session`](Self::end_session): called once when that session ends
pub trait SensorSource {
    /// Wait for at most `timeout` and return the inputs delivered meanwhile.
    ///
    /// Inputs are in arrival order. An empty vector means nothing arrived
    /// during the slice.
    fn poll(&mut self, timeout: Duration) -> Vec<Input>;

    /// Check if the source can still deliver input.
    ///
    /// Sessions end once this returns false.
    fn is_connected(&self) -> bool;

    /// Notification that a recording or matching session is starting.
    ///
    /// Use this to discard stale state such as a pending interrupt.
    /// Default implementation does nothing.
    fn begin_session(&mut self) {}

    /// Notification that the current session has ended, however it ended.
    fn end_session(&mut self) {}
}

impl<S: SensorSource + ?Sized> SensorSource for &mut S {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        (**self).poll(timeout)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn begin_session(&mut self) {
        (**self).begin_session()
    }

    fn end_session(&mut self) {
        (**self).end_session()
    }
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn poll(&mut self, timeout: Duration) -> Vec<Input> {
        (**self).poll(timeout)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn begin_session(&mut self) {
        (**self).begin_session()
    }

    fn end_session(&mut self) {
        (**self).end_session()
    }
}
