//! Waypoint debouncer.
//!
//! Suppresses exact sensor repeats and isolated single-bin jitter. This is a
//! step-count heuristic with one sample of memory, not a low-pass filter.
//! Every comparison is against the last *emitted* waypoint `prev`:
//!
//! | Incoming `w` vs `prev`                    | Action | `minor` after |
//! |-------------------------------------------|--------|---------------|
//! | `w == prev`                               | drop   | false         |
//! | within one bin on every axis              | drop   | true          |
//! | anything else                             | emit   | false         |
//!
//! A second consecutive single-bin nudge is still dropped, but two nudges in
//! the same direction put `w` two bins away from `prev`, so the move
//! registers on the second step.

use crate::core::Waypoint;

/// Per-session debounce state.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    /// Last emitted waypoint (default waypoint before the first emission)
    prev: Waypoint,
    /// Set while a run of single-bin nudges is being suppressed
    minor: bool,
    emitted: u64,
    dropped: u64,
}

impl Debouncer {
    /// Create a debouncer with the default waypoint as reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one quantized waypoint; returns it if it is significant.
    pub fn filter(&mut self, w: Waypoint) -> Option<Waypoint> {
        if w == self.prev {
            self.minor = false;
            self.dropped += 1;
            return None;
        }

        if w.is_adjacent(&self.prev) {
            if !self.minor {
                log::trace!("Jitter around {} suppressed: {}", self.prev, w);
            }
            self.minor = true;
            self.dropped += 1;
            return None;
        }

        self.minor = false;
        self.prev = w;
        self.emitted += 1;
        Some(w)
    }

    /// Last emitted waypoint.
    pub fn last_emitted(&self) -> Waypoint {
        self.prev
    }

    /// True while single-bin nudges around the last emission are being dropped.
    pub fn in_minor_run(&self) -> bool {
        self.minor
    }

    /// Number of waypoints emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Number of waypoints suppressed so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Lazy iterator over the significant waypoints of an input stream.
#[derive(Debug, Clone)]
pub struct Debounced<I> {
    inner: I,
    debouncer: Debouncer,
}

impl<I> Debounced<I> {
    /// Debounce state accumulated so far.
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }
}

impl<I: Iterator<Item = Waypoint>> Iterator for Debounced<I> {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Waypoint> {
        for w in self.inner.by_ref() {
            if let Some(out) = self.debouncer.filter(w) {
                return Some(out);
            }
        }
        None
    }
}

/// Debounce a stream of waypoints with a fresh [`Debouncer`].
pub fn debounce<I>(waypoints: I) -> Debounced<I::IntoIter>
where
    I: IntoIterator<Item = Waypoint>,
{
    Debounced {
        inner: waypoints.into_iter(),
        debouncer: Debouncer::new(),
    }
}
