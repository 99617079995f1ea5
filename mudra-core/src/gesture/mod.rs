//! Recorded gestures and the name-keyed gesture library.

mod library;
mod sequence;

pub use library::GestureLibrary;
pub use sequence::{Gesture, GestureRecorder};
