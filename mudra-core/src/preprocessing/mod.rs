//! Orientation stream preprocessing.
//!
//! Raw quaternions are bucketed by the [`Quantizer`] and then thinned by the
//! [`Debouncer`] so that only significant waypoints reach a session.

mod debounce;
mod quantizer;

pub use debounce::{Debounced, Debouncer, debounce};
pub use quantizer::Quantizer;
