//! Foundation types shared by every layer.
//!
//! - [`orientation`]: unit quaternion and Euler angles
//! - [`waypoint`]: discretized 3-axis orientation bucket
//! - [`input`]: samples and events delivered by a sensor source

pub mod input;
pub mod orientation;
pub mod timestamped;
pub mod waypoint;

pub use input::{Event, Input, Sample};
pub use orientation::{EulerAngles, Quaternion};
pub use timestamped::Timestamped;
pub use waypoint::Waypoint;
