//! Mudra - gesture rehabilitation shell
//!
//! A therapist records a reference motion with an orientation armband; a
//! patient then performs repetitions that are checked against it. Recording
//! and matching live in `mudra-core`; this crate adds the devices, the
//! configuration file and the text menu around them.
//!
//! ```text
//! device (sim | trace) ──► Capturing ──► Interruptible ──► Console
//!                            │                │               │
//!                        trace file        Ctrl-C        GestureLibrary
//! ```

pub mod capture;
pub mod config;
pub mod devices;
pub mod interrupt;
pub mod menu;

pub use capture::{CaptureHandle, Capturing};
pub use config::AppConfig;
pub use devices::{create_device, wait_for_connection};
pub use interrupt::{InterruptState, Interruptible, setup_ctrl_c_handler};
pub use menu::Console;
