//! Kaleido engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the gallery:
//! window/event loop, device + surface management, frame timing and logging.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
