//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the
//! runtime. Intended usage: one `FrameClock` per window, ticked once per
//! presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
