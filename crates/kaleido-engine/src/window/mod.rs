//! Platform window + run loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
