//! Platform output glue
//!
//! Frame presentation: a PNG frame sink that works everywhere, and a live
//! layered-window presenter on Windows.

pub mod frames;

#[cfg(windows)]
pub mod window;

pub use frames::{FrameError, FrameSink};
