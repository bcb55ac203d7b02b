//! Domain logic and core data structures
//!
//! This module contains the pure progress-bar model: value pinning, colors,
//! stripe policy and animation bookkeeping. It is independent of tiny-skia
//! and of any platform presenter.

pub mod animation;
pub mod color;
pub mod core;
pub mod progress;
