//! Sample application orchestration
//!
//! Drives the demo screen: a scripted scenario advancing the bars and a
//! controller that ticks the models and composes frames.

pub mod controller;
pub mod state;

pub use controller::{DemoController, DemoError};
