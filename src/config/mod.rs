//! Configuration layer
//!
//! Sanitized, user-facing style configuration that builds domain models.

pub mod style;

pub use style::{StyleConfig, StyleError};
