//! Customizable animated striped progress bar.
//!
//! `stripebar` renders a progress bar with gradient fills, an animated
//! diagonal/vertical stripe overlay, rounded or flat styling, a gloss
//! effect and an optional text indicator into an RGBA pixmap using
//! tiny-skia. The drawing pipeline is split into a pure layout pass and a
//! rasterization pass so the geometry stays testable without a display.

pub mod app;
pub mod config;
pub mod domain;
pub mod platform;
pub mod ui;

pub use config::style::{StyleConfig, StyleError};
pub use domain::color::Rgba;
pub use domain::progress::{
    BarKind, Behavior, IndicatorTextDisplay, ProgressBar, StripesDirection, StripesOrientation,
    StripesStyle,
};
pub use ui::layout::BarLayout;
pub use ui::renderer::{BarRenderer, RendererError};
