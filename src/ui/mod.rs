//! Layout and rasterization of the bar
//!
//! `layout` computes pure geometry from the model, `renderer` rasterizes it
//! with tiny-skia, `text` draws the indicator with ab_glyph.

pub mod layout;
pub mod renderer;
pub mod text;

pub use layout::BarLayout;
pub use renderer::{BarRenderer, RendererError};
