//! User-facing bar style configuration
//!
//! Keeps raw user input out of the model: every numeric style knob is
//! sanitized into a safe range before a [`ProgressBar`] is built, and
//! impossible configurations are rejected with a [`StyleError`]. Also home
//! to the preset styles used by the sample screen.

use thiserror::Error;

use crate::domain::color::{ColorError, Rgba};
use crate::domain::core::clamp_unit;
use crate::domain::progress::{
    BarKind, Behavior, IndicatorTextDisplay, ProgressBar, StripesOrientation, StripesStyle,
};

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("a progress bar needs at least one tint color")]
    NoTintColors,

    #[error("invalid tint color: {0}")]
    InvalidColor(#[from] ColorError),
}

/// Builder-style configuration for a [`ProgressBar`]
///
/// The numeric limits mirror what still renders sensibly; anything outside
/// is clamped rather than rejected, matching how the model pins the
/// progress value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub kind: BarKind,
    pub behavior: Behavior,
    pub progress_tint_colors: Vec<Rgba>,
    pub track_tint_color: Rgba,
    pub uniform_tint: bool,
    pub progress_stretch: bool,
    pub bar_inset: f32,
    pub corner_radius: f32,
    /// `None` keeps the gloss default of the kind (rounded shows it, flat
    /// hides it)
    pub hide_gloss: Option<bool>,
    pub hide_stripes: bool,
    pub hide_track: bool,
    pub stripes: StripesStyle,
    pub indicator_text: Option<String>,
    pub indicator_text_display: IndicatorTextDisplay,
    pub indicator_text_color: Option<Rgba>,
    pub initial_progress: f32,
}

impl StyleConfig {
    pub const MAX_STRIPE_WIDTH: i32 = 64;
    pub const MAX_STRIPE_DELTA: i32 = 64;
    pub const MAX_VELOCITY: f32 = 30.0;
    pub const MAX_INSET: f32 = 8.0;
    pub const MAX_CORNER_RADIUS: f32 = 64.0;

    pub fn new() -> Self {
        let defaults = ProgressBar::new();
        Self {
            kind: defaults.kind(),
            behavior: defaults.behavior,
            progress_tint_colors: defaults.progress_tint_colors.clone(),
            track_tint_color: defaults.track_tint_color,
            uniform_tint: defaults.uniform_tint,
            progress_stretch: defaults.progress_stretch,
            bar_inset: defaults.bar_inset,
            corner_radius: defaults.corner_radius,
            hide_gloss: None,
            hide_stripes: defaults.hide_stripes,
            hide_track: defaults.hide_track,
            stripes: defaults.stripes.clone(),
            indicator_text: None,
            indicator_text_display: defaults.indicator_text_display,
            indicator_text_color: None,
            initial_progress: defaults.progress(),
        }
    }

    /// Replaces the tint colors with parsed `#rrggbb`/`#rrggbbaa` strings
    pub fn with_hex_colors(mut self, hex: &[&str]) -> Result<Self, StyleError> {
        let mut colors = Vec::with_capacity(hex.len());
        for value in hex {
            colors.push(Rgba::from_hex(value)?);
        }
        self.progress_tint_colors = colors;
        Ok(self)
    }

    pub fn sanitize_stripe_width(width: i32) -> i32 {
        width.clamp(0, Self::MAX_STRIPE_WIDTH)
    }

    pub fn sanitize_stripe_delta(delta: i32) -> i32 {
        delta.clamp(0, Self::MAX_STRIPE_DELTA)
    }

    pub fn sanitize_velocity(velocity: f32) -> f32 {
        let velocity = if velocity.is_finite() { velocity.abs() } else { 1.0 };
        velocity.min(Self::MAX_VELOCITY)
    }

    pub fn sanitize_inset(inset: f32) -> f32 {
        if inset.is_finite() {
            inset.clamp(0.0, Self::MAX_INSET)
        } else {
            0.0
        }
    }

    pub fn sanitize_corner_radius(radius: f32) -> f32 {
        if radius.is_finite() {
            radius.clamp(0.0, Self::MAX_CORNER_RADIUS)
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if self.progress_tint_colors.is_empty() {
            return Err(StyleError::NoTintColors);
        }
        Ok(())
    }

    /// Builds a sanitized [`ProgressBar`] from this configuration
    pub fn build(&self) -> Result<ProgressBar, StyleError> {
        self.validate()?;

        let mut bar = ProgressBar::new();
        bar.set_kind(self.kind);
        if let Some(hide_gloss) = self.hide_gloss {
            bar.hide_gloss = hide_gloss;
        }

        bar.behavior = self.behavior;
        bar.progress_tint_colors = self.progress_tint_colors.clone();
        bar.track_tint_color = self.track_tint_color;
        bar.uniform_tint = self.uniform_tint;
        bar.progress_stretch = self.progress_stretch;
        bar.bar_inset = Self::sanitize_inset(self.bar_inset);
        bar.corner_radius = Self::sanitize_corner_radius(self.corner_radius);
        bar.hide_stripes = self.hide_stripes;
        bar.hide_track = self.hide_track;

        bar.stripes = self.stripes.clone();
        bar.stripes.width = Self::sanitize_stripe_width(self.stripes.width);
        bar.stripes.delta = Self::sanitize_stripe_delta(self.stripes.delta);
        bar.stripes.velocity = Self::sanitize_velocity(self.stripes.velocity);

        bar.indicator_text = self.indicator_text.clone();
        bar.indicator_text_display = self.indicator_text_display;
        bar.indicator_text_color = self.indicator_text_color;

        bar.set_progress(clamp_unit(self.initial_progress));
        Ok(bar)
    }

    /// Flat bar filled with a rainbow gradient laid out over the full width
    pub fn rainbow_flat() -> Self {
        let mut config = Self::new();
        config.kind = BarKind::Flat;
        config.progress_stretch = false;
        config.progress_tint_colors = vec![
            Rgba::opaque(231, 76, 60),
            Rgba::opaque(230, 126, 34),
            Rgba::opaque(241, 196, 15),
            Rgba::opaque(46, 204, 113),
            Rgba::opaque(52, 152, 219),
            Rgba::opaque(155, 89, 182),
        ];
        config.track_tint_color = Rgba::opaque(38, 38, 38);
        config.stripes.animated = false;
        config
    }

    /// Flat single-color bar with a percentage readout over the fill
    pub fn indicator_flat() -> Self {
        let mut config = Self::new();
        config.kind = BarKind::Flat;
        config.uniform_tint = true;
        config.progress_tint_colors = vec![Rgba::opaque(46, 204, 113)];
        config.track_tint_color = Rgba::opaque(38, 38, 38);
        config.hide_stripes = true;
        config.indicator_text_display = IndicatorTextDisplay::Progress;
        config
    }

    /// Flat blue bar with animated oblique stripes
    pub fn striped_flat() -> Self {
        let mut config = Self::new();
        config.kind = BarKind::Flat;
        config.uniform_tint = true;
        config.progress_tint_colors = vec![Rgba::opaque(52, 152, 219)];
        config.track_tint_color = Rgba::opaque(38, 38, 38);
        config.stripes.orientation = StripesOrientation::Right;
        config
    }

    /// Classic rounded bar, gloss on, stock blue gradient
    pub fn rounded_slim() -> Self {
        let mut config = Self::new();
        config.progress_tint_colors = vec![
            Rgba::opaque(52, 152, 219),
            Rgba::opaque(41, 128, 185),
        ];
        config
    }

    /// Rounded bar with a wide red-to-orange gradient and a fixed readout
    pub fn rounded_fat() -> Self {
        let mut config = Self::new();
        config.progress_tint_colors = vec![
            Rgba::opaque(231, 76, 60),
            Rgba::opaque(230, 126, 34),
            Rgba::opaque(241, 196, 15),
        ];
        config.stripes.orientation = StripesOrientation::Vertical;
        config.indicator_text_display = IndicatorTextDisplay::FixedRight;
        config
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::StripesDirection;

    #[test]
    fn build_applies_configuration() {
        let mut config = StyleConfig::new();
        config.kind = BarKind::Flat;
        config.behavior = Behavior::Waiting;
        config.stripes.direction = StripesDirection::Left;
        config.initial_progress = 0.6;

        let bar = config.build().unwrap();
        assert_eq!(bar.kind(), BarKind::Flat);
        assert!(bar.hide_gloss); // flat kind default
        assert_eq!(bar.behavior, Behavior::Waiting);
        assert_eq!(bar.stripes.direction, StripesDirection::Left);
        assert!((bar.progress() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn explicit_gloss_overrides_kind_default() {
        let mut config = StyleConfig::new();
        config.kind = BarKind::Flat;
        config.hide_gloss = Some(false);

        let bar = config.build().unwrap();
        assert!(!bar.hide_gloss);
    }

    #[test]
    fn build_sanitizes_out_of_range_knobs() {
        let mut config = StyleConfig::new();
        config.stripes.width = 500;
        config.stripes.delta = -9;
        config.stripes.velocity = -120.0;
        config.bar_inset = 99.0;
        config.corner_radius = f32::INFINITY;
        config.initial_progress = 3.0;

        let bar = config.build().unwrap();
        assert_eq!(bar.stripes.width, StyleConfig::MAX_STRIPE_WIDTH);
        assert_eq!(bar.stripes.delta, 0);
        assert_eq!(bar.stripes.velocity, StyleConfig::MAX_VELOCITY);
        assert_eq!(bar.bar_inset, StyleConfig::MAX_INSET);
        assert_eq!(bar.corner_radius, 0.0);
        assert_eq!(bar.progress(), 1.0);
    }

    #[test]
    fn empty_tint_colors_are_rejected() {
        let mut config = StyleConfig::new();
        config.progress_tint_colors.clear();
        assert!(matches!(config.build(), Err(StyleError::NoTintColors)));
    }

    #[test]
    fn hex_colors_round_trip_into_config() {
        let config = StyleConfig::new()
            .with_hex_colors(&["#e74c3c", "#f1c40f"])
            .unwrap();
        assert_eq!(
            config.progress_tint_colors,
            vec![Rgba::opaque(231, 76, 60), Rgba::opaque(241, 196, 15)]
        );

        assert!(matches!(
            StyleConfig::new().with_hex_colors(&["nope"]),
            Err(StyleError::InvalidColor(_))
        ));
    }

    #[test]
    fn presets_build_cleanly() {
        for preset in [
            StyleConfig::rainbow_flat(),
            StyleConfig::indicator_flat(),
            StyleConfig::striped_flat(),
            StyleConfig::rounded_slim(),
            StyleConfig::rounded_fat(),
        ] {
            assert!(preset.build().is_ok());
        }
    }
}
