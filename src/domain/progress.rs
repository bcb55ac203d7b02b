//! The progress-bar model
//!
//! Holds the full property set of the bar: the pinned progress value, the
//! colors and stripe styling, the behavior policy gating stripe visibility
//! and the transient animation state. Layout and rasterization read this
//! model but never mutate it.

use std::time::Duration;

use crate::domain::animation::{
    ProgressTransition, StripePhase, PROGRESS_TRANSITION, REFERENCE_FPS,
};
use crate::domain::color::Rgba;
use crate::domain::core::clamp_unit;

/// The bar appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarKind {
    /// Rounded corners, gloss effect shown by default
    #[default]
    Rounded,
    /// Squared corners, no gloss
    Flat,
}

/// Policy governing when the stripe overlay is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    /// Stripes are shown whenever they are not hidden
    #[default]
    Default,
    /// Stripes are shown only while the progress value is 0, as a marquee
    /// for a task whose percentage is not yet known
    Indeterminate,
    /// Stripes are shown only once the progress value reaches 1
    Waiting,
}

/// Slant of the stripe pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripesOrientation {
    /// Oblique stripes leaning right
    #[default]
    Right,
    /// Oblique stripes leaning left
    Left,
    /// Vertical stripes; the slant delta is ignored
    Vertical,
}

/// Direction the stripe pattern travels while animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripesDirection {
    /// Pattern moves from right to left
    Left,
    /// Pattern moves from left to right
    #[default]
    Right,
}

impl StripesDirection {
    pub fn sign(&self) -> f32 {
        match self {
            StripesDirection::Left => -1.0,
            StripesDirection::Right => 1.0,
        }
    }
}

/// Placement of the optional text indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorTextDisplay {
    /// No text is displayed
    #[default]
    None,
    /// Centered over the track, underneath the progress fill
    Track,
    /// Over the filled portion, right-aligned inside it
    Progress,
    /// Pinned to the right edge of the track, over everything
    FixedRight,
}

/// Styling of the stripe overlay
#[derive(Debug, Clone, PartialEq)]
pub struct StripesStyle {
    /// Whether the pattern moves over time
    pub animated: bool,
    /// Travel direction of the moving pattern
    pub direction: StripesDirection,
    /// Pixels travelled per frame at the reference rate; the absolute value
    /// is what counts
    pub velocity: f32,
    pub orientation: StripesOrientation,
    /// Stripe width in pixels. Zero or negative disables the stripes
    /// entirely, hidden flag or not.
    pub width: i32,
    /// Horizontal offset between the top and bottom edge of an oblique
    /// stripe
    pub delta: i32,
    pub color: Rgba,
}

impl StripesStyle {
    pub const DEFAULT_WIDTH: i32 = 7;
    pub const DEFAULT_DELTA: i32 = 8;

    /// Horizontal distance after which the pattern repeats
    pub fn period(&self) -> f32 {
        (self.width.max(0) * 2) as f32
    }
}

impl Default for StripesStyle {
    fn default() -> Self {
        Self {
            animated: true,
            direction: StripesDirection::default(),
            velocity: 1.0,
            orientation: StripesOrientation::default(),
            width: Self::DEFAULT_WIDTH,
            delta: Self::DEFAULT_DELTA,
            color: Rgba::WHITE.with_alpha(71),
        }
    }
}

/// A customizable animated progress bar
///
/// The stock progress indicator replacement: a track, a gradient fill
/// pinned to `[0, 1]`, an optional animated stripe overlay and an optional
/// text indicator. Call [`tick`](Self::tick) once per frame to advance
/// transitions and the stripe movement, then hand the model to
/// [`BarLayout`](crate::ui::layout::BarLayout) for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    progress: f32,
    kind: BarKind,
    transition: Option<ProgressTransition>,
    phase: StripePhase,

    pub behavior: Behavior,
    /// Hides the gloss highlight. Reset whenever the kind changes: rounded
    /// shows the gloss, flat hides it.
    pub hide_gloss: bool,
    /// Stretch the gradient across the filled portion only; when false the
    /// gradient spans the whole bar and is clipped by the fill
    pub progress_stretch: bool,
    /// Fill with the first tint color only, ignoring the gradient
    pub uniform_tint: bool,
    /// Gradient colors of the filled portion, drawn as equal-size stops
    pub progress_tint_colors: Vec<Rgba>,
    pub track_tint_color: Rgba,
    /// Inset between the track and the fill; applies to the rounded kind
    pub bar_inset: f32,
    /// Corner radius of the rounded kind; 0 means half the bar height
    pub corner_radius: f32,
    /// Custom indicator text; `None` shows the progress percentage
    pub indicator_text: Option<String>,
    pub indicator_text_display: IndicatorTextDisplay,
    /// Explicit indicator text color; `None` picks black or white by the
    /// luminance of the surface underneath
    pub indicator_text_color: Option<Rgba>,
    pub stripes: StripesStyle,
    pub hide_stripes: bool,
    pub hide_track: bool,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            progress: 0.3,
            kind: BarKind::Rounded,
            transition: None,
            phase: StripePhase::default(),
            behavior: Behavior::default(),
            hide_gloss: false,
            progress_stretch: true,
            uniform_tint: false,
            progress_tint_colors: vec![Rgba::opaque(0, 122, 255)],
            track_tint_color: Rgba::BLACK,
            bar_inset: 1.0,
            corner_radius: 0.0,
            indicator_text: None,
            indicator_text_display: IndicatorTextDisplay::default(),
            indicator_text_color: None,
            stripes: StripesStyle::default(),
            hide_stripes: false,
            hide_track: false,
        }
    }

    /// The target progress value, pinned to `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The value currently shown, following any in-flight transition
    pub fn displayed_progress(&self) -> f32 {
        match &self.transition {
            Some(t) => clamp_unit(t.value()),
            None => self.progress,
        }
    }

    /// Sets the progress immediately. Out-of-range values are pinned.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = clamp_unit(progress);
        self.transition = None;
    }

    /// Adjusts the progress with an eased transition from the currently
    /// displayed value. Out-of-range targets are pinned.
    pub fn set_progress_animated(&mut self, progress: f32) {
        let from = self.displayed_progress();
        self.progress = clamp_unit(progress);
        self.transition = Some(ProgressTransition::new(
            from,
            self.progress,
            PROGRESS_TRANSITION,
        ));
    }

    pub fn kind(&self) -> BarKind {
        self.kind
    }

    /// Changes the bar kind and resets the gloss default for it
    pub fn set_kind(&mut self, kind: BarKind) {
        self.kind = kind;
        self.hide_gloss = matches!(kind, BarKind::Flat);
    }

    /// Advances transitions and the stripe movement by one frame of `dt`
    pub fn tick(&mut self, dt: Duration) {
        if let Some(transition) = &mut self.transition {
            transition.advance(dt);
            if transition.finished() {
                self.progress = clamp_unit(transition.target());
                self.transition = None;
            }
        }

        if self.stripes.animated {
            let delta =
                self.stripes.direction.sign() * self.stripes.velocity.abs() * REFERENCE_FPS
                    * dt.as_secs_f32();
            self.phase.advance(delta, self.stripes.period());
        }
    }

    /// Current phase offset of the stripe pattern in pixels
    pub fn stripe_phase_offset(&self) -> f32 {
        self.phase.offset()
    }

    /// Whether the stripe overlay should be drawn right now.
    ///
    /// A non-positive stripe width always suppresses the stripes; otherwise
    /// the behavior decides: default shows them whenever they are not
    /// hidden, indeterminate only at progress 0, waiting only at progress 1.
    pub fn stripes_visible(&self) -> bool {
        if self.hide_stripes || self.stripes.width <= 0 {
            return false;
        }

        let displayed = self.displayed_progress();
        match self.behavior {
            Behavior::Default => true,
            Behavior::Indeterminate => displayed <= 0.0,
            Behavior::Waiting => displayed >= 1.0,
        }
    }

    /// Text shown by the indicator: the custom label, or the displayed
    /// progress as a percentage
    pub fn indicator_label(&self) -> String {
        match &self.indicator_text {
            Some(text) => text.clone(),
            None => format!("{:.0}%", self.displayed_progress() * 100.0),
        }
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
