//! Bar layout calculation
//!
//! Computes every shape the renderer draws: track and fill rounded rects,
//! gradient stops, the tiled stripe parallelograms with their phase offset,
//! the gloss rects and the indicator text placement. Layout is separated
//! from rasterization so the geometry can be tested without a pixmap.

use tiny_skia::Rect as SkiaRect;

use crate::domain::color::Rgba;
use crate::domain::progress::{
    BarKind, Behavior, IndicatorTextDisplay, ProgressBar, StripesOrientation,
};

/// A rectangle with rounded corners, the basic bar shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarShape {
    pub rect: SkiaRect,
    pub radius: f32,
}

/// Horizontal gradient of the filled portion
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    /// Canvas x where the first stop sits
    pub start_x: f32,
    /// Canvas x where the last stop sits
    pub end_x: f32,
    /// Equal-size stops, positions in [0, 1] along the span
    pub stops: Vec<(f32, Rgba)>,
}

impl GradientSpec {
    /// A gradient that degenerates to a single color
    pub fn is_solid(&self) -> bool {
        self.stops.len() < 2 || self.end_x - self.start_x < 1.0
    }

    pub fn solid_color(&self) -> Rgba {
        self.stops.first().map(|(_, c)| *c).unwrap_or(Rgba::WHITE)
    }
}

/// One stripe of the overlay pattern
///
/// The bottom edge starts at `x`; the top edge is sheared sideways by
/// `shear` pixels. Vertical extent comes from the stripe region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripeQuad {
    pub x: f32,
    pub width: f32,
    pub shear: f32,
}

/// Gloss overlay rects over the filled portion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlossSpec {
    /// Bright top highlight
    pub highlight: SkiaRect,
    /// Dark shade rising from the bottom edge
    pub shadow: SkiaRect,
    pub radius: f32,
}

/// Which drawing layer the indicator text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLayer {
    /// Between the track and the fill (track display mode)
    BelowFill,
    /// On top of everything
    AboveFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
    Right,
}

/// Placement of the indicator text
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub area: SkiaRect,
    pub align: TextAlign,
    pub layer: TextLayer,
    pub color: Rgba,
    pub font_px: f32,
}

/// Pre-calculated layout for one bar frame
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Track shape, absent when the track is hidden
    pub track: Option<BarShape>,
    pub track_color: Rgba,

    /// Filled portion, absent at progress 0
    pub fill: Option<BarShape>,
    pub gradient: Option<GradientSpec>,

    /// Region the stripes are clipped to
    pub stripe_region: Option<BarShape>,
    pub stripes: Vec<StripeQuad>,
    pub stripes_color: Rgba,

    pub gloss: Option<GlossSpec>,
    pub text: Option<TextSpec>,
}

impl BarLayout {
    /// Lays out one frame of `bar` on a `width` x `height` canvas.
    ///
    /// `scale` multiplies all device-independent style metrics (inset,
    /// radius, stripe geometry, font size) for hi-dpi canvases.
    pub fn from_bar(bar: &ProgressBar, width: u32, height: u32, scale: f32) -> Self {
        let w = width as f32;
        let h = height as f32;
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };

        let radius = match bar.kind() {
            BarKind::Flat => 0.0,
            BarKind::Rounded => {
                let r = if bar.corner_radius <= 0.0 {
                    h / 2.0
                } else {
                    bar.corner_radius * scale
                };
                r.min(h / 2.0)
            }
        };

        let inset = match bar.kind() {
            BarKind::Flat => 0.0,
            BarKind::Rounded => (bar.bar_inset * scale)
                .clamp(0.0, (h / 2.0 - 0.5).max(0.0))
                .min((w / 2.0 - 0.5).max(0.0)),
        };

        let inner_x = inset;
        let inner_y = inset;
        let inner_w = (w - 2.0 * inset).max(0.0);
        let inner_h = (h - 2.0 * inset).max(0.0);
        let fill_radius = (radius - inset).max(0.0);

        let displayed = bar.displayed_progress();
        let fill_w = inner_w * displayed;

        let track = if bar.hide_track {
            None
        } else {
            shape(0.0, 0.0, w, h, radius)
        };

        let fill = shape(inner_x, inner_y, fill_w, inner_h, fill_radius);

        let gradient = fill.as_ref().map(|fill| {
            gradient_spec(bar, fill.rect, inner_x, inner_x + inner_w)
        });

        let (stripe_region, stripes) = if bar.stripes_visible() {
            let region = if matches!(bar.behavior, Behavior::Indeterminate) && displayed <= 0.0 {
                shape(inner_x, inner_y, inner_w, inner_h, fill_radius)
            } else {
                fill
            };
            let stripes = region
                .as_ref()
                .map(|region| tile_stripes(bar, region.rect, scale))
                .unwrap_or_default();
            (region, stripes)
        } else {
            (None, Vec::new())
        };

        let gloss = if bar.hide_gloss {
            None
        } else {
            fill.as_ref().and_then(|fill| gloss_spec(fill))
        };

        let text = text_spec(bar, fill.as_ref(), inner_x, inner_y, inner_w, inner_h, scale);

        Self {
            canvas_width: w,
            canvas_height: h,
            track,
            track_color: bar.track_tint_color,
            fill,
            gradient,
            stripe_region,
            stripes,
            stripes_color: bar.stripes.color,
            gloss,
            text,
        }
    }
}

fn shape(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<BarShape> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    SkiaRect::from_xywh(x, y, w, h).map(|rect| BarShape {
        rect,
        radius: radius.min(w / 2.0).min(h / 2.0),
    })
}

/// Gradient stops of equal size over the configured span
fn gradient_spec(bar: &ProgressBar, fill: SkiaRect, inner_left: f32, inner_right: f32) -> GradientSpec {
    let colors: Vec<Rgba> = if bar.uniform_tint {
        bar.progress_tint_colors.iter().take(1).copied().collect()
    } else {
        bar.progress_tint_colors.clone()
    };

    let (start_x, end_x) = if bar.progress_stretch {
        (fill.left(), fill.right())
    } else {
        (inner_left, inner_right)
    };

    let stops = match colors.len() {
        0 => vec![(0.0, Rgba::WHITE)],
        1 => vec![(0.0, colors[0])],
        n => colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| (i as f32 / (n - 1) as f32, color))
            .collect(),
    };

    GradientSpec { start_x, end_x, stops }
}

/// Tiles stripe quads across the region, shifted by the animation phase
fn tile_stripes(bar: &ProgressBar, region: SkiaRect, scale: f32) -> Vec<StripeQuad> {
    let stripe_w = bar.stripes.width as f32 * scale;
    if stripe_w <= 0.0 {
        return Vec::new();
    }

    let delta = match bar.stripes.orientation {
        StripesOrientation::Vertical => 0.0,
        StripesOrientation::Right => bar.stripes.delta.max(0) as f32 * scale,
        StripesOrientation::Left => -(bar.stripes.delta.max(0) as f32) * scale,
    };

    let period = 2.0 * stripe_w;
    let phase = (bar.stripe_phase_offset() * scale).rem_euclid(period);
    let margin = delta.abs();

    // Lead-in has to cover the shear overhang as well as one full period.
    let lead = (margin / period).ceil() * period + period;

    let mut quads = Vec::new();
    let mut x = region.left() - lead + phase;
    let end = region.right() + margin;
    while x < end {
        quads.push(StripeQuad {
            x,
            width: stripe_w,
            shear: delta,
        });
        x += period;
    }
    quads
}

fn gloss_spec(fill: &BarShape) -> Option<GlossSpec> {
    let rect = fill.rect;
    let highlight = SkiaRect::from_xywh(rect.left(), rect.top(), rect.width(), rect.height() * 0.45)?;
    let shadow_h = rect.height() * 0.25;
    let shadow = SkiaRect::from_xywh(
        rect.left(),
        rect.bottom() - shadow_h,
        rect.width(),
        shadow_h,
    )?;
    Some(GlossSpec {
        highlight,
        shadow,
        radius: fill.radius,
    })
}

fn text_spec(
    bar: &ProgressBar,
    fill: Option<&BarShape>,
    inner_x: f32,
    inner_y: f32,
    inner_w: f32,
    inner_h: f32,
    scale: f32,
) -> Option<TextSpec> {
    let inner = SkiaRect::from_xywh(inner_x, inner_y, inner_w, inner_h)?;
    let font_px = (inner_h * 0.7).max(6.0 * scale);
    let first_tint = bar
        .progress_tint_colors
        .first()
        .copied()
        .unwrap_or(Rgba::WHITE);

    let (area, align, layer, surface) = match bar.indicator_text_display {
        IndicatorTextDisplay::None => return None,
        IndicatorTextDisplay::Track => (inner, TextAlign::Center, TextLayer::BelowFill, bar.track_tint_color),
        IndicatorTextDisplay::Progress => {
            let fill = fill?;
            (fill.rect, TextAlign::Right, TextLayer::AboveFill, first_tint)
        }
        IndicatorTextDisplay::FixedRight => {
            (inner, TextAlign::Right, TextLayer::AboveFill, bar.track_tint_color)
        }
    };

    let color = bar
        .indicator_text_color
        .unwrap_or_else(|| surface.contrasting_text_color());

    Some(TextSpec {
        text: bar.indicator_label(),
        area,
        align,
        layer,
        color,
        font_px,
    })
}
