//! Bar rasterization
//!
//! Turns a [`BarLayout`] into a tiny-skia pixmap. Draw order: track,
//! under-fill text, gradient fill, stripe overlay clipped to its region,
//! gloss, over-fill text.

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Mask, Paint, Path, PathBuilder, Pixmap, Point,
    Rect as SkiaRect, SpreadMode, Transform,
};

use crate::domain::color::Rgba;
use crate::ui::layout::{BarLayout, BarShape, GlossSpec, GradientSpec, StripeQuad, TextLayer};
use crate::ui::text::{TextError, TextPainter};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("failed to create a {width}x{height} pixmap")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("indicator font rejected: {0}")]
    Font(#[from] TextError),
}

/// Progress bar renderer
///
/// Holds the optional text painter; without one the bar renders fine but
/// the text indicator is skipped.
#[derive(Debug, Default)]
pub struct BarRenderer {
    text: Option<TextPainter>,
}

impl BarRenderer {
    pub fn new() -> Self {
        Self { text: None }
    }

    /// Creates a renderer able to draw the text indicator
    pub fn with_font(font_data: Vec<u8>) -> Result<Self, RendererError> {
        Ok(Self {
            text: Some(TextPainter::new(font_data)?),
        })
    }

    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    /// Renders a bar layout to a fresh pixmap
    pub fn render(&self, layout: &BarLayout) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width as u32;
        let height = layout.canvas_height as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed { width, height })?;

        pixmap.fill(Color::TRANSPARENT);

        if let Some(track) = &layout.track {
            self.fill_shape(&mut pixmap, track, solid_paint(layout.track_color));
        }

        self.draw_text_layer(&mut pixmap, layout, TextLayer::BelowFill);

        if let (Some(fill), Some(gradient)) = (&layout.fill, &layout.gradient) {
            let paint = gradient_paint(gradient, fill.rect);
            self.fill_shape(&mut pixmap, fill, paint);
        }

        if let Some(region) = &layout.stripe_region {
            self.draw_stripes(&mut pixmap, region, &layout.stripes, layout.stripes_color);
        }

        if let Some(gloss) = &layout.gloss {
            self.draw_gloss(&mut pixmap, gloss, layout.fill.as_ref());
        }

        self.draw_text_layer(&mut pixmap, layout, TextLayer::AboveFill);

        Ok(pixmap)
    }

    /// RGBA byte view of a rendered frame for platform presenters
    pub fn pixmap_to_rgba(&self, pixmap: &Pixmap) -> Vec<u8> {
        pixmap.data().to_vec()
    }

    fn fill_shape(&self, pixmap: &mut Pixmap, shape: &BarShape, paint: Paint) {
        if let Some(path) = rounded_rect_path(shape.rect, shape.radius) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn draw_stripes(
        &self,
        pixmap: &mut Pixmap,
        region: &BarShape,
        stripes: &[StripeQuad],
        color: Rgba,
    ) {
        if stripes.is_empty() {
            return;
        }

        let Some(mask) = shape_mask(pixmap.width(), pixmap.height(), region) else {
            return;
        };

        let paint = solid_paint(color);
        let top = region.rect.top();
        let bottom = region.rect.bottom();

        for quad in stripes {
            let mut pb = PathBuilder::new();
            pb.move_to(quad.x + quad.shear, top);
            pb.line_to(quad.x + quad.shear + quad.width, top);
            pb.line_to(quad.x + quad.width, bottom);
            pb.line_to(quad.x, bottom);
            pb.close();

            if let Some(path) = pb.finish() {
                pixmap.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    Some(&mask),
                );
            }
        }
    }

    fn draw_gloss(&self, pixmap: &mut Pixmap, gloss: &GlossSpec, fill: Option<&BarShape>) {
        let mask = fill.and_then(|fill| shape_mask(pixmap.width(), pixmap.height(), fill));

        if let Some(paint) = vertical_gradient_paint(
            gloss.highlight,
            Rgba::WHITE.with_alpha(110),
            Rgba::WHITE.with_alpha(0),
        ) {
            if let Some(path) = rounded_rect_path(gloss.highlight, gloss.radius) {
                pixmap.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    mask.as_ref(),
                );
            }
        }

        if let Some(paint) = vertical_gradient_paint(
            gloss.shadow,
            Rgba::BLACK.with_alpha(0),
            Rgba::BLACK.with_alpha(60),
        ) {
            let path = PathBuilder::from_rect(gloss.shadow);
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                mask.as_ref(),
            );
        }
    }

    fn draw_text_layer(&self, pixmap: &mut Pixmap, layout: &BarLayout, layer: TextLayer) {
        let (Some(painter), Some(spec)) = (&self.text, &layout.text) else {
            return;
        };
        if spec.layer == layer {
            painter.draw(pixmap, spec);
        }
    }
}

fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn solid_paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_color(color));
    paint.anti_alias = true;
    paint
}

/// Horizontal gradient paint for the fill; falls back to a solid color when
/// the gradient degenerates
fn gradient_paint(gradient: &GradientSpec, fill_rect: SkiaRect) -> Paint<'static> {
    if gradient.is_solid() {
        return solid_paint(gradient.solid_color());
    }

    let stops: Vec<GradientStop> = gradient
        .stops
        .iter()
        .map(|(pos, color)| GradientStop::new(*pos, to_color(*color)))
        .collect();

    let mid_y = fill_rect.top() + fill_rect.height() / 2.0;
    match LinearGradient::new(
        Point::from_xy(gradient.start_x, mid_y),
        Point::from_xy(gradient.end_x, mid_y),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    ) {
        Some(shader) => {
            let mut paint = Paint::default();
            paint.shader = shader;
            paint.anti_alias = true;
            paint
        }
        None => solid_paint(gradient.solid_color()),
    }
}

fn vertical_gradient_paint(rect: SkiaRect, top: Rgba, bottom: Rgba) -> Option<Paint<'static>> {
    let shader = LinearGradient::new(
        Point::from_xy(rect.left(), rect.top()),
        Point::from_xy(rect.left(), rect.bottom()),
        vec![
            GradientStop::new(0.0, to_color(top)),
            GradientStop::new(1.0, to_color(bottom)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )?;

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = true;
    Some(paint)
}

/// Clip mask covering a rounded shape
fn shape_mask(width: u32, height: u32, shape: &BarShape) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let path = rounded_rect_path(shape.rect, shape.radius)?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

/// Rounded rectangle path built from cubic corner arcs
fn rounded_rect_path(rect: SkiaRect, radius: f32) -> Option<Path> {
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if radius <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    // Circle-to-cubic approximation constant.
    const KAPPA: f32 = 0.552_284_8;
    let k = radius * KAPPA;

    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let mut pb = PathBuilder::new();
    pb.move_to(l + radius, t);
    pb.line_to(r - radius, t);
    pb.cubic_to(r - radius + k, t, r, t + radius - k, r, t + radius);
    pb.line_to(r, b - radius);
    pb.cubic_to(r, b - radius + k, r - radius + k, b, r - radius, b);
    pb.line_to(l + radius, b);
    pb.cubic_to(l + radius - k, b, l, b - radius + k, l, b - radius);
    pb.line_to(l, t + radius);
    pb.cubic_to(l, t + radius - k, l + radius - k, t, l + radius, t);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::{BarKind, Behavior, ProgressBar};

    fn render(bar: &ProgressBar, width: u32, height: u32) -> Pixmap {
        let layout = BarLayout::from_bar(bar, width, height, 1.0);
        BarRenderer::new().render(&layout).unwrap()
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * pixmap.width() + x) * 4) as usize;
        let data = pixmap.data();
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    #[test]
    fn renders_pixmap_with_canvas_dimensions() {
        let bar = ProgressBar::new();
        let pixmap = render(&bar, 300, 24);
        assert_eq!(pixmap.width(), 300);
        assert_eq!(pixmap.height(), 24);
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        let bar = ProgressBar::new();
        let layout = BarLayout::from_bar(&bar, 0, 24, 1.0);
        assert!(matches!(
            BarRenderer::new().render(&layout),
            Err(RendererError::PixmapCreationFailed { .. })
        ));
    }

    #[test]
    fn rgba_export_has_four_bytes_per_pixel() {
        let bar = ProgressBar::new();
        let pixmap = render(&bar, 100, 10);
        let rgba = BarRenderer::new().pixmap_to_rgba(&pixmap);
        assert_eq!(rgba.len(), 100 * 10 * 4);
    }

    #[test]
    fn track_pixels_carry_the_track_color() {
        let mut bar = ProgressBar::new();
        bar.set_kind(BarKind::Flat);
        bar.set_progress(0.0);
        bar.hide_stripes = true;
        bar.track_tint_color = crate::domain::color::Rgba::opaque(40, 40, 40);

        let pixmap = render(&bar, 100, 20);
        // Center of the unfilled track, away from anti-aliased edges.
        assert_eq!(pixel(&pixmap, 50, 10), [40, 40, 40, 255]);
    }

    #[test]
    fn fill_pixels_differ_from_track_pixels() {
        let mut bar = ProgressBar::new();
        bar.set_kind(BarKind::Flat);
        bar.set_progress(0.5);
        bar.hide_stripes = true;

        let pixmap = render(&bar, 100, 20);
        let filled = pixel(&pixmap, 25, 10);
        let empty = pixel(&pixmap, 75, 10);
        assert_ne!(filled, empty);
    }

    #[test]
    fn hidden_track_leaves_transparent_pixels() {
        let mut bar = ProgressBar::new();
        bar.set_kind(BarKind::Flat);
        bar.set_progress(0.25);
        bar.hide_track = true;
        bar.hide_stripes = true;

        let pixmap = render(&bar, 100, 20);
        assert_eq!(pixel(&pixmap, 90, 10)[3], 0);
    }

    #[test]
    fn stripes_change_the_fill_surface() {
        let mut bar = ProgressBar::new();
        bar.set_kind(BarKind::Flat);
        bar.set_progress(1.0);

        let mut with = bar.clone();
        with.hide_stripes = false;
        let mut without = bar;
        without.hide_stripes = true;

        let striped = render(&with, 120, 20);
        let plain = render(&without, 120, 20);
        assert_ne!(striped.data(), plain.data());
    }

    #[test]
    fn indeterminate_marquee_renders_over_empty_bar() {
        let mut bar = ProgressBar::new();
        bar.set_kind(BarKind::Flat);
        bar.behavior = Behavior::Indeterminate;
        bar.set_progress(0.0);

        let mut plain = bar.clone();
        plain.hide_stripes = true;

        let marquee = render(&bar, 120, 20);
        let empty = render(&plain, 120, 20);
        assert_ne!(marquee.data(), empty.data());
    }

    #[test]
    fn rounded_corners_stay_transparent() {
        let bar = ProgressBar::new(); // rounded, radius = h/2
        let pixmap = render(&bar, 100, 20);
        assert_eq!(pixel(&pixmap, 0, 0)[3], 0);
        assert_eq!(pixel(&pixmap, 99, 19)[3], 0);
    }

    #[test]
    fn rounded_rect_path_handles_degenerate_radius() {
        let rect = SkiaRect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(rounded_rect_path(rect, 0.0).is_some());
        assert!(rounded_rect_path(rect, 50.0).is_some());
    }
}
