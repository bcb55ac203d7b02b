//! Indicator text rasterization
//!
//! Lays out a single line with ab_glyph and blends the coverage into the
//! pixmap with a src-over pass. The painter owns the font; callers decide
//! where the font bytes come from (see [`load_system_font`]).

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use thiserror::Error;
use tiny_skia::Pixmap;

use crate::ui::layout::{TextAlign, TextSpec};

#[derive(Debug, Error)]
pub enum TextError {
    #[error("font data could not be parsed")]
    InvalidFont,
}

/// Single-line text painter
pub struct TextPainter {
    font: FontVec,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter").finish_non_exhaustive()
    }
}

impl TextPainter {
    pub fn new(font_data: Vec<u8>) -> Result<Self, TextError> {
        let font = FontVec::try_from_vec(font_data).map_err(|_| TextError::InvalidFont)?;
        Ok(Self { font })
    }

    /// Advance width of `text` at `font_px` pixels
    pub fn measure(&self, text: &str, font_px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(font_px));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Draws a laid-out text spec into the pixmap.
    ///
    /// Text that does not fit its area is dropped rather than clipped, so a
    /// readout over a short fill simply disappears until there is room.
    pub fn draw(&self, pixmap: &mut Pixmap, spec: &TextSpec) {
        let scaled = self.font.as_scaled(PxScale::from(spec.font_px));
        let text_width = self.measure(&spec.text, spec.font_px);
        let pad = (spec.font_px * 0.35).min(spec.area.width() / 4.0);

        if text_width > spec.area.width() - 2.0 * pad {
            return;
        }

        let start_x = match spec.align {
            TextAlign::Center => spec.area.left() + (spec.area.width() - text_width) / 2.0,
            TextAlign::Right => spec.area.right() - pad - text_width,
        };

        // Vertically center the em box inside the area.
        let center_y = spec.area.top() + spec.area.height() / 2.0;
        let baseline = center_y + (scaled.ascent() + scaled.descent()) / 2.0;

        let mut x = start_x;
        let mut previous = None;
        for c in spec.text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                x += scaled.kern(prev, id);
            }

            let glyph: Glyph = id.with_scale_and_position(spec.font_px, point(x, baseline));
            if let Some(outline) = self.font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                let origin_x = bounds.min.x;
                let origin_y = bounds.min.y;
                outline.draw(|gx, gy, coverage| {
                    let px = origin_x + gx as f32;
                    let py = origin_y + gy as f32;
                    blend_pixel(pixmap, px as i32, py as i32, spec, coverage);
                });
            }

            x += scaled.h_advance(id);
            previous = Some(id);
        }
    }
}

/// Src-over blend of one covered pixel into premultiplied RGBA
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, spec: &TextSpec, coverage: f32) {
    if x < 0 || y < 0 || x >= pixmap.width() as i32 || y >= pixmap.height() as i32 {
        return;
    }

    let alpha = (coverage * spec.color.a as f32 / 255.0).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let sr = spec.color.r as f32 / 255.0 * alpha;
    let sg = spec.color.g as f32 / 255.0 * alpha;
    let sb = spec.color.b as f32 / 255.0 * alpha;

    let width = pixmap.width() as usize;
    let idx = (y as usize * width + x as usize) * 4;
    let data = pixmap.data_mut();
    let inv = 1.0 - alpha;

    data[idx] = ((sr + data[idx] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 1] = ((sg + data[idx + 1] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 2] = ((sb + data[idx + 2] as f32 / 255.0 * inv) * 255.0).round() as u8;
    data[idx + 3] = ((alpha + data[idx + 3] as f32 / 255.0 * inv) * 255.0).round() as u8;
}

/// Loads the first usable system font for the indicator text.
///
/// Returns `None` on systems without any of the known fonts; the bar then
/// renders without its text indicator.
pub fn load_system_font() -> Option<Vec<u8>> {
    let mut candidates: Vec<&str> = Vec::new();
    if cfg!(windows) {
        candidates.extend([
            "C:\\Windows\\Fonts\\segoeui.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]);
    }
    candidates.extend([
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ]);

    candidates
        .into_iter()
        .find_map(|path| std::fs::read(path).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Rgba;
    use crate::ui::layout::TextLayer;
    use tiny_skia::Rect as SkiaRect;

    fn painter() -> Option<TextPainter> {
        // Not every test environment ships a known font.
        let data = load_system_font()?;
        TextPainter::new(data).ok()
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        assert!(matches!(
            TextPainter::new(vec![0, 1, 2, 3]),
            Err(TextError::InvalidFont)
        ));
    }

    #[test]
    fn measure_grows_with_text_and_size() {
        let Some(painter) = painter() else { return };

        let short = painter.measure("5%", 14.0);
        let long = painter.measure("100%", 14.0);
        assert!(long > short);
        assert!(short > 0.0);

        let bigger = painter.measure("5%", 28.0);
        assert!(bigger > short);
    }

    #[test]
    fn draw_touches_pixels_inside_the_area() {
        let Some(painter) = painter() else { return };

        let mut pixmap = Pixmap::new(120, 24).unwrap();
        let spec = TextSpec {
            text: "42%".to_string(),
            area: SkiaRect::from_xywh(0.0, 0.0, 120.0, 24.0).unwrap(),
            align: TextAlign::Center,
            layer: TextLayer::AboveFill,
            color: Rgba::WHITE,
            font_px: 14.0,
        };
        painter.draw(&mut pixmap, &spec);

        assert!(pixmap.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn oversized_text_is_dropped() {
        let Some(painter) = painter() else { return };

        let mut pixmap = Pixmap::new(20, 10).unwrap();
        let spec = TextSpec {
            text: "a very long indicator label".to_string(),
            area: SkiaRect::from_xywh(0.0, 0.0, 20.0, 10.0).unwrap(),
            align: TextAlign::Right,
            layer: TextLayer::AboveFill,
            color: Rgba::WHITE,
            font_px: 8.0,
        };
        painter.draw(&mut pixmap, &spec);

        assert!(pixmap.data().iter().all(|&b| b == 0));
    }
}
