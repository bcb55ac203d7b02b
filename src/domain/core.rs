//! Core domain types and operations
//!
//! Pure value types shared by the model and the layout pass. Everything here
//! works in plain pixels and knows nothing about tiny-skia or any platform.

/// Pins a progress value to the unit interval.
///
/// Values below 0.0 and above 1.0 are pinned to those limits; NaN pins to
/// 0.0 so a bad input can never poison later geometry.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Rectangle in pixel coordinates
///
/// Used to place bars on the demo canvas. All coordinates are in real
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_pins_to_limits() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.0), 0.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp_unit(1.0), 1.0);
        assert_eq!(clamp_unit(7.3), 1.0);
    }

    #[test]
    fn clamp_unit_rejects_nan() {
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }

    #[test]
    fn rect_basic_properties() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.bottom(), 70);
    }
}
