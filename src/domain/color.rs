//! Color values for the bar model
//!
//! A small value color independent of tiny-skia so the domain and config
//! layers stay renderer-agnostic. The ui layer converts to paint colors.

use thiserror::Error;

/// Color parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("hex color must be '#rrggbb' or '#rrggbbaa', got {0:?}")]
    MalformedHex(String),

    #[error("hex color contains a non-hexadecimal digit: {0:?}")]
    InvalidDigit(String),
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parses a `#rrggbb` or `#rrggbbaa` color string
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MalformedHex(hex.to_string()))?;

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::MalformedHex(hex.to_string()));
        }

        // Length checks above count bytes; multi-byte characters would make
        // the slices below straddle a char boundary.
        if !digits.is_ascii() {
            return Err(ColorError::InvalidDigit(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigit(hex.to_string()))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 255 };

        Ok(Self::new(r, g, b, a))
    }

    /// Returns the same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Relative luminance in [0, 1], used to pick a contrasting text color
    pub fn luminance(&self) -> f32 {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Black or white, whichever reads better on top of this color
    pub fn contrasting_text_color(&self) -> Rgba {
        if self.luminance() > 0.55 {
            Rgba::BLACK
        } else {
            Rgba::WHITE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Rgba::from_hex("#3498db").unwrap(), Rgba::opaque(52, 152, 219));
    }

    #[test]
    fn parses_eight_digit_hex() {
        assert_eq!(
            Rgba::from_hex("#ffffff47").unwrap(),
            Rgba::new(255, 255, 255, 71)
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            Rgba::from_hex("3498db"),
            Err(ColorError::MalformedHex(_))
        ));
        assert!(matches!(
            Rgba::from_hex("#12345"),
            Err(ColorError::MalformedHex(_))
        ));
        assert!(matches!(
            Rgba::from_hex("#gg0000"),
            Err(ColorError::InvalidDigit(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_hex() {
        // Six bytes but not six digits; slicing by byte ranges must not panic.
        assert_eq!(
            Rgba::from_hex("#1\u{e9}345"),
            Err(ColorError::InvalidDigit("#1\u{e9}345".to_string()))
        );
        assert_eq!(
            Rgba::from_hex("#12345\u{e9}7"),
            Err(ColorError::InvalidDigit("#12345\u{e9}7".to_string()))
        );
    }

    #[test]
    fn luminance_orders_black_and_white() {
        assert!(Rgba::WHITE.luminance() > 0.99);
        assert!(Rgba::BLACK.luminance() < 0.01);
    }

    #[test]
    fn contrasting_color_flips_with_brightness() {
        assert_eq!(Rgba::WHITE.contrasting_text_color(), Rgba::BLACK);
        assert_eq!(Rgba::opaque(20, 20, 60).contrasting_text_color(), Rgba::WHITE);
    }
}
