//! # Colours
//!
//! RGB colours in the 0.0..=1.0 range the PDF `rg` operator expects, plus
//! the fixed palette the hotel document is drawn with.

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build a colour from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The document palette.
pub mod palette {
    use super::Color;

    /// Header band and hotel section titles.
    pub const PRIMARY: Color = Color::rgb8(41, 128, 185);
    /// Proposal section title.
    pub const SECONDARY: Color = Color::rgb8(52, 152, 219);
    /// Body text.
    pub const TEXT: Color = Color::rgb8(52, 73, 94);
    /// Section header boxes.
    pub const LIGHT: Color = Color::rgb8(236, 240, 241);
    /// Stand-in for images that could not be embedded.
    pub const PLACEHOLDER: Color = Color {
        r: 0.9,
        g: 0.9,
        b: 0.9,
    };
}
