//! RGB color type and the stroke palette.

use serde::{Deserialize, Serialize};

/// Represents an RGB color with floating-point components in 0.0..=1.0.
///
/// # Examples
///
/// ```
/// use artplay::draw::Color;
/// let orange = Color::new(1.0, 0.5, 0.0);
/// assert_eq!(orange.scale(0.5), Color::new(0.5, 0.25, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Uniform grey of the given intensity.
    pub const fn grey(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Multiplies every channel by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// A palette entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
}

// ============================================================================
// Stroke palette
// ============================================================================

/// The nine selectable stroke colors, in menu order.
pub const PALETTE: [NamedColor; 9] = [
    NamedColor {
        name: "White",
        color: Color::new(1.0, 1.0, 1.0),
    },
    NamedColor {
        name: "Red",
        color: Color::new(1.0, 0.0, 0.0),
    },
    NamedColor {
        name: "Green",
        color: Color::new(0.0, 1.0, 0.0),
    },
    NamedColor {
        name: "Blue",
        color: Color::new(0.0, 0.0, 1.0),
    },
    NamedColor {
        name: "Yellow",
        color: Color::new(1.0, 1.0, 0.0),
    },
    NamedColor {
        name: "Orange",
        color: Color::new(1.0, 0.5, 0.0),
    },
    NamedColor {
        name: "Purple",
        color: Color::new(0.5, 0.0, 0.5),
    },
    NamedColor {
        name: "Cyan",
        color: Color::new(0.0, 1.0, 1.0),
    },
    NamedColor {
        name: "Pink",
        color: Color::new(1.0, 0.4, 0.7),
    },
];

/// Palette entry at `index`, if any.
pub fn palette_entry(index: usize) -> Option<&'static NamedColor> {
    PALETTE.get(index)
}

/// Case-insensitive palette lookup by name.
pub fn palette_index(name: &str) -> Option<usize> {
    PALETTE
        .iter()
        .position(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
}
