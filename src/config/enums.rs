//! Configuration enum types.

use crate::draw::{Color, color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a palette name, a palette index, or RGB values.
///
/// # Examples
/// ```toml
/// # Palette name
/// default_color = "orange"
///
/// # Palette index (0 = White ... 8 = Pink)
/// default_color = 3
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name: white, red, green, blue, yellow, orange, purple, cyan, pink
    Name(String),
    /// Position in the palette
    Index(usize),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown names and out-of-range indices fall back to white with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => color::palette_index(name)
                .and_then(color::palette_entry)
                .map(|entry| entry.color)
                .unwrap_or_else(|| {
                    warn!("Unknown color '{}', using white", name);
                    Color::WHITE
                }),
            ColorSpec::Index(index) => color::palette_entry(*index)
                .map(|entry| entry.color)
                .unwrap_or_else(|| {
                    warn!("Palette index {} out of range, using white", index);
                    Color::WHITE
                }),
            ColorSpec::Rgb([r, g, b]) => Color::new(
                *r as f32 / 255.0,
                *g as f32 / 255.0,
                *b as f32 / 255.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_indexed_specs_resolve_through_palette() {
        assert_eq!(
            ColorSpec::Name("Cyan".to_string()).to_color(),
            Color::new(0.0, 1.0, 1.0)
        );
        assert_eq!(ColorSpec::Index(1).to_color(), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_specs_fall_back_to_white() {
        assert_eq!(ColorSpec::Name("mauve".to_string()).to_color(), Color::WHITE);
        assert_eq!(ColorSpec::Index(42).to_color(), Color::WHITE);
    }

    #[test]
    fn rgb_spec_is_normalized() {
        let color = ColorSpec::Rgb([255, 0, 51]).to_color();
        assert_eq!(color, Color::new(1.0, 0.0, 0.2));
    }
}
