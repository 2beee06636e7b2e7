use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category name → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a category (platform, genre) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        ColorMap {
            mapping: categories.iter().cloned().zip(palette).collect(),
        }
    }

    /// Colour for `category`, grey when unknown.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_colours_are_distinct() {
        let palette = generate_palette(12);
        assert_eq!(palette.len(), 12);
        let unique: std::collections::HashSet<_> = palette.iter().collect();
        assert_eq!(unique.len(), 12);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_color_map_lookup() {
        let categories: BTreeSet<String> =
            ["Action", "Sports"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&categories);
        assert_ne!(map.color_for("Action"), map.color_for("Sports"));
        assert_eq!(map.color_for("Puzzle"), Color32::GRAY);
    }
}
