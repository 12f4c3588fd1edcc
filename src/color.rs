use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ALL_GENRES;

// ---------------------------------------------------------------------------
// Chart colors
// ---------------------------------------------------------------------------

/// Accent used for single-series charts.
pub const ACCENT: Color32 = Color32::from_rgb(0x1d, 0xb9, 0x54);

/// Generate `n` distinct colours by stepping the hue wheel with the golden
/// angle, so neighbouring indices stay far apart even for large `n`.
pub fn genre_palette(n: usize) -> Vec<Color32> {
    const GOLDEN_ANGLE: f32 = 137.508;
    (0..n)
        .map(|i| {
            let hue = (i as f32 * GOLDEN_ANGLE) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Genre → colour mapping
// ---------------------------------------------------------------------------

/// Assigns every catalog genre a stable colour, used by the split-by-genre
/// trend lines and the genre checkboxes.
#[derive(Debug, Clone)]
pub struct GenreColorMap {
    mapping: BTreeMap<String, Color32>,
    fallback: Color32,
}

impl GenreColorMap {
    /// Build the map from the UI genre catalog; the "All" sentinel gets no
    /// colour of its own.
    pub fn new(catalog: &[String]) -> Self {
        let genres: Vec<&String> = catalog.iter().filter(|g| *g != ALL_GENRES).collect();
        let palette = genre_palette(genres.len());
        let mapping = genres
            .into_iter()
            .zip(palette)
            .map(|(genre, color)| (genre.clone(), color))
            .collect();

        GenreColorMap {
            mapping,
            fallback: Color32::GRAY,
        }
    }

    /// Colour for a genre; unknown genres get the fallback grey.
    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::genre_catalog;

    #[test]
    fn palette_colors_are_distinct_for_small_n() {
        let palette = genre_palette(12);
        let unique: std::collections::BTreeSet<_> =
            palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn sentinel_maps_to_fallback() {
        let map = GenreColorMap::new(&genre_catalog());
        assert_eq!(map.color_for(ALL_GENRES), Color32::GRAY);
        assert_ne!(map.color_for("Jazz"), Color32::GRAY);
    }
}
