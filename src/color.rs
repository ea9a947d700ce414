use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use content_trends::data::ContentType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from a blue so movies keep their familiar colour.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    const START_HUE: f32 = 210.0;
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (START_HUE + (i as f32 / n as f32) * 150.0) % 360.0;
            let hsl = Hsl::new(hue, 0.85, 0.55);
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
// Series colours: content type → Color32
// ---------------------------------------------------------------------------

/// One colour per content type, shared by every chart so a series keeps its
/// colour across pages.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<ContentType, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        let mapping = ContentType::ALL
            .into_iter()
            .zip(generate_palette(ContentType::ALL.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    pub fn color_for(&self, kind: ContentType) -> Color32 {
        self.mapping
            .get(&kind)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }
}
