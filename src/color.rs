use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::WalkTime;

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
// Walk-time buckets
// ---------------------------------------------------------------------------

/// Outline colour of an isochrone.
pub fn isochrone_stroke(walk_time: WalkTime) -> Color32 {
    match walk_time {
        WalkTime::Five => Color32::from_rgb(0, 0, 255),
        WalkTime::Ten => Color32::from_rgb(255, 0, 0),
        WalkTime::Fifteen => Color32::from_rgb(255, 165, 0),
    }
}

/// Fill colour of an isochrone. Drawn more transparent when all three
/// overlap on the map.
pub fn isochrone_fill(walk_time: WalkTime, overlapping: bool) -> Color32 {
    let alpha = match (walk_time, overlapping) {
        (_, true) | (WalkTime::Fifteen, false) => 0.3,
        _ => 0.7,
    };
    let (r, g, b) = match walk_time {
        WalkTime::Five => (173, 216, 230),
        WalkTime::Ten => (255, 204, 203),
        WalkTime::Fifteen => (255, 165, 0),
    };
    Color32::from_rgba_unmultiplied(r, g, b, (alpha * 255.0) as u8)
}

// ---------------------------------------------------------------------------
// Color mapping: group key → Color32
// ---------------------------------------------------------------------------

/// Maps group keys (shop names, chains) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign palette colours to `keys` in the order given.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let keys: Vec<&str> = keys.into_iter().collect();
        let palette = generate_palette(keys.len());
        let mapping: BTreeMap<String, Color32> = keys
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a key.
    pub fn color_for(&self, key: &str) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn unknown_keys_fall_back_to_gray() {
        let map = ColorMap::new(["Starbucks", "Independent"]);
        assert_ne!(map.color_for("Starbucks"), map.color_for("Independent"));
        assert_eq!(map.color_for("Second Cup"), Color32::GRAY);
    }

    #[test]
    fn overlapping_fills_are_lighter() {
        let solo = isochrone_fill(WalkTime::Five, false);
        let overlapped = isochrone_fill(WalkTime::Five, true);
        assert!(overlapped.a() < solo.a());
    }
}
