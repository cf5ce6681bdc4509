use std::collections::BTreeMap;

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

/// Point on the sequential ramp used by the heatmap, `t` in `[0, 1]`.
///
/// Light yellow at 0 through green to dark blue at 1.
pub fn sequential_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let hsl = Hsl::new(60.0 + t * 170.0, 0.7, 0.85 - t * 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: cluster ID → Color32
// ---------------------------------------------------------------------------

/// Maps the active method's cluster IDs to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ClusterColorMap {
    mapping: BTreeMap<i64, Color32>,
}

impl ClusterColorMap {
    /// Build a colour map from the distinct cluster IDs, ascending.
    pub fn new(cluster_ids: &[i64]) -> Self {
        let palette = generate_palette(cluster_ids.len());
        ClusterColorMap {
            mapping: cluster_ids.iter().copied().zip(palette).collect(),
        }
    }

    /// Colour for a cluster; gray for an ID outside the active set.
    pub fn color_for(&self, cluster: i64) -> Color32 {
        self.mapping.get(&cluster).copied().unwrap_or(Color32::GRAY)
    }
}
