//! Glow layer synthesis.

use crate::color::hsl;
use crate::color::sample::ColoredCell;
use crate::geometry::Point;
use crate::settings::LightSettings;

/// One glow polygon: the cell's own polygon, filled with its color at
/// boosted saturation.
#[derive(Debug, Clone)]
pub struct GlowElement {
    pub polygon: Vec<Point>,
    pub color: crate::geometry::Rgb,
}

const GLOW_SATURATION_BOOST: f64 = 1.3;

pub fn build_glow_layer(cells: &[ColoredCell], _settings: &LightSettings) -> Vec<GlowElement> {
    cells
        .iter()
        .map(|cell| GlowElement {
            polygon: cell.polygon.clone(),
            color: hsl::boost_saturation(cell.color, GLOW_SATURATION_BOOST),
        })
        .collect()
}

/// Gaussian-blur filter standard deviation for the glow layer's filter
/// definition.
pub fn filter_sigma(settings: &LightSettings) -> f64 {
    settings.glow.radius * settings.glow.intensity
}

/// Layer opacity: `intensity * (1.5 if darkMode else 1.0) * 0.7`.
pub fn layer_opacity(settings: &LightSettings) -> f64 {
    settings.glow.intensity * if settings.dark_mode { 1.5 } else { 1.0 } * 0.7
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rgb;
    use crate::settings::GlowSettings;

    #[test]
    fn layer_opacity_doubles_with_dark_mode_factor() {
        let mut settings = LightSettings { dark_mode: false, glow: GlowSettings { intensity: 0.5, ..GlowSettings::default() }, ..LightSettings::default() };
        let light = layer_opacity(&settings);
        settings.dark_mode = true;
        let dark = layer_opacity(&settings);
        assert!(dark > light);
    }

    #[test]
    fn build_glow_layer_preserves_cell_count() {
        let cells = vec![
            ColoredCell { index: 0, polygon: vec![], centroid: Point::new(0.0, 0.0), color: Rgb::new(50, 50, 200) },
            ColoredCell { index: 1, polygon: vec![], centroid: Point::new(1.0, 1.0), color: Rgb::new(200, 50, 50) },
        ];
        let glow = build_glow_layer(&cells, &LightSettings::default());
        assert_eq!(glow.len(), 2);
    }
}

// end of file
