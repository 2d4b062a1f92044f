//! lighting — transmission shading, ray clusters and the
//! glow layer. Runs only when `Settings.lighting.enabled`.

pub mod clusters;
pub mod glow;
pub mod rays;
pub mod shading;

use crate::cells::Ray;
use crate::color::sample::ColoredCell;
use crate::geometry::Rect;
use crate::rng::{rng_for, RngPurpose};
use crate::settings::LightSettings;

/// Everything the lighting stage contributes to the final vector
/// document, besides the per-cell lightness it already baked into
/// `ColoredCell::color` in place.
#[derive(Debug, Clone, Default)]
pub struct LightingOutput {
    pub back_rays: Vec<Ray>,
    pub front_rays: Vec<Ray>,
    pub glow: Vec<glow::GlowElement>,
}

/// Runs the whole lighting stage over already-colored cells, returning
/// the shaded cells and the extra ray/glow layers. A no-op (identity
/// cells, empty layers) when `settings.enabled` is false — matching the
/// "disabling lighting produces the same cells as skipping stage G
/// entirely" idempotence property.
pub fn apply(
    cells: &[ColoredCell],
    image_rect: Rect,
    settings: &LightSettings,
    seed: u64,
) -> (Vec<ColoredCell>, LightingOutput) {
    if !settings.enabled {
        return (cells.to_vec(), LightingOutput::default());
    }

    let shaded: Vec<ColoredCell> = cells
        .iter()
        .map(|cell| {
            let brightness = shading::transmission_brightness(cell.centroid, image_rect, settings);
            let mut c = cell.clone();
            c.color = crate::color::hsl::scale_lightness(c.color, brightness);
            c
        })
        .collect();

    let mut output = LightingOutput::default();

    if settings.rays.enabled {
        let grid = clusters::build_clusters(&shaded, image_rect, settings.rays.count);
        let selected = rays::select_clusters(&grid, settings.rays.count);
        let mut rng = rng_for(seed, RngPurpose::RayJitter);
        let (back, front) = rays::generate_rays(&selected, image_rect, settings, &mut rng);
        output.back_rays = back;
        output.front_rays = front;
    }

    if settings.glow.enabled {
        output.glow = glow::build_glow_layer(&shaded, settings);
    }

    (shaded, output)
}

// end of file
