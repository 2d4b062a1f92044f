//! Ray selection and geometry.

use rand::Rng;
use rand::rngs::StdRng;

use crate::cells::{CellCluster, Ray};
use crate::color::hsl;
use crate::geometry::Rect;
use crate::lighting::shading::{light_direction, light_position};
use crate::settings::{LightPreset, LightSettings};

/// Sorts clusters by vibrance (`s*l`) descending and takes the first
/// `min(ray_count, clusters.len())`.
pub fn select_clusters(clusters: &[CellCluster], ray_count: u32) -> Vec<CellCluster> {
    let mut sorted = clusters.to_vec();
    sorted.sort_by(|a, b| {
        let (_, sa, la) = hsl::hsl_components(a.color);
        let (_, sb, lb) = hsl::hsl_components(b.color);
        (sb * lb).partial_cmp(&(sa * la)).unwrap()
    });
    sorted.truncate(ray_count as usize);
    sorted
}

fn ray_direction_radians(cluster: &CellCluster, light: crate::geometry::Point, settings: &LightSettings, index: usize) -> f64 {
    if matches!(settings.preset, LightPreset::Center) {
        return (index as f64 / settings.rays.count.max(1) as f64) * std::f64::consts::TAU;
    }
    (cluster.centroid.y - light.y).atan2(cluster.centroid.x - light.x)
}

/// Generates back and front rays for the selected clusters
///. Randomized width/length jitter is drawn from
/// `rng`, which callers seed per `crate::rng` for determinism.
pub fn generate_rays(
    clusters: &[CellCluster],
    image_rect: Rect,
    settings: &LightSettings,
    rng: &mut StdRng,
) -> (Vec<Ray>, Vec<Ray>) {
    if clusters.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let ray_count = settings.rays.count.max(1) as f64;
    let w = image_rect.size.width;
    let diagonal = (image_rect.size.width.powi(2) + image_rect.size.height.powi(2)).sqrt();
    let base_width = (w / ray_count) * (settings.rays.spread_degrees / 45.0);
    let front_length = diagonal * settings.rays.length;
    let back_length = 0.25 * front_length;

    let light = light_position(image_rect, settings);
    let _ = light_direction(settings);

    let mut back_rays = Vec::with_capacity(clusters.len());
    let mut front_rays = Vec::with_capacity(clusters.len());

    for (i, cluster) in clusters.iter().enumerate() {
        let direction = ray_direction_radians(cluster, light, settings, i);
        let unit = (direction.cos(), direction.sin());

        let back_origin = crate::geometry::Point::new(
            cluster.centroid.x - unit.0 * 0.3 * back_length,
            cluster.centroid.y - unit.1 * 0.3 * back_length,
        );
        let u1: f64 = rng.random_range(0.0..0.5);
        let u2: f64 = rng.random_range(0.0..0.3);
        back_rays.push(Ray {
            origin: back_origin,
            direction_radians: direction,
            color: cluster.color,
            opacity: 0.8 * settings.intensity,
            base_width: 0.7 * base_width * (0.5 + u1),
            length: back_length * (0.7 + u2),
        });

        let u3: f64 = rng.random_range(0.0..0.5);
        let u4: f64 = rng.random_range(0.0..0.3);
        front_rays.push(Ray {
            origin: cluster.centroid,
            direction_radians: direction,
            color: cluster.color,
            opacity: 0.5 * settings.intensity,
            base_width: base_width * (0.5 + u3),
            length: front_length * (0.7 + u4),
        });
    }

    (back_rays, front_rays)
}


// end of file
