//! Transmission shading: per-cell lightness as a function of light
//! position.

use crate::geometry::{Point, Rect, Vector};
use crate::settings::{LightPreset, LightSettings};

/// Unit vector from the image center toward the light source, in screen
/// coordinates (y grows downward), following the `left=0°`, clockwise
/// convention: `(dx, dy) = (-cos θ, sin θ)`. `None` for the `center`
/// preset, which has no direction.
pub fn light_direction(settings: &LightSettings) -> Option<Vector> {
    if matches!(settings.preset, LightPreset::Center) {
        return None;
    }
    let theta = settings.effective_angle_degrees().to_radians();
    Some(Vector::new(-theta.cos(), theta.sin()))
}

/// The conceptual light source position: for `center`, the image
/// center; otherwise a point `2*max(W,H)` outside the image along
/// `light_direction`.
pub fn light_position(image_rect: Rect, settings: &LightSettings) -> Point {
    let center = image_rect.center();
    match light_direction(settings) {
        None => center,
        Some(dir) => {
            let reach = 2.0 * image_rect.size.width.max(image_rect.size.height);
            center + dir * reach
        }
    }
}

/// Per-cell shading factor before the ambient/intensity combine step.
fn base_brightness(centroid: Point, image_rect: Rect, settings: &LightSettings) -> f64 {
    if matches!(settings.preset, LightPreset::Center) {
        return 0.5 + 0.5 * (settings.elevation_degrees / 90.0);
    }
    let dir = light_direction(settings).expect("non-center preset always has a direction");
    let center = image_rect.center();
    let diagonal = (image_rect.size.width.powi(2) + image_rect.size.height.powi(2)).sqrt();
    let offset = centroid - center;
    let projected = offset.dot(dir);
    let normalized = (projected / (diagonal / 2.0)).clamp(-1.0, 1.0);
    let p01 = (normalized + 1.0) / 2.0;
    let base = 0.3 + 0.7 * p01;
    let gradient = 1.0 - 0.7 * (settings.elevation_degrees / 90.0);
    (0.5 + (base - 0.5) * gradient).clamp(0.2, 1.0)
}

/// Full transmission shading for one cell, including the ambient and
/// intensity combine step: `b_final = (ambient + (1-ambient)*b) * intensity`.
/// The returned factor is applied as an HSL lightness multiplier on
/// the cell color.
pub fn transmission_brightness(centroid: Point, image_rect: Rect, settings: &LightSettings) -> f64 {
    let b = base_brightness(centroid, image_rect, settings);
    (settings.ambient + (1.0 - settings.ambient) * b) * settings.intensity
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{Point2D, Rect as EuclidRect, Size2D};

    fn image(w: f64, h: f64) -> Rect {
        EuclidRect::new(Point2D::new(0.0, 0.0), Size2D::new(w, h))
    }

    fn light(preset: LightPreset) -> LightSettings {
        LightSettings {
            enabled: true,
            preset,
            angle_degrees: 0.0,
            elevation_degrees: 45.0,
            intensity: 1.0,
            ambient: 0.3,
            dark_mode: false,
            ..LightSettings::default()
        }
    }

    #[test]
    fn left_preset_direction_points_left() {
        let dir = light_direction(&light(LightPreset::Left)).unwrap();
        assert!((dir.x + 1.0).abs() < 1e-9);
        assert!(dir.y.abs() < 1e-9);
    }

    #[test]
    fn bottom_preset_direction_points_down() {
        let dir = light_direction(&light(LightPreset::Bottom)).unwrap();
        assert!(dir.x.abs() < 1e-9);
        assert!((dir.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn center_preset_has_no_direction() {
        assert!(light_direction(&light(LightPreset::Center)).is_none());
    }

    #[test]
    fn moving_toward_the_light_never_decreases_brightness() {
        let rect = image(100.0, 100.0);
        let settings = light(LightPreset::Left);
        // left preset: light is to the left, so decreasing x moves toward it
        let far = transmission_brightness(Point::new(90.0, 50.0), rect, &settings);
        let near = transmission_brightness(Point::new(10.0, 50.0), rect, &settings);
        assert!(near >= far);
    }
}

// end of file
