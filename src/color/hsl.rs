//! HSL adjustment helpers built on `palette::Hsl` for saturation,
//! lightness and hue operations.

use palette::{FromColor, Hsl, Hue, Srgb};

use crate::geometry::Rgb;

/// Multiplies saturation and lightness by the given factors, clamping
/// each to `[0, 1]`. Grayscale colors (`s == 0`) short-circuit to a
/// scaled lightness value rather than producing a spurious hue.
pub fn adjust_saturation_brightness(color: Rgb, saturation: f64, brightness: f64) -> Rgb {
    let srgb: Srgb<f32> = color.to_srgb_f32();
    let hsl = Hsl::from_color(srgb);
    if hsl.saturation <= 0.0 {
        let l = (hsl.lightness as f64 * brightness).clamp(0.0, 1.0);
        let v = (l * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }
    let adjusted = Hsl::new(
        hsl.hue,
        (hsl.saturation as f64 * saturation).clamp(0.0, 1.0) as f32,
        (hsl.lightness as f64 * brightness).clamp(0.0, 1.0) as f32,
    );
    Rgb::from_srgb_f32(Srgb::from_color(adjusted))
}

/// Rotates hue by `degrees`, wrapping around `[0, 360)`.
pub fn shift_hue(color: Rgb, degrees: f64) -> Rgb {
    let srgb: Srgb<f32> = color.to_srgb_f32();
    let hsl = Hsl::from_color(srgb);
    let shifted = hsl.shift_hue(degrees as f32);
    Rgb::from_srgb_f32(Srgb::from_color(shifted))
}

/// Multiplies lightness by `factor`, clamping to `[0, 1]`. Used by the
/// lighting transmission-shading stage to apply
/// per-cell brightness.
pub fn scale_lightness(color: Rgb, factor: f64) -> Rgb {
    let srgb: Srgb<f32> = color.to_srgb_f32();
    let hsl = Hsl::from_color(srgb);
    let scaled = Hsl::new(hsl.hue, hsl.saturation, (hsl.lightness as f64 * factor).clamp(0.0, 1.0) as f32);
    Rgb::from_srgb_f32(Srgb::from_color(scaled))
}

/// Boosts saturation by a multiplicative factor, clamping to `[0, 1]`.
/// Used by the glow layer.
pub fn boost_saturation(color: Rgb, factor: f64) -> Rgb {
    let srgb: Srgb<f32> = color.to_srgb_f32();
    let hsl = Hsl::from_color(srgb);
    let boosted = Hsl::new(hsl.hue, (hsl.saturation as f64 * factor).clamp(0.0, 1.0) as f32, hsl.lightness);
    Rgb::from_srgb_f32(Srgb::from_color(boosted))
}

/// Returns the HSL `(hue_degrees, saturation, lightness)` triple, used
/// by the ray-cluster vibrance ranking.
pub fn hsl_components(color: Rgb) -> (f64, f64, f64) {
    let srgb: Srgb<f32> = color.to_srgb_f32();
    let hsl = Hsl::from_color(srgb);
    (
        hsl.hue.into_positive_degrees() as f64,
        hsl.saturation as f64,
        hsl.lightness as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_adjustment_leaves_color_unchanged() {
        let c = Rgb::new(10, 200, 90);
        let adjusted = adjust_saturation_brightness(c, 1.0, 1.0);
        assert!((adjusted.r as i16 - c.r as i16).abs() <= 1);
        assert!((adjusted.g as i16 - c.g as i16).abs() <= 1);
        assert!((adjusted.b as i16 - c.b as i16).abs() <= 1);
    }

    #[test]
    fn zero_hue_shift_is_identity() {
        let c = Rgb::new(200, 30, 60);
        let shifted = shift_hue(c, 0.0);
        assert!((shifted.r as i16 - c.r as i16).abs() <= 1);
        assert!((shifted.g as i16 - c.g as i16).abs() <= 1);
        assert!((shifted.b as i16 - c.b as i16).abs() <= 1);
    }

    #[test]
    fn full_circle_hue_shift_is_near_identity() {
        let c = Rgb::new(200, 30, 60);
        let shifted = shift_hue(c, 360.0);
        assert!((shifted.r as i16 - c.r as i16).abs() <= 1);
        assert!((shifted.g as i16 - c.g as i16).abs() <= 1);
        assert!((shifted.b as i16 - c.b as i16).abs() <= 1);
    }

    #[test]
    fn grayscale_short_circuits_to_scaled_lightness() {
        let gray = Rgb::new(100, 100, 100);
        let adjusted = adjust_saturation_brightness(gray, 2.0, 1.0);
        assert_eq!(adjusted.r, adjusted.g);
        assert_eq!(adjusted.g, adjusted.b);
    }
}

// end of file
