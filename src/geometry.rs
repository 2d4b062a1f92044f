//! Typed geometry for the image plane.
//!
//! Every coordinate in the pipeline lives in pixel space relative to the
//! source image. We tag it with a phantom unit, `ImageSpace`, the way the
//! teacher crate tags its own coordinate systems (`MathSpace`,
//! `StageSpace` in the original `storage::coord_spaces`) so a point
//! cannot accidentally be mixed up with an untagged float pair.

use euclid::{Point2D, Rect as EuclidRect, Size2D, Vector2D};

/// Marker unit for coordinates measured in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSpace;

/// A point in image pixel coordinates.
pub type Point = Point2D<f64, ImageSpace>;
/// A displacement in image pixel coordinates.
pub type Vector = Vector2D<f64, ImageSpace>;
/// A size in image pixel coordinates.
pub type Size = Size2D<f64, ImageSpace>;
/// An axis-aligned rectangle in image pixel coordinates.
pub type Rect = EuclidRect<f64, ImageSpace>;

/// An 8-bit RGB color, as sampled from the source image or computed by a
/// coloring stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses a `#rrggbb` hex string. Returns `None` on malformed input.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb::new(r, g, b))
    }

    /// Formats as a `#rrggbb` hex string, lowercase, as emitted into the
    /// vector document.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to `palette`'s floating-point sRGB representation for
    /// color-space math (HSL adjustment, mixing, distance).
    pub fn to_srgb_f32(&self) -> palette::Srgb<f32> {
        palette::Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    pub fn from_srgb_f32(c: palette::Srgb<f32>) -> Rgb {
        Rgb::new(
            (c.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

/// Clamps a point to lie within (and on the border of) a rectangle.
pub fn clamp_point_to_rect(p: Point, rect: Rect) -> Point {
    Point::new(
        p.x.clamp(rect.min_x(), rect.max_x()),
        p.y.clamp(rect.min_y(), rect.max_y()),
    )
}


// end of file
