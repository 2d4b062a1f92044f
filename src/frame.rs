//! Decorative frame synthesis.
//!
//! Plain sampling helpers over a `PixelBuffer`, composed with the
//! `color::hsl`/`color::palette_data` post-processing pipeline shared
//! with cell colors.

use crate::cells::FrameElement;
use crate::color::{hsl, palette_data};
use crate::geometry::{Point, Rect, Rgb};
use crate::pixel_buffer::PixelBuffer;
use crate::settings::{FrameStyle, NamedPalette};

/// Frame depth in pixels: `round(min(W,H) * percent/100)`.
pub fn frame_depth(width: u32, height: u32, percent: f64) -> u32 {
    ((width.min(height) as f64) * percent / 100.0).round() as u32
}

/// The inner artwork rectangle `[d, d, W-d, H-d]`, clamped so it never
/// inverts on a degenerate (very small or very deep) frame.
pub fn inner_rect(width: u32, height: u32, depth: u32) -> Rect {
    let d = (depth as f64).min(width as f64 / 2.0).min(height as f64 / 2.0);
    Rect::new(
        Point::new(d, d),
        crate::geometry::Size::new((width as f64 - 2.0 * d).max(0.0), (height as f64 - 2.0 * d).max(0.0)),
    )
}

fn mean_color(samples: &[Rgb]) -> Rgb {
    let n = samples.len() as u64;
    if n == 0 {
        return Rgb::BLACK;
    }
    let (mut sr, mut sg, mut sb) = (0u64, 0u64, 0u64);
    for c in samples {
        sr += c.r as u64;
        sg += c.g as u64;
        sb += c.b as u64;
    }
    Rgb::new((sr / n) as u8, (sg / n) as u8, (sb / n) as u8)
}

/// Mean color over a `size x size` neighborhood centered at `(cx, cy)`
/// (pixel coordinates, not clamped beforehand — `PixelBuffer::get_pixel`
/// clamps). Used for the segmented frame's 7x7 corner and edge-segment
/// sampling.
fn neighborhood_mean(pixels: &PixelBuffer, cx: f64, cy: f64, size: i64) -> Rgb {
    let half = size / 2;
    let cxi = cx.round() as i64;
    let cyi = cy.round() as i64;
    let mut samples = Vec::with_capacity((size * size) as usize);
    for dy in -half..=half {
        for dx in -half..=half {
            samples.push(pixels.get_pixel(cxi + dx, cyi + dy));
        }
    }
    mean_color(&samples)
}

fn edge_samples(pixels: &PixelBuffer, width: u32, height: u32, depth: u32, side: Side) -> Rgb {
    let w = width as f64;
    let h = height as f64;
    let inward = depth as f64 + 5.0;
    let mut samples = Vec::with_capacity(10);
    for i in 0..10 {
        let t = (i as f64 + 0.5) / 10.0;
        let (x, y) = match side {
            Side::Top => (t * w, inward),
            Side::Bottom => (t * w, h - inward),
            Side::Left => (inward, t * h),
            Side::Right => (w - inward, t * h),
        };
        samples.push(pixels.get_pixel(x.round() as i64, y.round() as i64));
    }
    mean_color(&samples)
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

fn simple_frame(pixels: &PixelBuffer, width: u32, height: u32, depth: u32) -> Vec<FrameElement> {
    let d = depth as f64;
    let w = width as f64;
    let h = height as f64;

    let top = FrameElement {
        polygon: vec![Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w - d, d), Point::new(d, d)],
        color: edge_samples(pixels, width, height, depth, Side::Top),
    };
    let right = FrameElement {
        polygon: vec![Point::new(w, 0.0), Point::new(w, h), Point::new(w - d, h - d), Point::new(w - d, d)],
        color: edge_samples(pixels, width, height, depth, Side::Right),
    };
    let bottom = FrameElement {
        polygon: vec![Point::new(w, h), Point::new(0.0, h), Point::new(d, h - d), Point::new(w - d, h - d)],
        color: edge_samples(pixels, width, height, depth, Side::Bottom),
    };
    let left = FrameElement {
        polygon: vec![Point::new(0.0, h), Point::new(0.0, 0.0), Point::new(d, d), Point::new(d, h - d)],
        color: edge_samples(pixels, width, height, depth, Side::Left),
    };
    vec![top, right, bottom, left]
}

fn segmented_frame(
    pixels: &PixelBuffer,
    width: u32,
    height: u32,
    depth: u32,
    cell_size: f64,
) -> Vec<FrameElement> {
    let d = depth as f64;
    let w = width as f64;
    let h = height as f64;
    let inward = d + 5.0;
    let s = cell_size.max(20.0);

    let mut elements = Vec::new();

    // corner squares, sampled at the diagonally-inward point near each
    // corner.
    let corners = [
        (Point::new(0.0, 0.0), Point::new(d, 0.0), Point::new(d, d), Point::new(0.0, d), (inward, inward)),
        (Point::new(w - d, 0.0), Point::new(w, 0.0), Point::new(w, d), Point::new(w - d, d), (w - inward, inward)),
        (Point::new(w - d, h - d), Point::new(w, h - d), Point::new(w, h), Point::new(w - d, h), (w - inward, h - inward)),
        (Point::new(0.0, h - d), Point::new(d, h - d), Point::new(d, h), Point::new(0.0, h), (inward, h - inward)),
    ];
    for (p0, p1, p2, p3, (sx, sy)) in corners {
        elements.push(FrameElement {
            polygon: vec![p0, p1, p2, p3],
            color: neighborhood_mean(pixels, sx, sy, 7),
        });
    }

    let inner_w = (w - 2.0 * d).max(0.0);
    let inner_h = (h - 2.0 * d).max(0.0);
    let n_h = ((inner_w / s).round() as i64).max(1);
    let n_v = ((inner_h / s).round() as i64).max(1);

    for i in 0..n_h {
        let x0 = d + inner_w * i as f64 / n_h as f64;
        let x1 = d + inner_w * (i + 1) as f64 / n_h as f64;
        let cx = (x0 + x1) / 2.0;
        elements.push(FrameElement {
            polygon: vec![Point::new(x0, 0.0), Point::new(x1, 0.0), Point::new(x1, d), Point::new(x0, d)],
            color: neighborhood_mean(pixels, cx, inward, 7),
        });
        elements.push(FrameElement {
            polygon: vec![Point::new(x0, h - d), Point::new(x1, h - d), Point::new(x1, h), Point::new(x0, h)],
            color: neighborhood_mean(pixels, cx, h - inward, 7),
        });
    }
    for i in 0..n_v {
        let y0 = d + inner_h * i as f64 / n_v as f64;
        let y1 = d + inner_h * (i + 1) as f64 / n_v as f64;
        let cy = (y0 + y1) / 2.0;
        elements.push(FrameElement {
            polygon: vec![Point::new(0.0, y0), Point::new(d, y0), Point::new(d, y1), Point::new(0.0, y1)],
            color: neighborhood_mean(pixels, inward, cy, 7),
        });
        elements.push(FrameElement {
            polygon: vec![Point::new(w - d, y0), Point::new(w, y0), Point::new(w, y1), Point::new(w - d, y1)],
            color: neighborhood_mean(pixels, w - inward, cy, 7),
        });
    }

    elements
}

/// Builds frame elements for `style`, returning both the elements and
/// the inner artwork rectangle. `none` returns no elements and the full
/// image rectangle.
pub fn synthesize(
    pixels: &PixelBuffer,
    style: FrameStyle,
    width_percent: f64,
    cell_size: f64,
) -> (Vec<FrameElement>, Rect) {
    let width = pixels.width();
    let height = pixels.height();
    if matches!(style, FrameStyle::None) {
        return (
            Vec::new(),
            Rect::new(Point::new(0.0, 0.0), crate::geometry::Size::new(width as f64, height as f64)),
        );
    }
    let depth = frame_depth(width, height, width_percent);
    let elements = match style {
        FrameStyle::None => unreachable!(),
        FrameStyle::Simple => simple_frame(pixels, width, height, depth),
        FrameStyle::Segmented => segmented_frame(pixels, width, height, depth, cell_size),
    };
    (elements, inner_rect(width, height, depth))
}

/// Applies the frame color post-processing pipeline in order: palette
/// map, then hue-shift, then saturation/brightness adjust.
pub fn post_process(
    elements: &mut [FrameElement],
    palette: NamedPalette,
    hue_shift_degrees: f64,
    saturation: f64,
    brightness: f64,
) {
    for element in elements.iter_mut() {
        let mapped = palette_data::map_to_palette(element.color, palette);
        let shifted = hsl::shift_hue(mapped, hue_shift_degrees);
        element.color = hsl::adjust_saturation_brightness(shifted, saturation, brightness);
    }
}


// end of file
