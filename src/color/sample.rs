//! Per-cell color sampling and k-means palette quantization.

use rayon::prelude::*;

use crate::comp::tessellate::VoronoiCell;
use crate::geometry::{Point, Rgb};
use crate::pixel_buffer::PixelBuffer;
use crate::settings::ColorMode;

/// A cell polygon with its sampled fill color.
#[derive(Debug, Clone)]
pub struct ColoredCell {
    pub index: usize,
    pub polygon: Vec<Point>,
    pub centroid: Point,
    pub color: Rgb,
}

/// Ray-casting point-in-polygon test, testing the pixel-center
/// convention `(x+0.5, y+0.5)` used by average sampling.
fn point_in_polygon(polygon: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if ((pi.y > y) != (pj.y > y))
            && (x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn exact_sample(pixels: &PixelBuffer, centroid: Point) -> Rgb {
    pixels.get_pixel(centroid.x.round() as i64, centroid.y.round() as i64)
}

/// Mean color over the polygon's bounding box, counting only pixels
/// whose center lies inside the polygon. Falls back to `exact_sample`
/// if the intersection is empty.
fn average_sample(pixels: &PixelBuffer, polygon: &[Point], centroid: Point) -> Rgb {
    let min_x = polygon.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_x = polygon.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;
    let min_y = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_y = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;

    let (mut sr, mut sg, mut sb, mut count) = (0u64, 0u64, 0u64, 0u64);
    for y in min_y..max_y {
        for x in min_x..max_x {
            let cx = x as f64 + 0.5;
            let cy = y as f64 + 0.5;
            if point_in_polygon(polygon, cx, cy) {
                let p = pixels.get_pixel(x, y);
                sr += p.r as u64;
                sg += p.g as u64;
                sb += p.b as u64;
                count += 1;
            }
        }
    }
    if count == 0 {
        return exact_sample(pixels, centroid);
    }
    Rgb::new(
        (sr / count) as u8,
        (sg / count) as u8,
        (sb / count) as u8,
    )
}

/// Samples raw per-cell colors using `exact` or `average` mode. This is
/// the "start from exact/average per cell" step that precedes k-means
/// quantization when `color_mode == Palette`.
pub fn sample_raw(pixels: &PixelBuffer, cells: &[VoronoiCell], mode: ColorMode) -> Vec<ColoredCell> {
    cells
        .par_iter()
        .map(|cell| {
            let color = match mode {
                ColorMode::Exact | ColorMode::Palette => exact_sample(pixels, cell.centroid),
                ColorMode::Average => average_sample(pixels, &cell.polygon, cell.centroid),
            };
            ColoredCell {
                index: cell.index,
                polygon: cell.polygon.clone(),
                centroid: cell.centroid,
                color,
            }
        })
        .collect()
}

/// Samples raw colors using `exact` or `average` consistently (used
/// internally so `Palette` mode can choose its own base sampling
/// strategy independent of `Exact`/`Average` selection upstream).
pub fn sample_raw_with_base(
    pixels: &PixelBuffer,
    cells: &[VoronoiCell],
    use_average: bool,
) -> Vec<ColoredCell> {
    sample_raw(
        pixels,
        cells,
        if use_average { ColorMode::Average } else { ColorMode::Exact },
    )
}

fn squared_rgb_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// K-means quantization of cell colors to `k` centroids: centroid init
/// by even stride through input colors, 10 iterations, squared-RGB
/// distance. Each cell's color becomes its nearest centroid. A no-op
/// when there are no cells or `k == 0`.
pub fn quantize(cells: &mut [ColoredCell], k: u32) {
    let k = k as usize;
    if cells.is_empty() || k == 0 {
        return;
    }
    let k = k.min(cells.len());
    let stride = cells.len() as f64 / k as f64;
    let mut centroids: Vec<Rgb> = (0..k)
        .map(|i| cells[((i as f64 * stride) as usize).min(cells.len() - 1)].color)
        .collect();

    let mut assignment = vec![0usize; cells.len()];
    for _ in 0..10 {
        for (i, cell) in cells.iter().enumerate() {
            let mut best = 0;
            let mut best_dist = u32::MAX;
            for (ci, c) in centroids.iter().enumerate() {
                let d = squared_rgb_distance(cell.color, *c);
                if d < best_dist {
                    best_dist = d;
                    best = ci;
                }
            }
            assignment[i] = best;
        }
        for (ci, centroid) in centroids.iter_mut().enumerate() {
            let (mut sr, mut sg, mut sb, mut count) = (0u64, 0u64, 0u64, 0u64);
            for (i, cell) in cells.iter().enumerate() {
                if assignment[i] == ci {
                    sr += cell.color.r as u64;
                    sg += cell.color.g as u64;
                    sb += cell.color.b as u64;
                    count += 1;
                }
            }
            if count > 0 {
                *centroid = Rgb::new(
                    (sr / count) as u8,
                    (sg / count) as u8,
                    (sb / count) as u8,
                );
            }
        }
    }
    for (i, cell) in cells.iter_mut().enumerate() {
        cell.color = centroids[assignment[i]];
    }
}


// end of file
