//! edge magnitude computation.
//!
//! Grayscale → Gaussian pre-blur → contrast → Sobel or Canny, producing
//! a normalized `[0, 1]` edge map of length `width * height`. Row-wise
//! passes are parallelized with `rayon`

use rayon::prelude::*;

use crate::error::{PipelineError, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::settings::EdgeMethod;

/// A normalized edge-magnitude map: `width * height` values in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl EdgeMap {
    fn index(&self, x: i64, y: i64) -> usize {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        cy * self.width as usize + cx
    }

    pub fn get(&self, x: i64, y: i64) -> f32 {
        self.values[self.index(x, y)]
    }
}

/// Rec. 601 luminance used for the grayscale conversion.
fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

fn grayscale(pixels: &PixelBuffer) -> Vec<f32> {
    let w = pixels.width() as usize;
    let h = pixels.height() as usize;
    let mut out = vec![0.0f32; w * h];
    out.par_iter_mut().enumerate().for_each(|(i, v)| {
        let x = (i % w) as i64;
        let y = (i / w) as i64;
        let p = pixels.get_pixel(x, y);
        *v = luminance(p.r, p.g, p.b);
    });
    out
}

/// Separable Gaussian blur with clamp-to-edge sampling. `radius <= 0`
/// is a no-op (kernel size collapses to 1).
fn gaussian_blur(data: &[f32], width: usize, height: usize, radius: f64) -> Vec<f32> {
    if radius <= 0.0 {
        return data.to_vec();
    }
    let sigma = radius / 2.0;
    let kernel_radius = radius.ceil() as i64;
    let kernel_size = (2 * kernel_radius + 1) as usize;
    let mut kernel = vec![0.0f64; kernel_size];
    let mut sum = 0.0;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as i64 - kernel_radius;
        let v = (-(x * x) as f64 / (2.0 * sigma * sigma)).exp();
        *k = v;
        sum += v;
    }
    for k in kernel.iter_mut() {
        *k /= sum;
    }

    let clamp_idx = |v: i64, max: i64| v.clamp(0, max - 1) as usize;

    // horizontal pass
    let mut horiz = vec![0.0f32; width * height];
    horiz
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = 0.0f64;
                for (i, k) in kernel.iter().enumerate() {
                    let sx = clamp_idx(x as i64 + i as i64 - kernel_radius, width as i64);
                    acc += *k * data[y * width + sx] as f64;
                }
                *out = acc as f32;
            }
        });

    // vertical pass
    let mut vert = vec![0.0f32; width * height];
    vert.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut acc = 0.0f64;
                for (i, k) in kernel.iter().enumerate() {
                    let sy = clamp_idx(y as i64 + i as i64 - kernel_radius, height as i64);
                    acc += *k * horiz[sy * width + x] as f64;
                }
                *out = acc as f32;
            }
        });
    vert
}

/// `out = clamp((in - 128) * c + 128, 0, 255)`.
fn apply_contrast(data: &mut [f32], contrast: f64) {
    data.par_iter_mut().for_each(|v| {
        *v = (((*v as f64 - 128.0) * contrast + 128.0).clamp(0.0, 255.0)) as f32;
    });
}

const SOBEL_GX: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_GY: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

fn sobel_gradients(data: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let mut gx = vec![0.0f32; width * height];
    let mut gy = vec![0.0f32; width * height];
    let get = |x: i64, y: i64| -> f32 {
        let cx = x.clamp(0, width as i64 - 1) as usize;
        let cy = y.clamp(0, height as i64 - 1) as usize;
        data[cy * width + cx]
    };
    gx.par_iter_mut()
        .zip(gy.par_iter_mut())
        .enumerate()
        .for_each(|(i, (ox, oy))| {
            let x = (i % width) as i64;
            let y = (i / width) as i64;
            let mut sx = 0.0f32;
            let mut sy = 0.0f32;
            for (ky, row) in SOBEL_GX.iter().enumerate() {
                for (kx, &wx) in row.iter().enumerate() {
                    let px = get(x + kx as i64 - 1, y + ky as i64 - 1);
                    sx += wx * px;
                    sy += SOBEL_GY[ky][kx] * px;
                }
            }
            *ox = sx;
            *oy = sy;
        });
    (gx, gy)
}

/// Sobel magnitude edge map: normalize by max, then zero below a
/// sensitivity-derived threshold.
fn sobel_edge_map(data: &[f32], width: usize, height: usize, sensitivity: f64) -> Vec<f32> {
    let (gx, gy) = sobel_gradients(data, width, height);
    let mut mag: Vec<f32> = gx
        .par_iter()
        .zip(gy.par_iter())
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();
    let max = mag.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        mag.par_iter_mut().for_each(|v| *v /= max);
    }
    let threshold = ((100.0 - sensitivity) / 100.0 * 0.3) as f32;
    mag.par_iter_mut().for_each(|v| {
        if *v < threshold {
            *v = 0.0;
        }
    });
    mag
}

/// Bins a gradient direction to the nearest of 0°/45°/90°/135°.
fn bin_direction(gx: f32, gy: f32) -> u8 {
    let mut angle = gy.atan2(gx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    if !(22.5..157.5).contains(&angle) {
        0
    } else if angle < 67.5 {
        45
    } else if angle < 112.5 {
        90
    } else {
        135
    }
}

/// Canny edge detection: Sobel gradients, non-maximum suppression binned
/// to 4 directions, then two-pass hysteresis. Output is
/// binary (0.0 or 1.0).
fn canny_edge_map(data: &[f32], width: usize, height: usize, sensitivity: f64) -> Vec<f32> {
    let (gx, gy) = sobel_gradients(data, width, height);
    let mag: Vec<f32> = gx
        .iter()
        .zip(gy.iter())
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();

    let at = |m: &[f32], x: i64, y: i64| -> f32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0.0
        } else {
            m[y as usize * width + x as usize]
        }
    };

    // non-maximum suppression
    let mut nms = vec![0.0f32; width * height];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let idx = y as usize * width + x as usize;
            let m = mag[idx];
            let dir = bin_direction(gx[idx], gy[idx]);
            let (dx, dy): (i64, i64) = match dir {
                0 => (1, 0),
                45 => (1, -1),
                90 => (0, 1),
                _ => (1, 1),
            };
            let n1 = at(&mag, x + dx, y + dy);
            let n2 = at(&mag, x - dx, y - dy);
            nms[idx] = if m >= n1 && m >= n2 { m } else { 0.0 };
        }
    }

    let low = (50.0 - 0.4 * sensitivity).max(5.0) as f32;
    let high = (100.0 - 0.7 * sensitivity).max(20.0) as f32;

    let mut strong = vec![false; width * height];
    let mut out = vec![0.0f32; width * height];
    for (i, &v) in nms.iter().enumerate() {
        if v >= high {
            strong[i] = true;
            out[i] = 1.0;
        }
    }

    // iteratively promote weak neighbors of strong pixels until stable
    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let idx = y as usize * width + x as usize;
                if out[idx] > 0.0 {
                    continue;
                }
                if nms[idx] < low {
                    continue;
                }
                let mut has_strong_neighbor = false;
                for ny in -1..=1i64 {
                    for nx in -1..=1i64 {
                        if nx == 0 && ny == 0 {
                            continue;
                        }
                        let px = x + nx;
                        let py = y + ny;
                        if px >= 0 && py >= 0 && px < width as i64 && py < height as i64 {
                            if strong[py as usize * width + px as usize] {
                                has_strong_neighbor = true;
                            }
                        }
                    }
                }
                if has_strong_neighbor {
                    out[idx] = 1.0;
                    strong[idx] = true;
                    changed = true;
                }
            }
        }
    }
    out
}

/// Computes the edge map for a pixel buffer given pre-blur radius,
/// contrast, method and sensitivity. Fails only for zero-area input.
pub fn compute_edge_map(
    pixels: &PixelBuffer,
    pre_blur: f64,
    contrast: f64,
    method: EdgeMethod,
    sensitivity: f64,
) -> Result<EdgeMap> {
    if pixels.is_empty() {
        return Err(PipelineError::EmptyImage {
            width: pixels.width(),
            height: pixels.height(),
        });
    }
    let width = pixels.width() as usize;
    let height = pixels.height() as usize;

    let gray = grayscale(pixels);
    let blurred = gaussian_blur(&gray, width, height, pre_blur);
    let mut contrasted = blurred;
    apply_contrast(&mut contrasted, contrast);

    let values = match method {
        EdgeMethod::Sobel => sobel_edge_map(&contrasted, width, height, sensitivity),
        EdgeMethod::Canny => canny_edge_map(&contrasted, width, height, sensitivity),
    };

    debug_assert_eq!(values.len(), width * height);
    Ok(EdgeMap {
        width: pixels.width(),
        height: pixels.height(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgb: (u8, u8, u8)) -> PixelBuffer {
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for _ in 0..(w * h) {
            data.extend_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
        }
        PixelBuffer::new(w, h, data)
    }

    #[test]
    fn edge_map_length_and_bound_hold_for_solid_image() {
        let pb = solid(10, 8, (120, 120, 120));
        let map = compute_edge_map(&pb, 0.0, 1.0, EdgeMethod::Sobel, 50.0).unwrap();
        assert_eq!(map.values.len(), 80);
        assert!(map.values.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn zero_area_image_is_an_error() {
        let pb = PixelBuffer::new(0, 0, vec![]);
        assert!(compute_edge_map(&pb, 0.0, 1.0, EdgeMethod::Sobel, 50.0).is_err());
    }

    // A vertical black line at x=5 in a 10x10 white image produces
    // Sobel edges concentrated in columns {4,5,6}, maximal at column 5.
    #[test]
    fn vertical_line_produces_centered_sobel_edge() {
        let w = 10u32;
        let h = 10u32;
        let mut data = vec![255u8; (w * h * 4) as usize];
        for y in 0..h {
            let idx = (y * w + 5) as usize * 4;
            data[idx] = 0;
            data[idx + 1] = 0;
            data[idx + 2] = 0;
        }
        let pb = PixelBuffer::new(w, h, data);
        let map = compute_edge_map(&pb, 0.0, 1.0, EdgeMethod::Sobel, 50.0).unwrap();

        let col_sum = |x: i64| -> f32 { (1..h as i64 - 1).map(|y| map.get(x, y)).sum() };
        let sums: Vec<f32> = (0..10).map(|x| col_sum(x)).collect();
        let max_col = (0..10).max_by(|&a, &b| sums[a].total_cmp(&sums[b])).unwrap();
        assert_eq!(max_col, 5);
        for x in 0..10 {
            if !(4..=6).contains(&x) {
                assert!(sums[x] <= sums[5] * 0.05 + 1e-6, "column {x} unexpectedly hot");
            }
        }
    }

    #[test]
    fn canny_output_is_binary() {
        let w = 16u32;
        let h = 16u32;
        let mut data = vec![255u8; (w * h * 4) as usize];
        for y in 0..h {
            for x in 8..w {
                let idx = (y * w + x) as usize * 4;
                data[idx] = 0;
                data[idx + 1] = 0;
                data[idx + 2] = 0;
            }
        }
        let pb = PixelBuffer::new(w, h, data);
        let map = compute_edge_map(&pb, 0.0, 1.0, EdgeMethod::Canny, 50.0).unwrap();
        assert!(map.values.iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(map.values.iter().any(|&v| v == 1.0));
    }
}

// end of file
