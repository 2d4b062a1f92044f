//! seed-point generation.
//!
//! All three strategies take the target rectangle, a requested count,
//! and produce exactly that many points strictly within the rectangle.
//! Randomness is drawn from an RNG seeded per `crate::rng`, so runs with
//! the same settings reproduce the same seed set.

use rand::Rng;
use rand::rngs::StdRng;

use crate::comp::edge::EdgeMap;
use crate::geometry::{Point, Rect};
use crate::rng::{RngPurpose, rng_for};

/// An ordered sequence of seed points, mutated in place only by Lloyd
/// relaxation.
#[derive(Debug, Clone)]
pub struct SeedPoints {
    pub points: Vec<Point>,
}

fn uniform_points(rect: Rect, count: u32, rng: &mut StdRng) -> Vec<Point> {
    (0..count)
        .map(|_| {
            Point::new(
                rng.random_range(rect.min_x()..rect.max_x()),
                rng.random_range(rect.min_y()..rect.max_y()),
            )
        })
        .collect()
}

/// Generates uniformly-random seed points over `rect`.
pub fn uniform(rect: Rect, count: u32, seed: u64) -> SeedPoints {
    let mut rng = rng_for(seed, RngPurpose::PoissonDisk);
    SeedPoints {
        points: uniform_points(rect, count, &mut rng),
    }
}

/// Bridson's Poisson-disk sampling.
pub fn poisson_disk(rect: Rect, count: u32, seed: u64) -> SeedPoints {
    let mut rng = rng_for(seed, RngPurpose::PoissonDisk);
    if count == 0 {
        return SeedPoints { points: vec![] };
    }
    let area = rect.size.width * rect.size.height;
    let r = 0.8 * (area / (std::f64::consts::PI * count as f64)).sqrt();
    let cell = r / std::f64::consts::SQRT_2;
    let grid_w = ((rect.size.width / cell).ceil() as usize).max(1);
    let grid_h = ((rect.size.height / cell).ceil() as usize).max(1);
    let mut grid: Vec<Option<usize>> = vec![None; grid_w * grid_h];

    let mut points: Vec<Point> = Vec::new();
    let mut active: Vec<usize> = Vec::new();

    let grid_index = |p: Point| -> (usize, usize) {
        let gx = (((p.x - rect.min_x()) / cell) as usize).min(grid_w - 1);
        let gy = (((p.y - rect.min_y()) / cell) as usize).min(grid_h - 1);
        (gx, gy)
    };

    let first = Point::new(
        rng.random_range(rect.min_x()..rect.max_x()),
        rng.random_range(rect.min_y()..rect.max_y()),
    );
    points.push(first);
    active.push(0);
    let (gx, gy) = grid_index(first);
    grid[gy * grid_w + gx] = Some(0);

    let far_enough = |p: Point, points: &[Point], grid: &[Option<usize>]| -> bool {
        let (gx, gy) = grid_index(p);
        let x0 = gx.saturating_sub(2);
        let x1 = (gx + 2).min(grid_w - 1);
        let y0 = gy.saturating_sub(2);
        let y1 = (gy + 2).min(grid_h - 1);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(idx) = grid[cy * grid_w + cx] {
                    let q = points[idx];
                    let d = (p - q).length();
                    if d < r {
                        return false;
                    }
                }
            }
        }
        true
    };

    while !active.is_empty() && points.len() < (2 * count as usize).max(1) {
        let active_idx = rng.random_range(0..active.len());
        let base = points[active[active_idx]];
        let mut accepted = None;
        for _ in 0..30 {
            let dist = rng.random_range(r..2.0 * r);
            let angle = rng.random_range(0.0..std::f64::consts::TAU);
            let candidate = Point::new(base.x + dist * angle.cos(), base.y + dist * angle.sin());
            if candidate.x < rect.min_x()
                || candidate.x >= rect.max_x()
                || candidate.y < rect.min_y()
                || candidate.y >= rect.max_y()
            {
                continue;
            }
            if far_enough(candidate, &points, &grid) {
                accepted = Some(candidate);
                break;
            }
        }
        match accepted {
            Some(p) => {
                let idx = points.len();
                points.push(p);
                let (gx, gy) = grid_index(p);
                grid[gy * grid_w + gx] = Some(idx);
                active.push(idx);
            }
            None => {
                active.swap_remove(active_idx);
            }
        }
    }

    // truncate or top up with uniform random to reach exactly `count`
    points.truncate(count as usize);
    if points.len() < count as usize {
        let missing = count as usize - points.len();
        points.extend(uniform_points(rect, missing as u32, &mut rng));
    }
    SeedPoints { points }
}

/// Edge-weighted sampling via prefix-sum inverse-CDF draw. `edge_map` is addressed in full-image coordinates; `rect` may
/// be a clip-rectangle offset into the full image, in which case emitted
/// points are translated into `rect`'s coordinate system.
pub fn edge_weighted(
    rect: Rect,
    count: u32,
    edge_map: &EdgeMap,
    influence: f64,
    seed: u64,
) -> SeedPoints {
    let mut rng = rng_for(seed, RngPurpose::EdgeWeightedJitter);
    let w = edge_map.width as usize;
    let h = edge_map.height as usize;
    if w == 0 || h == 0 || count == 0 {
        return SeedPoints { points: vec![] };
    }

    let mut prefix = Vec::with_capacity(w * h);
    let mut total = 0.0f64;
    for &e in &edge_map.values {
        let weight = (1.0 - influence) + influence * (e as f64 + 0.1);
        total += weight;
        prefix.push(total);
    }

    let mut points = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let u = rng.random_range(0.0..total);
        let idx = match prefix.binary_search_by(|probe| probe.partial_cmp(&u).unwrap()) {
            Ok(i) => i,
            Err(i) => i.min(prefix.len() - 1),
        };
        let px = (idx % w) as f64;
        let py = (idx / w) as f64;
        let jx = rng.random_range(-0.5..0.5);
        let jy = rng.random_range(-0.5..0.5);
        let x = (px + jx).clamp(0.0, w as f64 - 1.0);
        let y = (py + jy).clamp(0.0, h as f64 - 1.0);
        // translate from full-image coordinates into the clip rectangle
        points.push(Point::new(
            (rect.min_x() + x).clamp(rect.min_x(), rect.max_x() - 1e-9),
            (rect.min_y() + y).clamp(rect.min_y(), rect.max_y() - 1e-9),
        ));
    }
    SeedPoints { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{Point2D, Rect as EuclidRect, Size2D};

    fn rect(w: f64, h: f64) -> Rect {
        EuclidRect::new(Point2D::new(0.0, 0.0), Size2D::new(w, h))
    }

    #[test]
    fn uniform_yields_exact_count_and_stays_in_bounds() {
        let r = rect(100.0, 80.0);
        let seeds = uniform(r, 200, 7);
        assert_eq!(seeds.points.len(), 200);
        for p in &seeds.points {
            assert!(r.contains(*p));
        }
    }

    #[test]
    fn poisson_disk_yields_exact_count_and_min_distance() {
        let r = rect(200.0, 200.0);
        let count = 120;
        let seeds = poisson_disk(r, count, 1);
        assert_eq!(seeds.points.len(), count as usize);
        let area = 200.0 * 200.0;
        let min_dist = 0.8 * (area / (std::f64::consts::PI * count as f64)).sqrt();
        // jitter from the uniform top-up means a handful of pairs may
        // fall slightly under r; check the vast majority respect it.
        let mut violations = 0;
        for i in 0..seeds.points.len() {
            for j in (i + 1)..seeds.points.len() {
                if (seeds.points[i] - seeds.points[j]).length() < min_dist * 0.99 {
                    violations += 1;
                }
            }
        }
        assert!(violations < seeds.points.len() / 4, "{violations} violations");
    }

    #[test]
    fn edge_weighted_with_zero_influence_is_uniform_like() {
        let w = 10u32;
        let h = 10u32;
        let edge_map = EdgeMap {
            width: w,
            height: h,
            values: vec![1.0; (w * h) as usize],
        };
        let r = rect(w as f64, h as f64);
        let seeds = edge_weighted(r, 500, &edge_map, 0.0, 3);
        assert_eq!(seeds.points.len(), 500);
        // tile into 5x5 halves and check rough uniformity
        let mut tile_counts = [0u32; 4];
        for p in &seeds.points {
            let tx = if p.x < 5.0 { 0 } else { 1 };
            let ty = if p.y < 5.0 { 0 } else { 1 };
            tile_counts[ty * 2 + tx] += 1;
        }
        for c in tile_counts {
            assert!((100..=200).contains(&c), "tile count {c} too skewed");
        }
    }

    #[test]
    fn edge_weighted_respects_clip_rect_offset() {
        let w = 10u32;
        let h = 10u32;
        let mut values = vec![0.01f32; (w * h) as usize];
        values[55] = 1.0; // column 5, row 5
        let edge_map = EdgeMap { width: w, height: h, values };
        let clip = EuclidRect::new(Point2D::new(100.0, 200.0), Size2D::new(10.0, 10.0));
        let seeds = edge_weighted(clip, 50, &edge_map, 1.0, 9);
        for p in &seeds.points {
            assert!(p.x >= 100.0 && p.x < 110.0);
            assert!(p.y >= 200.0 && p.y < 210.0);
        }
    }
}

// end of file
