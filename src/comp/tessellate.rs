//! Delaunay/Voronoi tessellation and Lloyd relaxation.
//!
//! Tessellation itself is grounded on the `voronoice` crate (see
//! DESIGN.md). Lloyd relaxation's specific partial-movement rule
//! (`p' = 0.3*p + 0.7*centroid`) isn't something the crate's own
//! relaxation option exposes, so we drive it ourselves: build once per
//! pass, compute each surviving cell's centroid, move its seed, repeat.

use voronoice::{BoundingBox, Point as VPoint, VoronoiBuilder};

use crate::geometry::{Point, Rect};

/// One cell of the tessellation: its position in the seed array, its
/// polygon (closed, ≥3 vertices), and its centroid.
#[derive(Debug, Clone)]
pub struct VoronoiCell {
    pub index: usize,
    pub polygon: Vec<Point>,
    pub centroid: Point,
}

fn to_vpoint(p: Point) -> VPoint {
    VPoint { x: p.x, y: p.y }
}

fn from_vpoint(p: &VPoint) -> Point {
    Point::new(p.x, p.y)
}

fn build(points: &[Point], rect: Rect) -> Option<voronoice::Voronoi> {
    if points.len() < 2 {
        return None;
    }
    let sites: Vec<VPoint> = points.iter().map(|p| to_vpoint(*p)).collect();
    let center = VPoint {
        x: rect.min_x() + rect.size.width / 2.0,
        y: rect.min_y() + rect.size.height / 2.0,
    };
    VoronoiBuilder::default()
        .set_sites(sites)
        .set_bounding_box(BoundingBox::new(center, rect.size.width, rect.size.height))
        .set_lloyd_relaxation_iterations(0)
        .build()
}

/// Distinct-vertex count, ignoring near-duplicate points produced by
/// clipping.
fn distinct_vertex_count(polygon: &[Point]) -> usize {
    const EPS: f64 = 1e-9;
    let mut distinct: Vec<Point> = Vec::new();
    for &p in polygon {
        if !distinct.iter().any(|&q| (p - q).length() < EPS) {
            distinct.push(p);
        }
    }
    distinct.len()
}

/// Shoelace-formula centroid of a simple polygon.
fn polygon_centroid(polygon: &[Point]) -> Point {
    let n = polygon.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p0 = polygon[i];
        let p1 = polygon[(i + 1) % n];
        let cross = p0.x * p1.y - p1.x * p0.y;
        area2 += cross;
        cx += (p0.x + p1.x) * cross;
        cy += (p0.y + p1.y) * cross;
    }
    if area2.abs() < 1e-12 {
        // degenerate: fall back to the arithmetic mean
        let mx = polygon.iter().map(|p| p.x).sum::<f64>() / n as f64;
        let my = polygon.iter().map(|p| p.y).sum::<f64>() / n as f64;
        return Point::new(mx, my);
    }
    let area = area2 / 2.0;
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Builds the Voronoi tessellation of `points` clipped to `rect`.
/// Degenerate cells (fewer than 3 distinct vertices) are dropped
/// silently; cell ordering matches seed ordering of surviving cells.
pub fn tessellate(points: &[Point], rect: Rect) -> Vec<VoronoiCell> {
    let Some(voronoi) = build(points, rect) else {
        return Vec::new();
    };
    let mut cells = Vec::with_capacity(points.len());
    for (seed_index, cell) in voronoi.iter_cells().enumerate() {
        let polygon: Vec<Point> = cell.iter_vertices().map(from_vpoint).collect();
        if distinct_vertex_count(&polygon) < 3 {
            continue;
        }
        let centroid = polygon_centroid(&polygon);
        cells.push(VoronoiCell {
            index: cells.len(),
            polygon,
            centroid,
        });
        let _ = seed_index;
    }
    cells
}

/// Runs `iterations` passes of Lloyd relaxation on `points`, clipped to
/// `rect`, in place. Each pass: tessellate, then set
/// `p' = 0.3*p + 0.7*centroid(cell)` for every seed whose cell survived;
/// seeds whose cell was dropped are left unchanged.
pub fn lloyd_relax(points: &mut [Point], rect: Rect, iterations: u32) {
    for _ in 0..iterations {
        let Some(voronoi) = build(points, rect) else {
            return;
        };
        for (i, cell) in voronoi.iter_cells().enumerate() {
            let polygon: Vec<Point> = cell.iter_vertices().map(from_vpoint).collect();
            if distinct_vertex_count(&polygon) < 3 {
                continue;
            }
            let centroid = polygon_centroid(&polygon);
            points[i] = Point::new(
                0.3 * points[i].x + 0.7 * centroid.x,
                0.3 * points[i].y + 0.7 * centroid.y,
            );
        }
    }
}


// end of file
