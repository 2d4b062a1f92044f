//! Grid-based clustering of colored cells for ray generation
//!.

use std::collections::HashMap;

use crate::cells::CellCluster;
use crate::color::sample::ColoredCell;
use crate::geometry::{Point, Rect};

/// Buckets `cells` into a `g x g` grid over `image_rect`, where
/// `g = ceil(sqrt(2*ray_count))`. Each non-empty bucket becomes a
/// cluster centered on the bucket's geometric center, colored by the
/// mean RGB of its member cells.
pub fn build_clusters(cells: &[ColoredCell], image_rect: Rect, ray_count: u32) -> Vec<CellCluster> {
    if cells.is_empty() {
        return Vec::new();
    }
    let g = ((2.0 * ray_count as f64).sqrt().ceil() as usize).max(1);
    let cell_w = image_rect.size.width / g as f64;
    let cell_h = image_rect.size.height / g as f64;

    let mut buckets: HashMap<(usize, usize), Vec<&ColoredCell>> = HashMap::new();
    for cell in cells {
        let gx = (((cell.centroid.x - image_rect.min_x()) / cell_w) as usize).min(g - 1);
        let gy = (((cell.centroid.y - image_rect.min_y()) / cell_h) as usize).min(g - 1);
        buckets.entry((gx, gy)).or_default().push(cell);
    }

    let mut clusters: Vec<CellCluster> = buckets
        .into_iter()
        .map(|((gx, gy), members)| {
            let centroid = Point::new(
                image_rect.min_x() + (gx as f64 + 0.5) * cell_w,
                image_rect.min_y() + (gy as f64 + 0.5) * cell_h,
            );
            let n = members.len() as u64;
            let (mut sr, mut sg, mut sb) = (0u64, 0u64, 0u64);
            for m in &members {
                sr += m.color.r as u64;
                sg += m.color.g as u64;
                sb += m.color.b as u64;
            }
            CellCluster {
                centroid,
                color: crate::geometry::Rgb::new((sr / n) as u8, (sg / n) as u8, (sb / n) as u8),
            }
        })
        .collect();

    // deterministic ordering regardless of hash map iteration order
    clusters.sort_by(|a, b| {
        a.centroid
            .x
            .partial_cmp(&b.centroid.x)
            .unwrap()
            .then(a.centroid.y.partial_cmp(&b.centroid.y).unwrap())
    });
    clusters
}


// end of file
