//! Data types shared by the frame and lighting stages that don't belong
//! to any single component module.

use crate::geometry::{Point, Rgb};

/// A frame polygon plus its sampled color. Frame
/// elements together tile the annulus between the image border and the
/// inner artwork rectangle without gaps or overlaps.
#[derive(Debug, Clone)]
pub struct FrameElement {
    pub polygon: Vec<Point>,
    pub color: Rgb,
}

/// A grid bucket of cells used only by ray generation.
#[derive(Debug, Clone)]
pub struct CellCluster {
    pub centroid: Point,
    pub color: Rgb,
}

/// One "god ray" trapezoid.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    pub direction_radians: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub base_width: f64,
    pub length: f64,
}

// end of file
