//! Computation algorithms that turn pixels into geometry: edge
//! magnitude, seed placement and Voronoi tessellation. Each module is a
//! pure function over its inputs, with no shared mutable state.

pub mod edge;
pub mod seed;
pub mod tessellate;

// end of file
