//! Raster-to-stained-glass vector artwork pipeline.
//!
//! Consumes a decoded pixel buffer and a [`settings::Settings`] record
//! and produces a textual vector document plus an array of colored
//! cells, by way of edge detection, seed placement, Voronoi
//! tessellation, per-cell color sampling, decorative frame synthesis
//! and simulated light transmission. [`orchestrator::Orchestrator`]
//! ties the stages together with per-stage caching so a parameter
//! change recomputes only the minimal suffix of the pipeline.
//!
//! This crate has no opinion on how a host decodes the source image,
//! displays the resulting document, or persists settings — those are
//! external collaborators.

pub mod cells;
pub mod color;
pub mod comp;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lighting;
pub mod orchestrator;
pub mod pixel_buffer;
pub mod rng;
pub mod settings;
pub mod vector;

pub use error::{PipelineError, Result};
pub use orchestrator::{Orchestrator, PipelineOutput, RunEvent, RunState};
pub use pixel_buffer::PixelBuffer;
pub use settings::Settings;

// end of file
