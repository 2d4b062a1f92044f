//! Error type for the stained-glass pipeline.
//!
//! Most failure modes are recovered locally (empty intersection falls
//! back to a center sample, a degenerate polygon is dropped) and never
//! reach this type. `PipelineError` only covers the two cases that must
//! be reported to the orchestrator's caller: undecodable/zero-area
//! input, and a run-level failure that isn't a local recovery.
//! Cancellation is deliberately not an error variant — see
//! `crate::orchestrator::RunEvent`.

use thiserror::Error;

/// Errors that can be returned by pipeline stage entry points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The pixel buffer has zero width or zero height.
    #[error("pixel buffer has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// `cell_count` (or another required count) was zero after clamping.
    #[error("requested zero seed points")]
    ZeroSeedCount,

    /// A stage-level failure that isn't locally recoverable, carrying a
    /// descriptive message reported to the orchestrator's caller.
    #[error("pipeline run failed: {0}")]
    RunFailed(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;


// end of file
