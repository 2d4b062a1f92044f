//! The pipeline orchestrator: per-stage caching and cancellable runs.
//!
//! An `Arc<Mutex<RunState>>` plus an `Arc<AtomicBool>` stop flag guard a
//! worker thread that computes the pipeline and then updates the shared
//! state. Completion is reported through a plain `std::sync::mpsc`
//! channel — a run either finishes, is cancelled, or fails, and the
//! caller receives exactly one message.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::cells::FrameElement;
use crate::color::sample::ColoredCell;
use crate::comp::edge::{self, EdgeMap};
use crate::comp::seed;
use crate::comp::tessellate::{self, VoronoiCell};
use crate::error::Result;
use crate::frame;
use crate::geometry::Rect;
use crate::lighting;
use crate::pixel_buffer::PixelBuffer;
use crate::settings::{PointDistribution, Settings};
use crate::vector;

/// Pipeline stages in dependency order. Earlier stages
/// cascade: invalidating `B` also invalidates everything after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    B,
    Cd,
    E,
    F,
    H,
}

/// Determines the earliest stage that must be recomputed when settings
/// change from `old` to `new`. The
/// caller treats `None` as "nothing changed, the cached document is
/// still valid".
fn minimal_recompute_stage(old: &Settings, new: &Settings) -> Option<Stage> {
    if old.pre_blur != new.pre_blur
        || old.contrast != new.contrast
        || old.edge_method != new.edge_method
        || old.edge_sensitivity != new.edge_sensitivity
    {
        return Some(Stage::B);
    }
    if old.cell_count != new.cell_count
        || old.point_distribution != new.point_distribution
        || old.edge_influence != new.edge_influence
        || old.relaxation_iterations != new.relaxation_iterations
        || old.seed != new.seed
    {
        return Some(Stage::Cd);
    }
    if old.color_mode != new.color_mode
        || old.palette_size != new.palette_size
        || old.saturation != new.saturation
        || old.brightness != new.brightness
        || old.color_palette != new.color_palette
    {
        return Some(Stage::E);
    }
    if old.frame_style != new.frame_style
        || old.frame_width_percent != new.frame_width_percent
        || old.frame_cell_size != new.frame_cell_size
        || old.frame_color_palette != new.frame_color_palette
        || old.frame_hue_shift_degrees != new.frame_hue_shift_degrees
        || old.frame_saturation != new.frame_saturation
        || old.frame_brightness != new.frame_brightness
    {
        return Some(Stage::F);
    }
    if old.line_width != new.line_width || old.line_color != new.line_color || old.lighting != new.lighting {
        return Some(Stage::H);
    }
    None
}

/// The complete, externally useful product of one pipeline run: the
/// vector document and the colored cells an external renderer might
/// use directly.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub document: String,
    pub cells: Vec<ColoredCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Finished,
    Cancelled,
    Failed,
}

/// A message sent exactly once per run through the completion channel.
pub enum RunEvent {
    Finished(PipelineOutput),
    Cancelled,
    Failed(crate::error::PipelineError),
}

#[derive(Default)]
struct Cache {
    settings: Option<Settings>,
    edge_map: Option<EdgeMap>,
    voronoi_cells: Option<Vec<VoronoiCell>>,
    /// Stage E output: sampled, palette-mapped, saturation/brightness
    /// adjusted cells. Never touched by stage H — lighting reads this
    /// and writes its own shaded copy to `lit_cells`, so a
    /// stage-H-only recompute always re-lights the same unlit colors
    /// instead of compounding shading onto an already-shaded cache.
    colored_cells: Option<Vec<ColoredCell>>,
    frame: Option<(Vec<FrameElement>, Rect)>,
    /// Stage H output: `colored_cells` after `lighting::apply`.
    lit_cells: Option<Vec<ColoredCell>>,
    document: Option<String>,
}

/// Owns the pixel buffer and the per-stage caches, and runs the
/// pipeline on a worker thread with cooperative cancellation.
pub struct Orchestrator {
    pixels: Arc<PixelBuffer>,
    cache: Arc<Mutex<Cache>>,
    state: Arc<Mutex<RunState>>,
    stop_flag: Arc<AtomicBool>,
    thread_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Orchestrator {
    pub fn new(pixels: PixelBuffer) -> Self {
        Orchestrator {
            pixels: Arc::new(pixels),
            cache: Arc::new(Mutex::new(Cache::default())),
            state: Arc::new(Mutex::new(RunState::Idle)),
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: Mutex::new(None),
        }
    }

    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap()
    }

    /// Cancels any in-flight run and starts a new one from `settings`,
    /// returning a channel that receives exactly one `RunEvent` when the
    /// new run finishes, is cancelled, or fails.
    pub fn start(&self, settings: Settings) -> Receiver<RunEvent> {
        self.cancel_and_join();

        self.stop_flag.store(false, Ordering::Relaxed);
        *self.state.lock().unwrap() = RunState::Running;

        let (tx, rx) = mpsc::channel();
        let pixels = self.pixels.clone();
        let cache = self.cache.clone();
        let state = self.state.clone();
        let stop_flag = self.stop_flag.clone();
        let settings = settings.clamped();

        let handle = thread::spawn(move || {
            let outcome = run_cached(&pixels, &cache, &settings, &stop_flag);
            let event = match outcome {
                Ok(Some(output)) => RunEvent::Finished(output),
                Ok(None) => RunEvent::Cancelled,
                Err(e) => RunEvent::Failed(e),
            };
            *state.lock().unwrap() = match &event {
                RunEvent::Finished(_) => RunState::Finished,
                RunEvent::Cancelled => RunState::Cancelled,
                RunEvent::Failed(_) => RunState::Failed,
            };
            let _ = tx.send(event);
        });

        *self.thread_handle.lock().unwrap() = Some(handle);
        rx
    }

    /// Signals cancellation and blocks until the in-flight run (if any)
    /// observes it and exits.
    pub fn cancel_and_join(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        let handle = self.thread_handle.lock().unwrap().take();
        if let Some(handle) = handle {
            tracing::debug!("cancelling in-flight run");
            let _ = handle.join();
        }
    }
}

fn cancelled(stop_flag: &AtomicBool) -> bool {
    stop_flag.load(Ordering::Relaxed)
}

/// Runs (the necessary suffix of) the pipeline, consulting and updating
/// `cache`. Returns `Ok(None)` if cancelled before completion.
fn run_cached(
    pixels: &PixelBuffer,
    cache: &Mutex<Cache>,
    settings: &Settings,
    stop_flag: &AtomicBool,
) -> Result<Option<PipelineOutput>> {
    let mut cache = cache.lock().unwrap();

    let start_stage = match &cache.settings {
        None => Stage::B,
        Some(prev) => minimal_recompute_stage(prev, settings).unwrap_or(Stage::H),
    };
    let fully_cached = cache.settings.as_ref() == Some(settings) && cache.document.is_some();
    if fully_cached {
        tracing::debug!("settings unchanged, reusing cached document");
        return Ok(Some(PipelineOutput {
            document: cache.document.clone().unwrap(),
            cells: cache.lit_cells.clone().unwrap(),
        }));
    }
    tracing::debug!(?start_stage, "recomputing pipeline suffix");

    let image_rect = Rect::new(
        crate::geometry::Point::new(0.0, 0.0),
        crate::geometry::Size::new(pixels.width() as f64, pixels.height() as f64),
    );

    if start_stage <= Stage::B {
        let edge_map = edge::compute_edge_map(
            pixels,
            settings.pre_blur,
            settings.contrast,
            settings.edge_method,
            settings.edge_sensitivity,
        )?;
        cache.edge_map = Some(edge_map);
    }
    if cancelled(stop_flag) {
        return Ok(None);
    }

    if start_stage <= Stage::Cd {
        let edge_map = cache.edge_map.clone().expect("stage B always populates the edge map");
        let mut seeds = match settings.point_distribution {
            PointDistribution::Uniform => seed::uniform(image_rect, settings.cell_count, settings.seed),
            PointDistribution::Poisson => seed::poisson_disk(image_rect, settings.cell_count, settings.seed),
            PointDistribution::EdgeWeighted => seed::edge_weighted(
                image_rect,
                settings.cell_count,
                &edge_map,
                settings.edge_influence,
                settings.seed,
            ),
        };
        tessellate::lloyd_relax(&mut seeds.points, image_rect, settings.relaxation_iterations);
        let cells = tessellate::tessellate(&seeds.points, image_rect);
        cache.voronoi_cells = Some(cells);
    }
    if cancelled(stop_flag) {
        return Ok(None);
    }

    if start_stage <= Stage::E {
        let voronoi_cells = cache.voronoi_cells.clone().expect("stage C/D always populates cells");
        let use_average = matches!(settings.color_mode, crate::settings::ColorMode::Average);
        let mut colored = crate::color::sample::sample_raw_with_base(pixels, &voronoi_cells, use_average);
        if matches!(settings.color_mode, crate::settings::ColorMode::Palette) {
            crate::color::sample::quantize(&mut colored, settings.palette_size);
        }
        for cell in colored.iter_mut() {
            let mapped = crate::color::palette_data::map_to_palette(cell.color, settings.color_palette);
            cell.color = crate::color::hsl::adjust_saturation_brightness(mapped, settings.saturation, settings.brightness);
        }
        cache.colored_cells = Some(colored);
    }
    if cancelled(stop_flag) {
        return Ok(None);
    }

    if start_stage <= Stage::F {
        let (mut elements, inner) = frame::synthesize(
            pixels,
            settings.frame_style,
            settings.frame_width_percent,
            settings.frame_cell_size,
        );
        frame::post_process(
            &mut elements,
            settings.frame_color_palette,
            settings.frame_hue_shift_degrees,
            settings.frame_saturation,
            settings.frame_brightness,
        );
        cache.frame = Some((elements, inner));
    }
    if cancelled(stop_flag) {
        return Ok(None);
    }

    if start_stage <= Stage::H {
        let colored_cells = cache.colored_cells.clone().expect("stage E always populates colored cells");
        let (shaded, lighting_output) = lighting::apply(&colored_cells, image_rect, &settings.lighting, settings.seed);
        let (frame_elements, inner) = cache.frame.clone().expect("stage F always populates the frame");
        let document = vector::emit(
            pixels.width(),
            pixels.height(),
            settings,
            &frame_elements,
            inner,
            &shaded,
            &lighting_output.back_rays,
            &lighting_output.front_rays,
            &lighting_output.glow,
        );
        cache.lit_cells = Some(shaded);
        cache.document = Some(document);
    }

    cache.settings = Some(*settings);
    Ok(Some(PipelineOutput {
        document: cache.document.clone().unwrap(),
        cells: cache.lit_cells.clone().unwrap(),
    }))
}

/// Runs the pipeline to completion synchronously, bypassing the
/// orchestrator's cache and worker thread. Convenient for one-shot
/// callers and tests that don't need incremental recompute.
pub fn run_once(pixels: &PixelBuffer, settings: &Settings) -> Result<PipelineOutput> {
    let cache = Mutex::new(Cache::default());
    let stop_flag = AtomicBool::new(false);
    run_cached(pixels, &cache, &settings.clone().clamped(), &stop_flag)
        .map(|opt| opt.expect("a fresh, never-cancelled stop flag always completes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rgb;

    fn solid(w: u32, h: u32, rgb: Rgb) -> PixelBuffer {
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for _ in 0..(w * h) {
            data.extend_from_slice(&[rgb.r, rgb.g, rgb.b, 255]);
        }
        PixelBuffer::new(w, h, data)
    }

    #[test]
    fn run_once_produces_a_document_and_matching_cell_count() {
        let pixels = solid(20, 20, Rgb::new(10, 200, 30));
        let settings = Settings { cell_count: 50, frame_style: crate::settings::FrameStyle::None, ..Settings::default() };
        let output = run_once(&pixels, &settings).unwrap();
        assert!(output.document.starts_with("<svg"));
        assert!(!output.cells.is_empty());
    }

    #[test]
    fn orchestrator_caches_and_skips_recompute_for_identical_settings() {
        let pixels = solid(16, 16, Rgb::new(1, 2, 3));
        let orch = Orchestrator::new(pixels);
        let settings = Settings { cell_count: 50, ..Settings::default() };
        let rx1 = orch.start(settings);
        let ev1 = rx1.recv().unwrap();
        let doc1 = match ev1 {
            RunEvent::Finished(out) => out.document,
            _ => panic!("expected a finished run"),
        };
        let rx2 = orch.start(settings);
        let ev2 = rx2.recv().unwrap();
        let doc2 = match ev2 {
            RunEvent::Finished(out) => out.document,
            _ => panic!("expected a finished run"),
        };
        assert_eq!(doc1, doc2);
    }

    #[test]
    fn minimal_recompute_stage_detects_frame_only_changes() {
        let a = Settings::default();
        let b = Settings { frame_width_percent: a.frame_width_percent + 1.0, ..a };
        assert_eq!(minimal_recompute_stage(&a, &b), Some(Stage::F));
    }
}

// end of file
