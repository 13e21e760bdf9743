use std::path::Path;

use image::RgbaImage;

use crate::config::RenderConfig;
use crate::corpus::store::TrackCorpus;
use crate::corpus::stream::PointStream;
use crate::foundation::error::{RideError, RideResult};
use crate::frames::assembler::FrameAssembler;
use crate::frames::scheduler::{FrameScheduler, RunReport};
use crate::geo::projection::Projection;
use crate::render::canvas::Canvas;
use crate::render::text::TextStamper;

/// Largest side of a canvas sized from the projection alone.
pub const MAX_BLANK_DIM: u32 = 1 << 16;

/// Read-only inputs loaded once before any frame is rendered.
#[derive(Default)]
pub struct RenderAssets {
    /// Map image every frame starts from; `None` renders onto blank white.
    pub background: Option<RgbaImage>,
    /// Label font; `None` renders frames without labels.
    pub stamper: Option<TextStamper>,
}

/// Renders `config.frames` frames of `corpus` into `out_dir`.
///
/// Pipeline:
/// 1. [`PointStream::build`]
/// 2. [`Projection`] over the stream's bounding box
/// 3. [`FrameScheduler::run`] with one shared [`FrameAssembler`]
///
/// Returns once every worker has joined.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.display()))]
pub fn render_frames(
    corpus: &dyn TrackCorpus,
    assets: &RenderAssets,
    out_dir: &Path,
    config: &RenderConfig,
) -> RideResult<RunReport> {
    config.validate()?;

    let stream = PointStream::build(corpus)?;
    if stream.is_empty() {
        return Err(RideError::corpus("no ride has a usable track"));
    }
    let projection = Projection::new(stream.bounding_box()?, config.pixels_per_degree);
    let (w, h) = projection.extent();
    let needed = (
        w.saturating_add(config.margin.saturating_mul(2)),
        h.saturating_add(config.margin.saturating_mul(2)),
    );

    let background = match &assets.background {
        Some(img) => {
            if img.width() < needed.0 || img.height() < needed.1 {
                tracing::warn!(
                    background = ?img.dimensions(),
                    needed = ?needed,
                    "background smaller than projected area, points will be clipped"
                );
            }
            Canvas::from_background(img)
        }
        None => {
            if needed.0 > MAX_BLANK_DIM || needed.1 > MAX_BLANK_DIM {
                return Err(RideError::validation(format!(
                    "projected area {}x{} exceeds {MAX_BLANK_DIM}px per side; \
                     lower pixels_per_degree or supply a background",
                    needed.0, needed.1
                )));
            }
            Canvas::blank(needed.0, needed.1)
        }
    };
    tracing::info!(
        width = background.width(),
        height = background.height(),
        points = stream.len(),
        "canvas ready"
    );

    std::fs::create_dir_all(out_dir).map_err(|e| RideError::io(out_dir, e))?;

    let assembler = FrameAssembler::new(
        &stream,
        projection,
        &background,
        assets.stamper.as_ref(),
        config,
        out_dir,
    );
    FrameScheduler::new(config.workers, config.on_frame_error)?.run(&assembler, config.frames)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/pipeline.rs"]
mod tests;
