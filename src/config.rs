use std::path::Path;

use crate::corpus::store::read_json;
use crate::foundation::error::{RideError, RideResult};
use crate::geo::projection::PIXELS_PER_DEGREE;

/// How each frame draws the visible prefix of the point stream.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Redraw only the newest `points_to_draw` points, fading with age.
    #[default]
    TrailingWindow,
    /// Colour every visited pixel of the prefix by visit count.
    CumulativeHeatmap,
}

/// What a failed frame write does to the rest of the run.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FrameErrorPolicy {
    /// Log and record the failure, continue with the next frame.
    #[default]
    SkipFrame,
    /// Stop the failing worker; other workers finish their frames.
    AbortWorker,
    /// Stop every worker before its next frame and fail the run.
    AbortRun,
}

/// Tunables of a render run.
///
/// Loaded from JSON (all fields optional) and overridden by command-line flags.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Total number of frames.
    pub frames: usize,
    /// Worker pool size; frames are interleaved round-robin across workers.
    pub workers: usize,
    /// Trailing window length in points.
    pub points_to_draw: usize,
    /// Projection scale.
    pub pixels_per_degree: f64,
    /// Consecutive fixes further apart than this (meters) are treated as recording gaps.
    pub max_step_m: f64,
    /// Radius of the blended square drawn per point; `0` draws single pixels.
    pub point_radius: u32,
    /// Blank border around the projected area, in pixels.
    pub margin: u32,
    pub mode: RenderMode,
    pub on_frame_error: FrameErrorPolicy,
    pub font_size: f32,
    /// Labels start this many pixels left of the canvas's right edge.
    pub label_right_offset: u32,
    /// Baseline rows of the ride-name and distance labels.
    pub label_rows: [i64; 2],
    /// Decimal places of the kilometre label.
    pub distance_decimals: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frames: 500,
            workers: 10,
            points_to_draw: 5000,
            pixels_per_degree: PIXELS_PER_DEGREE,
            max_step_m: 10.0,
            point_radius: 0,
            margin: 50,
            mode: RenderMode::default(),
            on_frame_error: FrameErrorPolicy::default(),
            font_size: 48.0,
            label_right_offset: 300,
            label_rows: [100, 200],
            distance_decimals: 0,
        }
    }
}

impl RenderConfig {
    pub fn from_path(path: &Path) -> RideResult<Self> {
        let cfg: Self = read_json(path)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> RideResult<()> {
        if self.frames == 0 {
            return Err(RideError::validation("frames must be >= 1"));
        }
        if self.workers == 0 {
            return Err(RideError::validation("workers must be >= 1"));
        }
        if !self.pixels_per_degree.is_finite() || self.pixels_per_degree <= 0.0 {
            return Err(RideError::validation(
                "pixels_per_degree must be finite and > 0",
            ));
        }
        if self.max_step_m.is_nan() || self.max_step_m < 0.0 {
            return Err(RideError::validation("max_step_m must be >= 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(RideError::validation("font_size must be finite and > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
