//! Ridereel turns a chronological collection of GPS rides into a numbered PNG frame sequence.
//!
//! Each frame shows the track coverage recorded up to some moment, drawn over a background map
//! and labelled with the current ride and the cumulative distance. The entry points are:
//!
//! - Load rides through a [`TrackCorpus`] ([`JsonCorpus`] or [`MemoryCorpus`])
//! - Tune the run with a [`RenderConfig`]
//! - Call [`render_frames`] and inspect the returned [`RunReport`]
#![forbid(unsafe_code)]

/// Render-run tunables.
pub mod config;
/// Ride index, tracks and the flattened point stream.
pub mod corpus;
mod foundation;
/// Per-frame assembly and the worker scheduler.
pub mod frames;
/// Great-circle distance and the map projection.
pub mod geo;
/// Canvas, palettes and text.
pub mod render;

pub use crate::foundation::core::{Coordinate, FrameIndex, Rgba8};
pub use crate::foundation::error::{RideError, RideResult};

pub use crate::config::{FrameErrorPolicy, RenderConfig, RenderMode};
pub use crate::corpus::model::{Ride, RideIndex, Track};
pub use crate::corpus::store::{JsonCorpus, MemoryCorpus, TrackCorpus};
pub use crate::corpus::stream::PointStream;
pub use crate::frames::assembler::{DistanceAccumulator, FrameAssembler, FrameReport};
pub use crate::frames::pipeline::{RenderAssets, render_frames};
pub use crate::frames::scheduler::{FrameFailure, FrameScheduler, RunReport};
pub use crate::geo::distance::haversine_distance;
pub use crate::geo::projection::{BoundingBox, Projection};
pub use crate::render::canvas::Canvas;
pub use crate::render::text::TextStamper;
