use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{RenderConfig, RenderMode};
use crate::corpus::stream::PointStream;
use crate::foundation::core::{Coordinate, FrameIndex};
use crate::foundation::error::RideResult;
use crate::geo::distance::haversine_distance;
use crate::geo::projection::Projection;
use crate::render::canvas::Canvas;
use crate::render::palette::{heatmap_color, trail_color};
use crate::render::text::TextStamper;

/// Length of the point-stream prefix visible in frame `index` of `frames`.
///
/// Non-decreasing in `index`, and the last frame always shows all `points`.
pub fn prefix_len(index: usize, frames: usize, points: usize) -> usize {
    if frames == 0 {
        return points;
    }
    let scaled = (index as u128 + 1) * points as u128 / frames as u128;
    scaled.min(points as u128) as usize
}

/// Running distance total threaded through one worker's frames.
///
/// A plain value: each frame call takes it and hands back the advanced copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceAccumulator {
    total_m: f64,
    counted_until: usize,
    anomalies: usize,
}

impl Default for DistanceAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self {
            total_m: 0.0,
            counted_until: 1,
            anomalies: 0,
        }
    }

    pub fn total_m(&self) -> f64 {
        self.total_m
    }

    /// Steps skipped so far as non-finite or longer than the step limit.
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Adds every step `(j-1, j)` with `j < prefix_len` not counted yet; returns the distance
    /// added. Steps longer than `max_step_m` or non-finite are skipped.
    pub fn advance_to(
        &mut self,
        points: &[Coordinate],
        prefix_len: usize,
        max_step_m: f64,
    ) -> f64 {
        let end = prefix_len.min(points.len());
        let mut added = 0.0;
        for j in self.counted_until..end {
            let delta = haversine_distance(points[j - 1], points[j]);
            if !delta.is_finite() || delta > max_step_m {
                tracing::debug!(step = j, delta, "skipping step");
                self.anomalies += 1;
                continue;
            }
            added += delta;
        }
        self.counted_until = self.counted_until.max(end);
        self.total_m += added;
        added
    }
}

/// What a single rendered frame showed.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub index: FrameIndex,
    pub prefix_len: usize,
    pub ride_name: Option<String>,
    pub distance_m: f64,
    pub distance_label: String,
}

/// Formats meters as kilometres with `decimals` decimal places.
pub fn format_km(meters: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, meters / 1000.0)
}

/// Renders one frame: visible prefix, distance bookkeeping, drawing, labels, PNG output.
///
/// Holds only shared read-only state, so one assembler serves every worker.
pub struct FrameAssembler<'a> {
    stream: &'a PointStream,
    projection: Projection,
    extent: (u32, u32),
    background: &'a Canvas,
    stamper: Option<&'a TextStamper>,
    config: &'a RenderConfig,
    out_dir: &'a Path,
}

impl<'a> FrameAssembler<'a> {
    pub fn new(
        stream: &'a PointStream,
        projection: Projection,
        background: &'a Canvas,
        stamper: Option<&'a TextStamper>,
        config: &'a RenderConfig,
        out_dir: &'a Path,
    ) -> Self {
        Self {
            stream,
            extent: projection.extent(),
            projection,
            background,
            stamper,
            config,
            out_dir,
        }
    }

    /// Renders frame `index`, advancing `acc` by the distance revealed since that worker's
    /// previous frame. The accumulator is returned even when the frame fails to render.
    pub fn assemble(
        &self,
        index: FrameIndex,
        mut acc: DistanceAccumulator,
    ) -> (DistanceAccumulator, RideResult<FrameReport>) {
        let points = self.stream.points();
        let visible = prefix_len(index.0, self.config.frames, points.len());
        acc.advance_to(points, visible, self.config.max_step_m);

        let result = self.render(index, visible, acc.total_m());
        (acc, result)
    }

    fn render(
        &self,
        index: FrameIndex,
        visible: usize,
        distance_m: f64,
    ) -> RideResult<FrameReport> {
        let mut canvas = self.background.clone();
        match self.config.mode {
            RenderMode::TrailingWindow => self.draw_trail(&mut canvas, visible),
            RenderMode::CumulativeHeatmap => self.draw_heatmap(&mut canvas, visible),
        }

        let ride_name = self
            .stream
            .ride_at(visible.saturating_sub(1))
            .map(|r| r.name.clone());
        let distance_label = format_km(distance_m, self.config.distance_decimals);

        if let Some(stamper) = self.stamper {
            let x = i64::from(canvas.width()) - i64::from(self.config.label_right_offset);
            let [ride_row, dist_row] = self.config.label_rows;
            if let Some(name) = &ride_name {
                canvas.stamp_text(x, ride_row, &format!("Ride: {name}"), stamper)?;
            }
            canvas.stamp_text(x, dist_row, &format!("Dist: {distance_label}km"), stamper)?;
        }

        canvas.persist(&self.out_dir.join(index.file_name()))?;

        Ok(FrameReport {
            index,
            prefix_len: visible,
            ride_name,
            distance_m,
            distance_label,
        })
    }

    /// Newest `points_to_draw` points, oldest first. Non-finite fixes keep their rank but are not
    /// drawn.
    fn draw_trail(&self, canvas: &mut Canvas, visible: usize) {
        let window = self.config.points_to_draw;
        let start = visible.saturating_sub(window);
        for (rank, p) in self.stream.points()[start..visible].iter().enumerate() {
            if !p.is_finite() {
                continue;
            }
            canvas.composite_square(
                self.to_canvas(*p),
                trail_color(rank + 1, window),
                self.config.point_radius,
            );
        }
    }

    /// Every visited pixel of the prefix, coloured by visit count, in row-major order.
    fn draw_heatmap(&self, canvas: &mut Canvas, visible: usize) {
        let mut visits = BTreeMap::<(i64, i64), u32>::new();
        for p in self.stream.points()[..visible].iter().filter(|p| p.is_finite()) {
            let (x, y) = self.to_canvas(*p);
            *visits.entry((y, x)).or_default() += 1;
        }
        for ((y, x), n) in visits {
            canvas.composite_square((x, y), heatmap_color(n), self.config.point_radius);
        }
    }

    /// Projected point in canvas pixels; north is up.
    fn to_canvas(&self, p: Coordinate) -> (i64, i64) {
        let (w, h) = self.extent;
        let (x, y) = self.projection.project(p, w, h);
        let margin = i64::from(self.config.margin);
        (margin + i64::from(x), margin + i64::from(h) - i64::from(y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/assembler.rs"]
mod tests;
