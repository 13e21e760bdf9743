use std::path::Path;

use crate::corpus::model::{Ride, RideIndex, Track};
use crate::corpus::store::read_json;
use crate::foundation::error::RideResult;
use crate::geo::distance::{cosine_law_distance, haversine_distance};

/// Aggregate figures over a ride index.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CorpusStats {
    pub rides: usize,
    pub total_distance_m: f64,
    pub total_moving_time_s: f64,
    /// Total distance over total moving time.
    pub overall_speed_kmh: f64,
    /// Mean of per-ride speeds, over rides with a non-zero moving time.
    pub mean_ride_speed_kmh: f64,
}

impl CorpusStats {
    pub fn from_rides(rides: &[Ride]) -> Self {
        let total_distance_m: f64 = rides.iter().map(|r| r.distance_m).sum();
        let total_moving_time_s: f64 = rides.iter().map(|r| r.moving_time_s).sum();

        let speeds: Vec<f64> = rides
            .iter()
            .filter(|r| r.moving_time_s > 0.0)
            .map(|r| kmh(r.distance_m, r.moving_time_s))
            .collect();
        let mean_ride_speed_kmh = if speeds.is_empty() {
            0.0
        } else {
            speeds.iter().sum::<f64>() / speeds.len() as f64
        };

        Self {
            rides: rides.len(),
            total_distance_m,
            total_moving_time_s,
            overall_speed_kmh: if total_moving_time_s > 0.0 {
                kmh(total_distance_m, total_moving_time_s)
            } else {
                0.0
            },
            mean_ride_speed_kmh,
        }
    }
}

fn kmh(meters: f64, seconds: f64) -> f64 {
    (meters / 1000.0) / (seconds / 3600.0)
}

/// Distance totals of one track under both great-circle formulas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackInspection {
    pub points: usize,
    pub haversine_m: f64,
    pub cosine_law_m: f64,
    /// Step indices `i` (pair `i-1, i`) where either formula produced a non-finite value.
    pub nan_steps: Vec<usize>,
}

impl TrackInspection {
    pub fn of(track: &Track) -> Self {
        let mut out = Self {
            points: track.latlng.len(),
            ..Self::default()
        };
        for (i, pair) in track.latlng.windows(2).enumerate() {
            let h = haversine_distance(pair[0], pair[1]);
            let k = cosine_law_distance(pair[0], pair[1]);
            if !h.is_finite() || !k.is_finite() {
                tracing::warn!(step = i + 1, a = ?pair[0], b = ?pair[1], "non-finite step");
                out.nan_steps.push(i + 1);
                continue;
            }
            out.haversine_m += h;
            out.cosine_law_m += k;
        }
        out
    }
}

/// Concatenates several ride index files, keeping file order and ride order within each file.
pub fn concat_indexes<P: AsRef<Path>>(paths: &[P]) -> RideResult<RideIndex> {
    let mut merged = RideIndex::default();
    for path in paths {
        let index: RideIndex = read_json(path.as_ref())?;
        merged.rides.extend(index.rides);
    }
    Ok(merged)
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/stats.rs"]
mod tests;
