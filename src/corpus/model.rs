use chrono::{DateTime, Utc};

use crate::foundation::core::Coordinate;
use crate::foundation::error::{RideError, RideResult};

/// Timestamp layout of `start_time`, e.g. `2021-05-01T08:00:00+0000`.
pub const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// One recorded ride as listed in the ride index.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ride {
    pub id: u64,
    pub name: String,
    pub start_time: String,
    #[serde(rename = "distance_raw", default)]
    pub distance_m: f64,
    #[serde(rename = "elevation_gain_raw", default)]
    pub elevation_gain_m: f64,
    #[serde(rename = "elapsed_time_raw", default)]
    pub elapsed_time_s: f64,
    #[serde(rename = "moving_time_raw", default)]
    pub moving_time_s: f64,
}

impl Ride {
    pub fn started_at(&self) -> RideResult<DateTime<Utc>> {
        DateTime::parse_from_str(&self.start_time, START_TIME_FORMAT)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                RideError::corpus(format!(
                    "ride {} has unparseable start_time '{}': {e}",
                    self.id, self.start_time
                ))
            })
    }
}

/// The ride index file: `{"models": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RideIndex {
    #[serde(rename = "models")]
    pub rides: Vec<Ride>,
}

impl RideIndex {
    /// Sorts rides by start time, oldest first. Ties keep their index order.
    pub fn sort_chronologically(&mut self) -> RideResult<()> {
        let mut keyed = std::mem::take(&mut self.rides)
            .into_iter()
            .map(|r| Ok((r.started_at()?, r)))
            .collect::<RideResult<Vec<_>>>()?;
        keyed.sort_by_key(|(t, _)| *t);
        self.rides = keyed.into_iter().map(|(_, r)| r).collect();
        Ok(())
    }
}

/// Per-ride sample stream as stored in `<maps_dir>/<id>.json`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    #[serde(default)]
    pub grade_smooth: Vec<f64>,
    #[serde(default)]
    pub latlng: Vec<Coordinate>,
}

impl Track {
    pub fn new(latlng: Vec<Coordinate>) -> Self {
        Self {
            grade_smooth: Vec::new(),
            latlng,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/model.rs"]
mod tests;
