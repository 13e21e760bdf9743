use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::corpus::model::{Ride, RideIndex, Track};
use crate::foundation::error::{RideError, RideResult};

/// Source of rides and their coordinate tracks.
///
/// `rides` returns the rides in chronological order. `track` returns `Ok(None)` when a ride has
/// no resolvable track; such rides are skipped rather than failing the run.
pub trait TrackCorpus {
    fn rides(&self) -> RideResult<Vec<Ride>>;

    fn track(&self, ride: &Ride) -> RideResult<Option<Track>>;
}

/// Corpus backed by a ride index JSON file plus one `<id>.json` track file per ride.
#[derive(Clone, Debug)]
pub struct JsonCorpus {
    index_path: PathBuf,
    maps_dir: PathBuf,
}

impl JsonCorpus {
    pub fn new(index_path: impl Into<PathBuf>, maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            maps_dir: maps_dir.into(),
        }
    }

    pub fn track_path(&self, ride: &Ride) -> PathBuf {
        self.maps_dir.join(format!("{}.json", ride.id))
    }
}

impl TrackCorpus for JsonCorpus {
    #[tracing::instrument(skip(self), fields(index = %self.index_path.display()))]
    fn rides(&self) -> RideResult<Vec<Ride>> {
        let mut index: RideIndex = read_json(&self.index_path)?;
        index.sort_chronologically()?;
        Ok(index.rides)
    }

    fn track(&self, ride: &Ride) -> RideResult<Option<Track>> {
        let path = self.track_path(ride);
        match read_json::<Track>(&path) {
            Ok(track) => Ok(Some(track)),
            Err(e) => {
                tracing::debug!(ride = ride.id, error = %e, "no usable track");
                Ok(None)
            }
        }
    }
}

/// In-memory corpus, mostly for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryCorpus {
    rides: Vec<Ride>,
    tracks: HashMap<u64, Track>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ride; `track: None` models a ride whose track file is missing.
    pub fn with_ride(mut self, ride: Ride, track: Option<Track>) -> Self {
        if let Some(track) = track {
            self.tracks.insert(ride.id, track);
        }
        self.rides.push(ride);
        self
    }
}

impl TrackCorpus for MemoryCorpus {
    fn rides(&self) -> RideResult<Vec<Ride>> {
        let mut index = RideIndex {
            rides: self.rides.clone(),
        };
        index.sort_chronologically()?;
        Ok(index.rides)
    }

    fn track(&self, ride: &Ride) -> RideResult<Option<Track>> {
        Ok(self.tracks.get(&ride.id).cloned())
    }
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> RideResult<T> {
    let bytes = std::fs::read(path).map_err(|e| RideError::io(path, e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RideError::corpus(format!("parse '{}': {e}", path.display())))
}

/// Serializes `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> RideResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| RideError::io(parent, e))?;
    }
    let bytes = serde_json::to_vec(value)
        .map_err(|e| RideError::corpus(format!("serialize '{}': {e}", path.display())))?;
    std::fs::write(path, bytes).map_err(|e| RideError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/store.rs"]
mod tests;
