use crate::corpus::model::Ride;
use crate::corpus::store::TrackCorpus;
use crate::foundation::core::Coordinate;
use crate::foundation::error::{RideError, RideResult};
use crate::geo::projection::BoundingBox;

/// All track points of all rides as one timeline, each tagged with its ride.
///
/// Rides appear in chronological order and points keep their sample order, so any prefix of the
/// stream is "everything recorded up to some moment".
#[derive(Clone, Debug, Default)]
pub struct PointStream {
    rides: Vec<Ride>,
    points: Vec<Coordinate>,
    ride_of: Vec<usize>,
    rides_total: usize,
}

impl PointStream {
    /// Flattens every ride with a resolvable track. Rides without one are logged and skipped.
    #[tracing::instrument(skip(corpus))]
    pub fn build(corpus: &dyn TrackCorpus) -> RideResult<Self> {
        let rides = corpus.rides()?;
        let rides_total = rides.len();
        let mut stream = Self {
            rides_total,
            ..Self::default()
        };

        for ride in rides {
            let Some(track) = corpus.track(&ride)? else {
                tracing::warn!(ride = ride.id, name = %ride.name, "skipping ride without track");
                continue;
            };
            let idx = stream.rides.len();
            stream.ride_of.extend(std::iter::repeat_n(idx, track.latlng.len()));
            stream.points.extend(track.latlng);
            stream.rides.push(ride);
        }

        tracing::info!(
            "have {}/{} rides, {} points",
            stream.rides.len(),
            rides_total,
            stream.points.len()
        );
        Ok(stream)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Rides that contributed points, in stream order.
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Number of rides listed by the corpus, including skipped ones.
    pub fn rides_total(&self) -> usize {
        self.rides_total
    }

    /// Ride owning the point at `point_idx`.
    pub fn ride_at(&self, point_idx: usize) -> Option<&Ride> {
        self.ride_of.get(point_idx).and_then(|&r| self.rides.get(r))
    }

    pub fn bounding_box(&self) -> RideResult<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
            .ok_or_else(|| RideError::corpus("point stream has no finite coordinates"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/stream.rs"]
mod tests;
