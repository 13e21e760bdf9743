use crate::foundation::core::Coordinate;

/// Spatial resolution of the projection: pixels per degree of longitude.
pub const PIXELS_PER_DEGREE: f64 = 10_000.0;

/// Min/max latitude and longitude over a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    /// Bounding box of all finite points, `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut it = points.into_iter().filter(|p| p.is_finite());
        let first = it.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in it {
            bbox.min.lat = bbox.min.lat.min(p.lat);
            bbox.min.lon = bbox.min.lon.min(p.lon);
            bbox.max.lat = bbox.max.lat.max(p.lat);
            bbox.max.lon = bbox.max.lon.max(p.lon);
        }
        Some(bbox)
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        (self.min.lat..=self.max.lat).contains(&p.lat)
            && (self.min.lon..=self.max.lon).contains(&p.lon)
    }
}

/// Mercator-style projection anchored at a bounding box's south-west corner.
///
/// Longitude maps linearly. Latitude is warped through `atanh(sin(lat))` so north-south spacing
/// stays proportional to ground distance as meridians converge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    bbox: BoundingBox,
    pixels_per_degree: f64,
    min_lat_warped: f64,
}

impl Projection {
    pub fn new(bbox: BoundingBox, pixels_per_degree: f64) -> Self {
        Self {
            bbox,
            pixels_per_degree,
            min_lat_warped: warp_lat(bbox.min.lat),
        }
    }

    /// Unclamped pixel extent of the bounding box, `(width, height)`. A box touching a pole has an
    /// unbounded warped height and reports `u32::MAX`.
    pub fn extent(&self) -> (u32, u32) {
        let (x, y) = self.raw(self.bbox.max);
        (to_pixel(x, u32::MAX), to_pixel(y, u32::MAX))
    }

    /// Projects `p` to `(x, y)` with `y` growing northwards, clamped to
    /// `[0, max_width] × [0, max_height]`.
    pub fn project(&self, p: Coordinate, max_width: u32, max_height: u32) -> (u32, u32) {
        let (x, y) = self.raw(p);
        (to_pixel(x, max_width), to_pixel(y, max_height))
    }

    fn raw(&self, p: Coordinate) -> (f64, f64) {
        let x = (p.lon - self.bbox.min.lon) * self.pixels_per_degree;
        let y = (warp_lat(p.lat) - self.min_lat_warped)
            * self.pixels_per_degree
            * (180.0 / std::f64::consts::PI);
        (x, y)
    }
}

fn warp_lat(lat_deg: f64) -> f64 {
    lat_deg.to_radians().sin().atanh()
}

/// NaN and anything at or below zero map to `0`; `+inf` (a pole under the warp) maps to `max`.
fn to_pixel(v: f64, max: u32) -> u32 {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    if v >= f64::from(max) {
        return max;
    }
    v.floor() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
