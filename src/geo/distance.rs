use crate::foundation::core::Coordinate;

/// Sphere radius used for every distance computation, in meters.
pub const EARTH_RADIUS_M: f64 = 6_356_752.0;

/// Great-circle distance in meters using the haversine formulation.
///
/// Returns exactly `0.0` for identical inputs and is symmetric in its arguments. Malformed
/// coordinates yield `NaN`; callers treat non-finite results as a skipped step.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let (lat_a, lat_b) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat_b - lat_a;
    let dlon = (b.lon - a.lon).to_radians();

    let h_lat = (1.0 - dlat.cos()) / 2.0;
    let h_lon = (1.0 - dlon.cos()) / 2.0;
    let h = (h_lat + lat_a.cos() * lat_b.cos() * h_lon).clamp(0.0, 1.0);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}

/// Great-circle distance via the spherical law of cosines.
///
/// Loses precision for separations of a few meters; only the `inspect` utility uses it, to print
/// a comparison next to [`haversine_distance`].
pub fn cosine_law_distance(a: Coordinate, b: Coordinate) -> f64 {
    let (lat_a, lat_b) = (a.lat.to_radians(), b.lat.to_radians());
    let dlon = (b.lon - a.lon).to_radians();

    let d = lat_a.sin() * lat_b.sin() + lat_a.cos() * lat_b.cos() * dlon.cos();
    if d.is_nan() {
        return f64::NAN;
    }
    d.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}

#[cfg(test)]
#[path = "../../tests/unit/geo/distance.rs"]
mod tests;
