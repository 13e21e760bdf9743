//! Spherical geometry: great-circle distance and the lat/lon to pixel projection.

pub mod distance;
pub mod projection;
