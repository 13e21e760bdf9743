//! Ride data: the index/track model, corpus sources, the flattened point stream and the
//! summary utilities built on top of them.

pub mod model;
pub mod stats;
pub mod store;
pub mod stream;
