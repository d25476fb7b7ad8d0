//! Coordinate-derived seeds for synthetic data.
//!
//! Synthetic fallbacks must return the same data for the same site on every
//! call, so each generator builds a fresh [`StdRng`] from the coordinate
//! instead of sharing one.

use rand::SeedableRng;
use rand::rngs::StdRng;
use risk_insight_risk_models::GeoPoint;

/// `round(lat * 1000) + round(lon * 1000)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coordinate_seed(point: GeoPoint) -> i64 {
    (point.latitude() * 1000.0).round() as i64 + (point.longitude() * 1000.0).round() as i64
}

/// A fresh generator for `point`.
///
/// `salt` separates independent generators for the same coordinate; a salt
/// of `0` yields the bare coordinate seed.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn seeded_rng(point: GeoPoint, salt: u64) -> StdRng {
    StdRng::seed_from_u64(coordinate_seed(point) as u64 ^ salt)
}
