//! Plausible mild-weather sample used when the live source is unavailable.

use rand::Rng;
use risk_insight_risk_models::{GeoPoint, WeatherSample};
use risk_insight_source::seeded_rng;

/// Keeps the weather stream independent from the disaster catalogs seeded
/// from the same coordinate.
const WEATHER_SALT: u64 = 0x7765_6174_6865_72;

const CONDITIONS: &[&str] = &["clear sky", "cloudy", "light rain", "fog", "partly cloudy"];

/// A synthetic sample for `point`, identical on every call for the same
/// coordinate. Precipitation and snowfall are always zero.
#[must_use]
pub fn synthetic_sample(point: GeoPoint) -> WeatherSample {
    let mut rng = seeded_rng(point, WEATHER_SALT);

    WeatherSample {
        temperature: rng.gen_range(10.0..=25.0),
        humidity: rng.gen_range(40.0..=80.0),
        wind_speed: rng.gen_range(0.0..=15.0),
        precipitation_1h: 0.0,
        snowfall_1h: 0.0,
        condition: CONDITIONS[rng.gen_range(0..CONDITIONS.len())].to_string(),
    }
}
