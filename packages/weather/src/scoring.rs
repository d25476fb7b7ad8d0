//! Turns a [`WeatherSample`] into a 0–100 risk score.
//!
//! Six sub-factors are normalised to `[0, 1]`, capped there, then weighted.
//! The weights sum to 100, so the total can only leave `[0, 100]` through a
//! non-finite input, which [`score_sample`] rejects.

use std::collections::BTreeMap;

use risk_insight_risk_models::{Provenance, RiskSignal, WeatherSample};

const TEMPERATURE_WEIGHT: f64 = 10.0;
const HUMIDITY_WEIGHT: f64 = 15.0;
const WIND_WEIGHT: f64 = 25.0;
const PRECIPITATION_WEIGHT: f64 = 20.0;
const SNOWFALL_WEIGHT: f64 = 15.0;
const CONDITION_WEIGHT: f64 = 15.0;

/// Comfortable temperature in °C; risk grows with distance from it.
const COMFORT_TEMPERATURE: f64 = 20.0;

/// Keyword groups checked in order; the first group with a match wins.
const CONDITION_SEVERITY: &[(&[&str], f64)] = &[
    (&["thunderstorm", "storm", "orage"], 0.8),
    (&["rain", "drizzle", "pluie"], 0.4),
    (&["snow", "neige"], 0.6),
    (&["fog", "mist", "brouillard"], 0.2),
];

/// Severity of a free-text condition, in `[0, 1]`.
#[must_use]
pub fn condition_severity(condition: &str) -> f64 {
    let condition = condition.to_lowercase();
    CONDITION_SEVERITY
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| condition.contains(k)))
        .map_or(0.0, |(_, severity)| *severity)
}

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Weighted sub-factor contributions, keyed by factor name.
#[must_use]
pub fn factors(sample: &WeatherSample) -> BTreeMap<String, f64> {
    let temperature = unit((sample.temperature - COMFORT_TEMPERATURE).abs() / 30.0);
    let humidity = unit((sample.humidity - 70.0) / 30.0);
    let wind = unit(sample.wind_speed / 20.0);
    let precipitation = unit(sample.precipitation_1h / 10.0);
    let snowfall = unit(sample.snowfall_1h / 5.0);
    let condition = condition_severity(&sample.condition);

    [
        ("temperature", temperature * TEMPERATURE_WEIGHT),
        ("humidity", humidity * HUMIDITY_WEIGHT),
        ("wind", wind * WIND_WEIGHT),
        ("precipitation", precipitation * PRECIPITATION_WEIGHT),
        ("snowfall", snowfall * SNOWFALL_WEIGHT),
        ("condition", condition * CONDITION_WEIGHT),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

/// Scores a sample, or returns `None` if any reading is not finite.
#[must_use]
pub fn score_sample(sample: &WeatherSample, provenance: Provenance) -> Option<RiskSignal> {
    if !sample.is_finite() {
        return None;
    }
    let factors = factors(sample);
    let total: f64 = factors.values().sum();
    Some(RiskSignal::new(total, factors, provenance))
}
