//! Current weather observations.

use serde::{Deserialize, Serialize};

use crate::RiskSignal;

/// A current-conditions sample for a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Precipitation over the last hour in mm.
    pub precipitation_1h: f64,
    /// Snowfall over the last hour in mm.
    pub snowfall_1h: f64,
    /// Free-text condition description (e.g. `"light rain"`).
    pub condition: String,
}

impl WeatherSample {
    /// Returns `true` if every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite()
            && self.humidity.is_finite()
            && self.wind_speed.is_finite()
            && self.precipitation_1h.is_finite()
            && self.snowfall_1h.is_finite()
    }
}

/// Output of the weather-risk provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAssessment {
    /// The scored signal.
    pub signal: RiskSignal,
    /// The observation the score was computed from, if one was available.
    pub sample: Option<WeatherSample>,
}
