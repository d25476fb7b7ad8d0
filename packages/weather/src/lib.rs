#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather risk from current atmospheric conditions.
//!
//! Live observations come from `OpenWeatherMap`. When the service is not
//! configured, slow or broken, a seeded synthetic sample stands in and the
//! signal is tagged [`Provenance::Synthetic`].

pub mod open_weather;
pub mod scoring;
pub mod synthetic;

use std::collections::BTreeMap;

use async_trait::async_trait;
use risk_insight_risk_models::{GeoPoint, Provenance, RiskSignal, WeatherAssessment};
use risk_insight_source::{ServiceSettings, WeatherRiskProvider, try_live_else_synthetic};

/// Score reported when no sample can be scored.
pub const DEFAULT_WEATHER_SCORE: f64 = 25.0;

/// Weather risk provider backed by `OpenWeatherMap`.
pub struct WeatherService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl WeatherService {
    /// Creates a provider for the given service settings.
    #[must_use]
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// The assessment returned when scoring is impossible.
    #[must_use]
    pub fn default_assessment() -> WeatherAssessment {
        WeatherAssessment {
            signal: RiskSignal::new(DEFAULT_WEATHER_SCORE, BTreeMap::new(), Provenance::Synthetic),
            sample: None,
        }
    }
}

#[async_trait]
impl WeatherRiskProvider for WeatherService {
    async fn weather_risk(&self, point: GeoPoint) -> WeatherAssessment {
        let sample = try_live_else_synthetic(
            "weather",
            self.settings.timeout,
            open_weather::fetch_current_weather(&self.client, &self.settings, point),
            || synthetic::synthetic_sample(point),
        )
        .await;

        match scoring::score_sample(&sample.value, sample.provenance) {
            Some(signal) => {
                log::debug!(
                    "weather: {:.1} ({}, '{}')",
                    signal.score,
                    signal.provenance,
                    sample.value.condition
                );
                WeatherAssessment {
                    signal,
                    sample: Some(sample.value),
                }
            }
            None => {
                log::warn!("weather: sample could not be scored, using default signal");
                Self::default_assessment()
            }
        }
    }
}
