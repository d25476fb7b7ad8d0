#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared plumbing for risk signal providers.
//!
//! Each provider (weather, disaster history, vulnerability) implements one
//! of the traits below. Providers never fail: every live fetch goes
//! through [`resilient::try_live_else_synthetic`], which degrades to
//! locally generated data when the external source is unreachable.
//!
//! External services are described by TOML files embedded in the
//! [`service_registry`] and resolved into a [`config::ProvidersConfig`]
//! that is passed explicitly to each provider.

pub mod config;
pub mod resilient;
pub mod retry;
pub mod seed;
pub mod service_registry;

use std::time::Duration;

use async_trait::async_trait;
use risk_insight_risk_models::{
    DisasterAssessment, GeoPoint, SiteProfile, VulnerabilityAssessment, WeatherAssessment,
};

pub use config::{ProvidersConfig, ServiceSettings};
pub use resilient::{Sourced, try_live_else_synthetic};
pub use seed::{coordinate_seed, seeded_rng};

/// Errors raised while talking to an external data source.
///
/// These never escape a provider; they are logged and replaced by
/// synthetic data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The source did not answer in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The source has no API key or is disabled.
    #[error("service '{service}' is not configured")]
    NotConfigured {
        /// Service identifier.
        service: String,
    },

    /// No service with this identifier exists in the registry.
    #[error("unknown service '{id}'")]
    UnknownService {
        /// Requested identifier.
        id: String,
    },

    /// The payload parsed but its content is unusable.
    #[error("malformed payload: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },
}

/// Current-weather risk for a coordinate.
#[async_trait]
pub trait WeatherRiskProvider: Send + Sync {
    /// Scores current weather at `point`. Never fails.
    async fn weather_risk(&self, point: GeoPoint) -> WeatherAssessment;
}

/// Historical disaster risk for a site.
#[async_trait]
pub trait DisasterRiskProvider: Send + Sync {
    /// Scores disaster history around `point` for the given site. Never
    /// fails.
    async fn disaster_risk(&self, point: GeoPoint, site: SiteProfile) -> DisasterAssessment;
}

/// Geographic vulnerability for a site.
#[async_trait]
pub trait VulnerabilityRiskProvider: Send + Sync {
    /// Scores vulnerability at `point` for the given site. Never fails.
    async fn vulnerability_risk(
        &self,
        point: GeoPoint,
        site: SiteProfile,
    ) -> VulnerabilityAssessment;
}
