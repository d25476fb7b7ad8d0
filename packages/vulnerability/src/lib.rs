#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic vulnerability signal.
//!
//! The vulnerability model itself lives in an external service; this crate
//! only queries it and, when it cannot be reached, reports a fixed default
//! assessment.

use std::collections::BTreeMap;

use async_trait::async_trait;
use risk_insight_risk_models::{
    GeoPoint, Provenance, RiskSignal, SiteProfile, VulnerabilityAssessment, VulnerabilityZones,
    ZoneLevel,
};
use risk_insight_source::{
    ServiceSettings, SourceError, VulnerabilityRiskProvider, retry, try_live_else_synthetic,
};

/// Score reported when the service is unavailable.
pub const DEFAULT_VULNERABILITY_SCORE: f64 = 25.0;

/// Vulnerability provider backed by the external HTTP service.
pub struct VulnerabilityService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl VulnerabilityService {
    /// Creates a provider for the given service settings.
    #[must_use]
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// The assessment reported when the service is unavailable: moderate
    /// factors and every zone unknown.
    #[must_use]
    pub fn default_assessment() -> VulnerabilityAssessment {
        let factors = [
            ("flood_vulnerability", 20.0),
            ("earthquake_vulnerability", 15.0),
            ("wind_vulnerability", 20.0),
            ("subsidence_vulnerability", 10.0),
            ("infrastructure_vulnerability", 25.0),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        VulnerabilityAssessment {
            signal: RiskSignal::new(DEFAULT_VULNERABILITY_SCORE, factors, Provenance::Synthetic),
            zones: VulnerabilityZones::default(),
        }
    }

    /// Fetches the assessment for a site.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the service is not configured, the request
    /// fails or the payload has no score.
    pub async fn fetch_vulnerability(
        &self,
        point: GeoPoint,
        site: SiteProfile,
    ) -> Result<VulnerabilityAssessment, SourceError> {
        let api_key = self.settings.require_key()?;
        let url = format!("{}/vulnerability", self.settings.base_url);
        let lat = point.latitude().to_string();
        let lon = point.longitude().to_string();
        let site_type = site.building_type().to_string();
        let site_value = site.building_value().to_string();

        let body = retry::send_json(|| {
            let request = self.client.get(&url).query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("site_type", site_type.as_str()),
                ("site_value", site_value.as_str()),
            ]);
            if api_key.is_empty() {
                request
            } else {
                request.query(&[("api_key", api_key)])
            }
        })
        .await?;

        parse_response(&body)
    }
}

/// Maps a zone label (French or English) to a [`ZoneLevel`].
fn zone_level(value: &serde_json::Value) -> ZoneLevel {
    match value.as_str().map(|s| s.trim().to_lowercase()).as_deref() {
        Some("high" | "élevée" | "elevee") => ZoneLevel::High,
        Some("moderate" | "modérée" | "moderee") => ZoneLevel::Moderate,
        Some("low" | "faible") => ZoneLevel::Low,
        _ => ZoneLevel::Unknown,
    }
}

fn parse_response(body: &serde_json::Value) -> Result<VulnerabilityAssessment, SourceError> {
    let risk = &body["vulnerability_risk"];
    let score = risk["vulnerability_risk_score"]
        .as_f64()
        .ok_or_else(|| SourceError::Malformed {
            message: "missing vulnerability_risk_score".to_string(),
        })?;

    let factors: BTreeMap<String, f64> = risk["risk_factors"]
        .as_object()
        .map(|object| {
            object
                .iter()
                .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
                .collect()
        })
        .unwrap_or_default();

    let zones = &risk["zone_assessments"];
    let zones = VulnerabilityZones {
        flood: zone_level(&zones["flood_zone"]),
        earthquake: zone_level(&zones["earthquake_zone"]),
        wind: zone_level(&zones["wind_zone"]),
        subsidence: zone_level(&zones["subsidence_zone"]),
    };

    Ok(VulnerabilityAssessment {
        signal: RiskSignal::new(score, factors, Provenance::Live),
        zones,
    })
}

#[async_trait]
impl VulnerabilityRiskProvider for VulnerabilityService {
    async fn vulnerability_risk(
        &self,
        point: GeoPoint,
        site: SiteProfile,
    ) -> VulnerabilityAssessment {
        let sourced = try_live_else_synthetic(
            "vulnerability",
            self.settings.timeout,
            self.fetch_vulnerability(point, site),
            Self::default_assessment,
        )
        .await;

        log::debug!(
            "vulnerability: {:.1} ({})",
            sourced.value.signal.score,
            sourced.provenance
        );
        sourced.value
    }
}
