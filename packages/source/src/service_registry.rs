//! Compile-time registry of external data services.
//!
//! Each service is defined in a TOML file under `services/`. The registry
//! embeds these at compile time and exposes them via [`all_services`] and
//! [`service`].

use serde::Deserialize;

/// An external data service loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefinition {
    /// Unique identifier (e.g., `"openweathermap"`, `"catnat"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether live requests are attempted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key, if the service needs one.
    pub api_key_env: Option<String>,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// `OpenWeatherMap` current-weather endpoint.
    OpenWeather {
        /// Unit system (`"metric"`).
        units: String,
        /// Language of condition descriptions.
        lang: String,
    },
    /// National catastrophe registry, queried by radius.
    Catnat {
        /// Search radius around the site in km.
        radius_km: u32,
        /// How far back synthetic history reaches.
        lookback_years: u32,
    },
    /// International disaster database, queried by country.
    Emdat {
        /// Country filter.
        country: String,
        /// How far back synthetic history reaches.
        lookback_years: u32,
    },
    /// Geographic vulnerability service.
    Vulnerability,
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    10
}

impl ServiceDefinition {
    /// Environment variable that overrides [`Self::base_url`], e.g.
    /// `CATNAT_BASE_URL`.
    #[must_use]
    pub fn base_url_env(&self) -> String {
        format!("{}_BASE_URL", self.id.to_uppercase())
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("openweathermap", include_str!("../services/openweathermap.toml")),
    ("catnat", include_str!("../services/catnat.toml")),
    ("emdat", include_str!("../services/emdat.toml")),
    ("vulnerability", include_str!("../services/vulnerability.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 4;

/// Returns all service definitions.
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so
/// this surfaces in the registry tests).
#[must_use]
pub fn all_services() -> Vec<ServiceDefinition> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse service '{name}': {e}"))
        })
        .collect()
}

/// Looks up one service by identifier.
#[must_use]
pub fn service(id: &str) -> Option<ServiceDefinition> {
    all_services().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique_and_match_file_names() {
        let mut seen = BTreeSet::new();
        for ((name, _), svc) in SERVICE_TOMLS.iter().zip(all_services()) {
            assert_eq!(*name, svc.id);
            assert!(seen.insert(svc.id.clone()), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn all_services_have_required_fields() {
        for svc in &all_services() {
            assert!(!svc.name.is_empty(), "Service {} has empty name", svc.id);
            assert!(!svc.base_url.is_empty(), "Service {} has empty base_url", svc.id);
            assert!(svc.timeout_secs > 0, "Service {} has zero timeout", svc.id);
        }
    }

    #[test]
    fn catalog_parameters() {
        let catnat = service("catnat").unwrap();
        assert_eq!(
            catnat.provider,
            ProviderConfig::Catnat {
                radius_km: 50,
                lookback_years: 5
            }
        );
        let emdat = service("emdat").unwrap();
        assert_eq!(
            emdat.provider,
            ProviderConfig::Emdat {
                country: "France".to_string(),
                lookback_years: 20
            }
        );
        assert_eq!(emdat.base_url_env(), "EMDAT_BASE_URL");
    }
}
