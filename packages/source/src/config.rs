//! Resolved configuration for every external service.
//!
//! [`ProvidersConfig`] is built once (usually with
//! [`ProvidersConfig::from_env`]) and handed to each provider's
//! constructor. Nothing in the providers reads process-wide state.

use std::time::Duration;

use crate::SourceError;
use crate::service_registry::{self, ProviderConfig, ServiceDefinition};

/// One service's definition plus its resolved credentials.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// The registry entry.
    pub definition: ServiceDefinition,
    /// Effective base URL (registry default or environment override).
    pub base_url: String,
    /// API key, if one is configured.
    pub api_key: Option<String>,
    /// Bound on a whole live fetch.
    pub timeout: Duration,
}

impl ServiceSettings {
    /// Builds settings from a registry entry, resolving the API key and
    /// base URL through `lookup`.
    #[must_use]
    pub fn resolve(
        definition: ServiceDefinition,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Self {
        let api_key = definition
            .api_key_env
            .as_deref()
            .and_then(lookup)
            .filter(|key| !is_placeholder(key));
        let base_url = lookup(&definition.base_url_env())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| definition.base_url.clone());
        let timeout = Duration::from_secs(definition.timeout_secs);

        Self {
            definition,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    /// Service identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Provider-specific configuration.
    #[must_use]
    pub const fn provider(&self) -> &ProviderConfig {
        &self.definition.provider
    }

    /// Returns `true` if live requests should be attempted.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.definition.enabled
            && (self.api_key.is_some() || self.definition.api_key_env.is_none())
    }

    /// Returns the API key, or [`SourceError::NotConfigured`] if the
    /// service is disabled or has no key.
    ///
    /// Services that need no key return an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotConfigured`] when live requests should not
    /// be attempted.
    pub fn require_key(&self) -> Result<&str, SourceError> {
        if !self.is_configured() {
            return Err(SourceError::NotConfigured {
                service: self.definition.id.clone(),
            });
        }
        Ok(self.api_key.as_deref().unwrap_or(""))
    }

    /// Returns a copy with live requests disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.definition.enabled = false;
        self.api_key = None;
        self
    }

    /// Returns a copy pointed at another base URL with the given key.
    #[must_use]
    pub fn with_endpoint(mut self, base_url: &str, api_key: Option<&str>) -> Self {
        self.definition.enabled = true;
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.api_key = api_key.map(String::from);
        self
    }

    /// Returns a copy with a different fetch timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Unset keys are often left as `your_..._here` in `.env` templates.
fn is_placeholder(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || (key.starts_with("your_") && key.ends_with("_here"))
}

/// Settings for all four external services.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// Current weather.
    pub weather: ServiceSettings,
    /// National disaster catalog.
    pub catnat: ServiceSettings,
    /// International disaster catalog.
    pub emdat: ServiceSettings,
    /// Vulnerability service.
    pub vulnerability: ServiceSettings,
}

impl ProvidersConfig {
    /// Resolves every service against the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownService`] if a required service is
    /// missing from the registry.
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves every service through a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownService`] if a required service is
    /// missing from the registry.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SourceError> {
        let config = Self::resolve_all(&lookup)?;

        for svc in config.all() {
            if svc.is_configured() {
                log::info!("{}: live data enabled ({})", svc.id(), svc.base_url);
            } else {
                log::warn!("{}: no API key configured, synthetic data will be used", svc.id());
            }
        }

        Ok(config)
    }

    /// Configuration with every live source disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownService`] if a required service is
    /// missing from the registry.
    pub fn offline() -> Result<Self, SourceError> {
        let config = Self::resolve_all(&|_: &str| None)?;
        Ok(Self {
            weather: config.weather.disabled(),
            catnat: config.catnat.disabled(),
            emdat: config.emdat.disabled(),
            vulnerability: config.vulnerability.disabled(),
        })
    }

    fn resolve_all(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, SourceError> {
        let settings = |id: &str| {
            service_registry::service(id)
                .map(|definition| ServiceSettings::resolve(definition, lookup))
                .ok_or_else(|| SourceError::UnknownService { id: id.to_string() })
        };

        Ok(Self {
            weather: settings("openweathermap")?,
            catnat: settings("catnat")?,
            emdat: settings("emdat")?,
            vulnerability: settings("vulnerability")?,
        })
    }

    /// All four services, in fetch order.
    #[must_use]
    pub const fn all(&self) -> [&ServiceSettings; 4] {
        [&self.weather, &self.catnat, &self.emdat, &self.vulnerability]
    }
}
