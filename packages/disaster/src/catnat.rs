//! French national natural-catastrophe registry (CatNat).
//!
//! Queried by radius around the site. Records carry French labels
//! (`"inondation"`, `"élevée"`).

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use risk_insight_risk_models::{CatalogId, DisasterEvent, GeoPoint};
use risk_insight_source::service_registry::ProviderConfig;
use risk_insight_source::{ServiceSettings, SourceError, retry};

use crate::catalog::DisasterCatalog;
use crate::{synthetic, wire};

const DEFAULT_RADIUS_KM: u32 = 50;
const DEFAULT_LOOKBACK_YEARS: u32 = 5;

/// `CatNat` client.
pub struct CatnatCatalog {
    settings: ServiceSettings,
    client: reqwest::Client,
    radius_km: u32,
    lookback_years: u32,
}

impl CatnatCatalog {
    /// Creates a client from resolved service settings.
    #[must_use]
    pub fn new(settings: ServiceSettings) -> Self {
        let (radius_km, lookback_years) = match settings.provider() {
            ProviderConfig::Catnat {
                radius_km,
                lookback_years,
            } => (*radius_km, *lookback_years),
            _ => (DEFAULT_RADIUS_KM, DEFAULT_LOOKBACK_YEARS),
        };
        Self {
            settings,
            client: reqwest::Client::new(),
            radius_km,
            lookback_years,
        }
    }
}

#[async_trait]
impl DisasterCatalog for CatnatCatalog {
    fn id(&self) -> CatalogId {
        CatalogId::Catnat
    }

    fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    async fn fetch_events(&self, point: GeoPoint) -> Result<Vec<DisasterEvent>, SourceError> {
        let api_key = self.settings.require_key()?;
        let url = format!("{}/disasters", self.settings.base_url);
        let lat = point.latitude().to_string();
        let lon = point.longitude().to_string();
        let radius = self.radius_km.to_string();

        let body = retry::send_json(|| {
            self.client.get(&url).query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("radius", radius.as_str()),
                ("api_key", api_key),
                ("format", "json"),
            ])
        })
        .await?;

        wire::parse_events(&body, point, wire::labelled_severity)
    }

    fn synthetic_events(&self, point: GeoPoint, today: NaiveDate) -> Vec<DisasterEvent> {
        synthetic::national_events(point, today, self.lookback_years)
    }
}
