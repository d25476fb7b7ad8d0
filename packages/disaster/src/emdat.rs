//! International emergency events database (EM-DAT).
//!
//! Queried by country. Records carry English labels and, unlike `CatNat`,
//! usually no severity label; those records score as low severity.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use risk_insight_risk_models::{CatalogId, DisasterEvent, GeoPoint};
use risk_insight_source::service_registry::ProviderConfig;
use risk_insight_source::{ServiceSettings, SourceError, retry};

use crate::catalog::DisasterCatalog;
use crate::{synthetic, wire};

const DEFAULT_COUNTRY: &str = "France";
const DEFAULT_LOOKBACK_YEARS: u32 = 20;

/// `EM-DAT` client.
pub struct EmdatCatalog {
    settings: ServiceSettings,
    client: reqwest::Client,
    country: String,
    lookback_years: u32,
}

impl EmdatCatalog {
    /// Creates a client from resolved service settings.
    #[must_use]
    pub fn new(settings: ServiceSettings) -> Self {
        let (country, lookback_years) = match settings.provider() {
            ProviderConfig::Emdat {
                country,
                lookback_years,
            } => (country.clone(), *lookback_years),
            _ => (DEFAULT_COUNTRY.to_string(), DEFAULT_LOOKBACK_YEARS),
        };
        Self {
            settings,
            client: reqwest::Client::new(),
            country,
            lookback_years,
        }
    }
}

#[async_trait]
impl DisasterCatalog for EmdatCatalog {
    fn id(&self) -> CatalogId {
        CatalogId::Emdat
    }

    fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    async fn fetch_events(&self, point: GeoPoint) -> Result<Vec<DisasterEvent>, SourceError> {
        let api_key = self.settings.require_key()?;
        let url = format!("{}/disasters", self.settings.base_url);
        let lat = point.latitude().to_string();
        let lon = point.longitude().to_string();

        let body = retry::send_json(|| {
            self.client.get(&url).query(&[
                ("country", self.country.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("api_key", api_key),
                ("format", "json"),
            ])
        })
        .await?;

        wire::parse_events(&body, point, wire::labelled_severity)
    }

    fn synthetic_events(&self, point: GeoPoint, today: NaiveDate) -> Vec<DisasterEvent> {
        synthetic::international_events(point, &self.country, today, self.lookback_years)
    }
}

#[cfg(test)]
mod tests {
    use risk_insight_risk_models::{DisasterSeverity, DisasterType};
    use risk_insight_source::ProvidersConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn queries_by_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/disasters"))
            .and(query_param("country", "France"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "disasters": [
                    {
                        "id": "emdat_12345",
                        "type": "Earthquake",
                        "date": "2019-11-11",
                        "damage_usd": 8_000_000,
                        "deaths": 0,
                        "injured": 4
                    },
                    {"id": "emdat_23456", "type": "Flood", "date": "2021-07-14", "severity": "high"}
                ]
            })))
            .mount(&server)
            .await;

        let settings = ProvidersConfig::offline()
            .unwrap()
            .emdat
            .with_endpoint(&server.uri(), Some("k"));
        let events = EmdatCatalog::new(settings)
            .fetch_events(GeoPoint::new(44.0, 5.0).unwrap())
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].disaster_type, DisasterType::Earthquake);
        assert_eq!(events[0].damage_estimate, 8_000_000);
        assert_eq!(events[0].severity, DisasterSeverity::Low);
        assert_eq!(events[0].injured, Some(4));
        assert_eq!(events[1].severity, DisasterSeverity::High);
    }
}
