//! The seam between the disaster provider and the individual catalogs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use risk_insight_risk_models::{CatalogId, DisasterEvent, GeoPoint};
use risk_insight_source::SourceError;

/// A historical disaster catalog with a synthetic fallback.
#[async_trait]
pub trait DisasterCatalog: Send + Sync {
    /// Which catalog this is.
    fn id(&self) -> CatalogId;

    /// Bound on one live fetch.
    fn timeout(&self) -> Duration;

    /// Fetches live events around `point`.
    async fn fetch_events(&self, point: GeoPoint) -> Result<Vec<DisasterEvent>, SourceError>;

    /// Deterministic stand-in history for `point` as of `today`.
    fn synthetic_events(&self, point: GeoPoint, today: NaiveDate) -> Vec<DisasterEvent>;
}
