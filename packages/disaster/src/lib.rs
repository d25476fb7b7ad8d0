#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster risk from historical catastrophe catalogs.
//!
//! Two catalogs are queried concurrently: the French national registry
//! ([`catnat`]) and the international database ([`emdat`]). Each one falls
//! back to seeded synthetic history on its own, so one live catalog and one
//! synthetic catalog is a normal outcome and is reported per catalog in
//! [`DisasterAssessment::sources`].

pub mod catalog;
pub mod catnat;
pub mod emdat;
pub mod region;
pub mod scoring;
pub mod synthetic;
pub mod wire;

use async_trait::async_trait;
use chrono::NaiveDate;
use risk_insight_risk_models::{
    CatalogSummary, DisasterAssessment, DisasterEvent, GeoPoint, Provenance, SiteProfile,
};
use risk_insight_source::{DisasterRiskProvider, ProvidersConfig, try_live_else_synthetic};

pub use catalog::DisasterCatalog;
pub use catnat::CatnatCatalog;
pub use emdat::EmdatCatalog;

/// Disaster risk provider over a national and an international catalog.
pub struct DisasterService {
    national: Box<dyn DisasterCatalog>,
    international: Box<dyn DisasterCatalog>,
    reference_date: Option<NaiveDate>,
}

impl DisasterService {
    /// Creates a provider over the configured `CatNat` and `EM-DAT` services.
    #[must_use]
    pub fn new(config: &ProvidersConfig) -> Self {
        Self::with_catalogs(
            Box::new(CatnatCatalog::new(config.catnat.clone())),
            Box::new(EmdatCatalog::new(config.emdat.clone())),
        )
    }

    /// Creates a provider over arbitrary catalogs.
    #[must_use]
    pub fn with_catalogs(
        national: Box<dyn DisasterCatalog>,
        international: Box<dyn DisasterCatalog>,
    ) -> Self {
        Self {
            national,
            international,
            reference_date: None,
        }
    }

    /// Pins "today" for synthetic dates and recency, instead of the clock.
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

async fn query_catalog(
    catalog: &dyn DisasterCatalog,
    point: GeoPoint,
    today: NaiveDate,
) -> (Vec<DisasterEvent>, CatalogSummary) {
    let id = catalog.id();
    let sourced = try_live_else_synthetic(
        id.as_ref(),
        catalog.timeout(),
        catalog.fetch_events(point),
        || catalog.synthetic_events(point, today),
    )
    .await;

    let summary = CatalogSummary {
        catalog: id,
        provenance: sourced.provenance,
        event_count: sourced.value.len(),
    };
    log::debug!(
        "{id}: {} events ({})",
        summary.event_count,
        summary.provenance
    );

    (sourced.value, summary)
}

#[async_trait]
impl DisasterRiskProvider for DisasterService {
    async fn disaster_risk(&self, point: GeoPoint, site: SiteProfile) -> DisasterAssessment {
        let today = self.today();

        let ((mut events, national), (international_events, international)) = tokio::join!(
            query_catalog(self.national.as_ref(), point, today),
            query_catalog(self.international.as_ref(), point, today),
        );
        events.extend(international_events);

        let provenance = if national.provenance.is_live() || international.provenance.is_live() {
            Provenance::Live
        } else {
            Provenance::Synthetic
        };

        let (signal, labels) = scoring::score_events(&events, site, today, provenance);
        log::debug!(
            "disaster: {:.1} from {} events ({provenance})",
            signal.score,
            events.len()
        );

        DisasterAssessment {
            events,
            signal,
            labels,
            sources: vec![national, international],
        }
    }
}
