#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composite site risk.
//!
//! [`RiskAggregator`] runs the weather, disaster and vulnerability
//! providers concurrently, combines their scores with fixed weights and
//! site multipliers, rates confidence from data provenance and attaches
//! recommendations. It never fails: any internal problem yields
//! [`default_result`].

pub mod recommendations;
pub mod scoring;

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use risk_insight_disaster::DisasterService;
use risk_insight_risk_models::{
    CompositeRiskResult, Contributions, DisasterAssessment, GeoPoint, RiskCategory, RiskLevel,
    RiskReport, SiteProfile, VulnerabilityAssessment, WeatherAssessment,
};
use risk_insight_source::{
    DisasterRiskProvider, ProvidersConfig, VulnerabilityRiskProvider, WeatherRiskProvider,
};
use risk_insight_vulnerability::VulnerabilityService;
use risk_insight_weather::WeatherService;
use tokio::task::{JoinError, JoinHandle};

use crate::recommendations::ScoreSummary;

/// Internal failures that replace the composite result with the default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    /// A provider task panicked or was cancelled.
    #[error("{provider} provider failed: {reason}")]
    ProviderFailed {
        /// Which provider.
        provider: &'static str,
        /// Join error description.
        reason: String,
    },

    /// A score was NaN or infinite.
    #[error("{component} score is not finite ({score})")]
    NonFiniteScore {
        /// Which score.
        component: &'static str,
        /// The offending value.
        score: f64,
    },
}

/// The result reported when aggregation fails.
#[must_use]
pub fn default_result() -> CompositeRiskResult {
    CompositeRiskResult {
        global_score: 30.0,
        risk_level: RiskLevel::Moderate,
        risk_category: RiskCategory::Acceptable,
        confidence_score: 0.7,
        contributions: Contributions {
            weather: 6.25,
            disaster: 5.25,
            vulnerability: 10.0,
            value_factor: 1.0,
            type_factor: 1.0,
        },
        recommendations: vec![
            "Moderate risk: stay vigilant".to_string(),
            "Periodically review prevention plans".to_string(),
        ],
    }
}

/// A spawned provider call, aborted if dropped before it completes.
struct ProviderTask<T>(JoinHandle<T>);

impl<T: Send + 'static> ProviderTask<T> {
    fn spawn(future: impl Future<Output = T> + Send + 'static) -> Self {
        Self(tokio::spawn(future))
    }
}

impl<T> Future for ProviderTask<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for ProviderTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Fans out to the three providers and merges their signals.
#[derive(Clone)]
pub struct RiskAggregator {
    weather: Arc<dyn WeatherRiskProvider>,
    disaster: Arc<dyn DisasterRiskProvider>,
    vulnerability: Arc<dyn VulnerabilityRiskProvider>,
}

impl RiskAggregator {
    /// Creates an aggregator over the given providers.
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherRiskProvider>,
        disaster: Arc<dyn DisasterRiskProvider>,
        vulnerability: Arc<dyn VulnerabilityRiskProvider>,
    ) -> Self {
        Self {
            weather,
            disaster,
            vulnerability,
        }
    }

    /// Creates an aggregator over the standard providers.
    #[must_use]
    pub fn from_config(config: &ProvidersConfig) -> Self {
        Self::new(
            Arc::new(WeatherService::new(config.weather.clone())),
            Arc::new(DisasterService::new(config)),
            Arc::new(VulnerabilityService::new(config.vulnerability.clone())),
        )
    }

    /// Computes the composite risk for a site.
    pub async fn compute_comprehensive_risk(
        &self,
        point: GeoPoint,
        site: SiteProfile,
    ) -> CompositeRiskResult {
        self.assess(point, site).await.result
    }

    /// Computes the composite risk together with each provider's detail.
    ///
    /// A provider that failed outright is absent from the report. Dropping
    /// the returned future aborts any provider call still in flight.
    pub async fn assess(&self, point: GeoPoint, site: SiteProfile) -> RiskReport {
        let weather = {
            let provider = Arc::clone(&self.weather);
            ProviderTask::spawn(async move { provider.weather_risk(point).await })
        };
        let disaster = {
            let provider = Arc::clone(&self.disaster);
            ProviderTask::spawn(async move { provider.disaster_risk(point, site).await })
        };
        let vulnerability = {
            let provider = Arc::clone(&self.vulnerability);
            ProviderTask::spawn(async move { provider.vulnerability_risk(point, site).await })
        };

        let (weather, disaster, vulnerability) = tokio::join!(weather, disaster, vulnerability);
        let failed = |provider: &'static str| {
            move |e: JoinError| AggregationError::ProviderFailed {
                provider,
                reason: e.to_string(),
            }
        };
        let weather = weather.map_err(failed("weather"));
        let disaster = disaster.map_err(failed("disaster"));
        let vulnerability = vulnerability.map_err(failed("vulnerability"));

        let result = compose(&weather, &disaster, &vulnerability, site).unwrap_or_else(|e| {
            log::error!("risk aggregation failed: {e}, returning default result");
            default_result()
        });
        log::info!(
            "composite risk {:.1} ({}, {}), confidence {:.2}",
            result.global_score,
            result.risk_level,
            result.risk_category,
            result.confidence_score
        );

        RiskReport {
            result,
            weather: weather.ok(),
            disaster: disaster.ok(),
            vulnerability: vulnerability.ok(),
        }
    }
}

fn compose(
    weather: &Result<WeatherAssessment, AggregationError>,
    disaster: &Result<DisasterAssessment, AggregationError>,
    vulnerability: &Result<VulnerabilityAssessment, AggregationError>,
    site: SiteProfile,
) -> Result<CompositeRiskResult, AggregationError> {
    let weather = weather.as_ref().map_err(Clone::clone)?;
    let disaster = disaster.as_ref().map_err(Clone::clone)?;
    let vulnerability = vulnerability.as_ref().map_err(Clone::clone)?;

    let (global_score, contributions) = scoring::combine(
        weather.signal.score,
        disaster.signal.score,
        vulnerability.signal.score,
        site,
    )?;

    let recommendations = recommendations::recommend(
        ScoreSummary {
            global: global_score,
            weather: weather.signal.score,
            disaster: disaster.signal.score,
            vulnerability: vulnerability.signal.score,
        },
        &vulnerability.zones,
    );

    Ok(CompositeRiskResult {
        global_score,
        risk_level: RiskLevel::from_score(global_score),
        risk_category: RiskCategory::from_score(global_score),
        confidence_score: scoring::confidence(
            &weather.signal,
            &disaster.signal,
            &vulnerability.signal,
        ),
        contributions,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;
    use risk_insight_risk_models::{
        BuildingType, DisasterLabels, Provenance, RiskSignal, VulnerabilityZones, ZoneLevel,
    };

    use super::*;

    fn signal(score: f64, provenance: Provenance) -> RiskSignal {
        RiskSignal::new(score, BTreeMap::new(), provenance)
    }

    struct FixedWeather {
        score: f64,
        delay: Duration,
    }

    #[async_trait]
    impl WeatherRiskProvider for FixedWeather {
        async fn weather_risk(&self, _point: GeoPoint) -> WeatherAssessment {
            tokio::time::sleep(self.delay).await;
            WeatherAssessment {
                signal: signal(self.score, Provenance::Live),
                sample: None,
            }
        }
    }

    struct FixedDisaster {
        score: f64,
        delay: Duration,
    }

    #[async_trait]
    impl DisasterRiskProvider for FixedDisaster {
        async fn disaster_risk(&self, _point: GeoPoint, _site: SiteProfile) -> DisasterAssessment {
            tokio::time::sleep(self.delay).await;
            DisasterAssessment {
                events: vec![],
                signal: signal(self.score, Provenance::Synthetic),
                labels: DisasterLabels::quiet(),
                sources: vec![],
            }
        }
    }

    struct FixedVulnerability {
        score: f64,
        zones: VulnerabilityZones,
        delay: Duration,
    }

    #[async_trait]
    impl VulnerabilityRiskProvider for FixedVulnerability {
        async fn vulnerability_risk(
            &self,
            _point: GeoPoint,
            _site: SiteProfile,
        ) -> VulnerabilityAssessment {
            tokio::time::sleep(self.delay).await;
            VulnerabilityAssessment {
                signal: signal(self.score, Provenance::Live),
                zones: self.zones,
            }
        }
    }

    struct PanickingWeather;

    #[async_trait]
    impl WeatherRiskProvider for PanickingWeather {
        async fn weather_risk(&self, _point: GeoPoint) -> WeatherAssessment {
            panic!("weather provider exploded");
        }
    }

    /// Never answers within a test; reports on `done` if it ever finishes.
    struct StalledWeather {
        done: Mutex<Option<oneshot::Sender<()>>>,
    }

    #[async_trait]
    impl WeatherRiskProvider for StalledWeather {
        async fn weather_risk(&self, _point: GeoPoint) -> WeatherAssessment {
            let done = self.done.lock().unwrap().take();
            tokio::time::sleep(Duration::from_secs(3600)).await;
            if let Some(done) = done {
                let _ = done.send(());
            }
            WeatherAssessment {
                signal: signal(0.0, Provenance::Live),
                sample: None,
            }
        }
    }

    struct PanickingDisaster;

    #[async_trait]
    impl DisasterRiskProvider for PanickingDisaster {
        async fn disaster_risk(&self, _point: GeoPoint, _site: SiteProfile) -> DisasterAssessment {
            panic!("disaster provider exploded");
        }
    }

    struct PanickingVulnerability;

    #[async_trait]
    impl VulnerabilityRiskProvider for PanickingVulnerability {
        async fn vulnerability_risk(
            &self,
            _point: GeoPoint,
            _site: SiteProfile,
        ) -> VulnerabilityAssessment {
            panic!("vulnerability provider exploded");
        }
    }

    fn fixed(weather: f64, disaster: f64, vulnerability: f64, delay: Duration) -> RiskAggregator {
        RiskAggregator::new(
            Arc::new(FixedWeather {
                score: weather,
                delay,
            }),
            Arc::new(FixedDisaster {
                score: disaster,
                delay,
            }),
            Arc::new(FixedVulnerability {
                score: vulnerability,
                zones: VulnerabilityZones::default(),
                delay,
            }),
        )
    }

    fn paris() -> GeoPoint {
        GeoPoint::new(48.8566, 2.3522).unwrap()
    }

    #[tokio::test]
    async fn low_risk_residential_site() {
        let result = fixed(10.0, 10.0, 10.0, Duration::ZERO)
            .compute_comprehensive_risk(
                paris(),
                SiteProfile::new(BuildingType::Residential, 500_000.0).unwrap(),
            )
            .await;

        assert!((result.global_score - 8.0).abs() < 1e-9);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.risk_category, RiskCategory::Acceptable);
        // weather live 0.9, disaster synthetic 0.5, vulnerability live 0.9
        assert!((result.confidence_score - 2.3 / 3.0).abs() < 1e-12);
        assert_eq!(result.recommendations, vec!["Low risk: maintain good practices"]);
    }

    #[tokio::test]
    async fn high_risk_industrial_site() {
        let aggregator = RiskAggregator::new(
            Arc::new(FixedWeather {
                score: 80.0,
                delay: Duration::ZERO,
            }),
            Arc::new(FixedDisaster {
                score: 70.0,
                delay: Duration::ZERO,
            }),
            Arc::new(FixedVulnerability {
                score: 90.0,
                zones: VulnerabilityZones {
                    earthquake: ZoneLevel::High,
                    ..VulnerabilityZones::default()
                },
                delay: Duration::ZERO,
            }),
        );
        let result = aggregator
            .compute_comprehensive_risk(
                paris(),
                SiteProfile::new(BuildingType::Industrial, 2_000_000.0).unwrap(),
            )
            .await;

        assert!((result.global_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);
        assert_eq!(result.risk_category, RiskCategory::Critical);
        assert_eq!(
            result.recommendations,
            vec![
                "Critical risk: consider reinforced protection measures",
                "Carry out a detailed vulnerability assessment",
                "Set up real-time monitoring systems",
                "Adverse weather conditions: monitor forecasts",
                "History of natural disasters: strengthen preparedness",
                "High geographic vulnerability: consider structural reinforcement",
                "Seismic zone: reinforce the building structure",
            ]
        );
    }

    #[tokio::test]
    async fn panicking_provider_yields_default_result() {
        let aggregator = RiskAggregator::new(
            Arc::new(PanickingWeather),
            Arc::new(FixedDisaster {
                score: 50.0,
                delay: Duration::ZERO,
            }),
            Arc::new(FixedVulnerability {
                score: 50.0,
                zones: VulnerabilityZones::default(),
                delay: Duration::ZERO,
            }),
        );

        let report = aggregator
            .assess(
                paris(),
                SiteProfile::new(BuildingType::Commercial, 750_000.0).unwrap(),
            )
            .await;

        assert_eq!(report.result, default_result());
        assert!(report.weather.is_none());
        assert!(report.disaster.is_some());
        assert!(report.vulnerability.is_some());
    }

    #[tokio::test]
    async fn every_provider_failing_yields_default_result() {
        let aggregator = RiskAggregator::new(
            Arc::new(PanickingWeather),
            Arc::new(PanickingDisaster),
            Arc::new(PanickingVulnerability),
        );

        let report = aggregator
            .assess(
                paris(),
                SiteProfile::new(BuildingType::Agricultural, 120_000.0).unwrap(),
            )
            .await;

        assert_eq!(report.result, default_result());
        assert!(report.weather.is_none());
        assert!(report.disaster.is_none());
        assert!(report.vulnerability.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_assess_aborts_provider_calls() {
        let (done, finished) = oneshot::channel();
        let aggregator = RiskAggregator::new(
            Arc::new(StalledWeather {
                done: Mutex::new(Some(done)),
            }),
            Arc::new(FixedDisaster {
                score: 10.0,
                delay: Duration::ZERO,
            }),
            Arc::new(FixedVulnerability {
                score: 10.0,
                zones: VulnerabilityZones::default(),
                delay: Duration::ZERO,
            }),
        );

        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            aggregator.assess(
                paris(),
                SiteProfile::new(BuildingType::Public, 200_000.0).unwrap(),
            ),
        )
        .await;
        assert!(abandoned.is_err());

        // An aborted call drops its sender without ever sending.
        assert!(finished.await.is_err());
    }

    #[test]
    fn non_finite_signal_yields_error() {
        let weather = Ok(WeatherAssessment {
            signal: RiskSignal {
                score: f64::NAN,
                factors: BTreeMap::new(),
                provenance: Provenance::Live,
            },
            sample: None,
        });
        let disaster = Ok(DisasterAssessment {
            events: vec![],
            signal: signal(15.0, Provenance::Live),
            labels: DisasterLabels::quiet(),
            sources: vec![],
        });
        let vulnerability = Ok(VulnerabilityAssessment {
            signal: signal(25.0, Provenance::Live),
            zones: VulnerabilityZones::default(),
        });

        let err = compose(
            &weather,
            &disaster,
            &vulnerability,
            SiteProfile::new(BuildingType::Public, 1_000_000.0).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, AggregationError::NonFiniteScore { .. }));
    }

    #[test]
    fn default_result_contributions() {
        let result = default_result();
        let c = result.contributions;
        assert!((c.weather + c.disaster + c.vulnerability - 21.5).abs() < 1e-12);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.recommendations.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_bounded_by_slowest_provider() {
        let aggregator = fixed(30.0, 30.0, 30.0, Duration::from_millis(200));
        let start = tokio::time::Instant::now();
        aggregator
            .compute_comprehensive_risk(
                paris(),
                SiteProfile::new(BuildingType::Logistics, 1_000_000.0).unwrap(),
            )
            .await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn offline_providers_are_deterministic() {
        let aggregator = RiskAggregator::from_config(&ProvidersConfig::offline().unwrap());
        let site = SiteProfile::new(BuildingType::Agricultural, 250_000.0).unwrap();
        let point = GeoPoint::new(44.8378, -0.5792).unwrap();

        let first = aggregator.assess(point, site).await;
        let second = aggregator.assess(point, site).await;

        assert_eq!(first.weather, second.weather);
        assert!((0.0..=100.0).contains(&first.result.global_score));
        // every source synthetic: (0.6 + 0.5 + 0.5) / 3
        assert!((first.result.confidence_score - 1.6 / 3.0).abs() < 1e-12);
        assert_eq!(
            first.vulnerability.unwrap(),
            VulnerabilityService::default_assessment()
        );
    }
}
