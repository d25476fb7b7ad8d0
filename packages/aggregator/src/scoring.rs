//! Weighted combination of the three component scores.

use risk_insight_risk_models::{
    BuildingType, Contributions, Provenance, RiskSignal, SiteProfile, clamp_score,
};

use crate::AggregationError;

/// Weight of the weather score.
pub const WEATHER_WEIGHT: f64 = 0.25;
/// Weight of the disaster-history score.
pub const DISASTER_WEIGHT: f64 = 0.35;
/// Weight of the vulnerability score.
pub const VULNERABILITY_WEIGHT: f64 = 0.40;

/// Building value at which the value factor is neutral.
const REFERENCE_VALUE: f64 = 1_000_000.0;

/// `value / 1 000 000`, bounded to `[0.8, 1.5]`.
#[must_use]
pub fn value_factor(building_value: f64) -> f64 {
    (building_value / REFERENCE_VALUE).clamp(0.8, 1.5)
}

/// Exposure factor of a building type.
#[must_use]
pub const fn type_factor(building_type: BuildingType) -> f64 {
    match building_type {
        BuildingType::Residential | BuildingType::Public => 1.0,
        BuildingType::Commercial => 1.1,
        BuildingType::Industrial => 1.3,
        BuildingType::Agricultural | BuildingType::Logistics => 1.2,
    }
}

/// Combines component scores into the global score and its breakdown.
///
/// # Errors
///
/// Returns [`AggregationError::NonFiniteScore`] if a component or the
/// combined score is not finite.
pub fn combine(
    weather: f64,
    disaster: f64,
    vulnerability: f64,
    site: SiteProfile,
) -> Result<(f64, Contributions), AggregationError> {
    for (component, score) in [
        ("weather", weather),
        ("disaster", disaster),
        ("vulnerability", vulnerability),
    ] {
        if !score.is_finite() {
            return Err(AggregationError::NonFiniteScore { component, score });
        }
    }

    let contributions = Contributions {
        weather: weather * WEATHER_WEIGHT,
        disaster: disaster * DISASTER_WEIGHT,
        vulnerability: vulnerability * VULNERABILITY_WEIGHT,
        value_factor: value_factor(site.building_value()),
        type_factor: type_factor(site.building_type()),
    };

    let weighted = contributions.weather + contributions.disaster + contributions.vulnerability;
    let global = weighted * contributions.value_factor * contributions.type_factor;
    if !global.is_finite() {
        return Err(AggregationError::NonFiniteScore {
            component: "global",
            score: global,
        });
    }

    Ok((clamp_score(global), contributions))
}

/// Mean of per-provider data-quality factors, in `[0, 1]`.
#[must_use]
pub fn confidence(weather: &RiskSignal, disaster: &RiskSignal, vulnerability: &RiskSignal) -> f64 {
    let factor = |provenance: Provenance, synthetic: f64| {
        if provenance.is_live() { 0.9 } else { synthetic }
    };

    (factor(weather.provenance, 0.6)
        + factor(disaster.provenance, 0.5)
        + factor(vulnerability.provenance, 0.5))
        / 3.0
}
