//! Disaster-history scoring.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use risk_insight_risk_models::{
    BuildingType, DisasterEvent, DisasterLabels, Intensity, Provenance, RiskSignal, SiteProfile,
};

/// Events younger than this many days count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 365;

/// Score for a site with no recorded history.
pub const BASELINE_SCORE: f64 = 15.0;

const FREQUENCY_WEIGHT: f64 = 0.3;
const SEVERITY_WEIGHT: f64 = 0.4;
const PROXIMITY_WEIGHT: f64 = 0.3;

/// Exposure multiplier of a building type to disaster damage.
#[must_use]
pub const fn site_multiplier(building_type: BuildingType) -> f64 {
    match building_type {
        BuildingType::Residential => 1.0,
        BuildingType::Commercial => 1.2,
        BuildingType::Industrial => 1.5,
        BuildingType::Agricultural => 1.3,
        BuildingType::Public => 1.1,
        BuildingType::Logistics => 1.4,
    }
}

/// Frequency label from the total event count.
#[must_use]
pub const fn frequency_label(events: usize) -> Intensity {
    match events {
        0 => Intensity::None,
        1..=2 => Intensity::Low,
        3..=5 => Intensity::Moderate,
        _ => Intensity::High,
    }
}

/// Severity label from the mean severity score.
#[must_use]
pub fn severity_label(mean_severity: f64) -> Intensity {
    if mean_severity < 30.0 {
        Intensity::Low
    } else if mean_severity < 60.0 {
        Intensity::Moderate
    } else {
        Intensity::High
    }
}

/// Proximity label from the recent event count.
#[must_use]
pub const fn proximity_label(recent: usize) -> Intensity {
    match recent {
        0 => Intensity::Low,
        1..=2 => Intensity::Moderate,
        _ => Intensity::High,
    }
}

/// The signal reported for an empty history.
#[must_use]
pub fn baseline_signal(provenance: Provenance) -> RiskSignal {
    let factors = BTreeMap::from([
        ("historical_events".to_string(), 0.0),
        ("recent_events".to_string(), 0.0),
    ]);
    RiskSignal::new(BASELINE_SCORE, factors, provenance)
}

/// Scores a combined event history for `site` as of `today`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_events(
    events: &[DisasterEvent],
    site: SiteProfile,
    today: NaiveDate,
    provenance: Provenance,
) -> (RiskSignal, DisasterLabels) {
    if events.is_empty() {
        return (baseline_signal(provenance), DisasterLabels::quiet());
    }

    let total = events.len();
    let recent = events
        .iter()
        .filter(|e| e.is_recent(today, RECENT_WINDOW_DAYS))
        .count();

    let frequency = (total as f64 / 10.0 * 50.0).min(100.0);
    let severity = events.iter().map(|e| e.severity.score()).sum::<f64>() / total as f64;
    let proximity = (recent as f64 * 20.0).min(100.0);
    let multiplier = site_multiplier(site.building_type());

    let raw = FREQUENCY_WEIGHT.mul_add(
        frequency,
        SEVERITY_WEIGHT.mul_add(severity, PROXIMITY_WEIGHT * proximity),
    );

    let factors = BTreeMap::from([
        ("historical_events".to_string(), total as f64),
        ("recent_events".to_string(), recent as f64),
        ("frequency_score".to_string(), frequency),
        ("severity_score".to_string(), severity),
        ("proximity_score".to_string(), proximity),
        ("site_multiplier".to_string(), multiplier),
    ]);

    let labels = DisasterLabels {
        frequency: frequency_label(total),
        severity: severity_label(severity),
        proximity: proximity_label(recent),
    };

    (RiskSignal::new(raw * multiplier, factors, provenance), labels)
}
