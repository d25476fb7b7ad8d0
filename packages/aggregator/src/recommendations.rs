//! Rule-based mitigation recommendations.
//!
//! Rules are independent and always emitted in the same order: the global
//! tier first, then component-specific advice, then hazard zones.

use risk_insight_risk_models::{VulnerabilityZones, ZoneLevel};

/// Component scores the rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    /// Global composite score.
    pub global: f64,
    /// Weather score.
    pub weather: f64,
    /// Disaster-history score.
    pub disaster: f64,
    /// Vulnerability score.
    pub vulnerability: f64,
}

fn global_tier(global: f64) -> &'static [&'static str] {
    if global > 60.0 {
        &[
            "Critical risk: consider reinforced protection measures",
            "Carry out a detailed vulnerability assessment",
            "Set up real-time monitoring systems",
        ]
    } else if global > 40.0 {
        &[
            "High risk: monitor conditions regularly",
            "Reinforce existing protection measures",
            "Keep track of risk indicators",
        ]
    } else if global > 20.0 {
        &[
            "Moderate risk: stay vigilant",
            "Periodically review prevention plans",
        ]
    } else {
        &["Low risk: maintain good practices"]
    }
}

/// Builds the ordered recommendation list.
#[must_use]
pub fn recommend(scores: ScoreSummary, zones: &VulnerabilityZones) -> Vec<String> {
    let mut out: Vec<String> = global_tier(scores.global)
        .iter()
        .map(ToString::to_string)
        .collect();

    let component_rules = [
        (
            scores.weather > 50.0,
            "Adverse weather conditions: monitor forecasts",
        ),
        (
            scores.disaster > 40.0,
            "History of natural disasters: strengthen preparedness",
        ),
        (
            scores.vulnerability > 50.0,
            "High geographic vulnerability: consider structural reinforcement",
        ),
    ];
    let zone_rules = [
        (zones.flood, "Flood zone: check drainage systems"),
        (zones.earthquake, "Seismic zone: reinforce the building structure"),
        (zones.wind, "Windy zone: secure exterior elements"),
    ];

    out.extend(
        component_rules
            .into_iter()
            .filter(|(fires, _)| *fires)
            .map(|(_, text)| text.to_string()),
    );
    out.extend(
        zone_rules
            .into_iter()
            .filter(|(level, _)| *level == ZoneLevel::High)
            .map(|(_, text)| text.to_string()),
    );

    out
}
