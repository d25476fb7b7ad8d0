//! The combined result returned by the aggregator.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{DisasterAssessment, VulnerabilityAssessment, WeatherAssessment};

/// Overall risk level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RiskLevel {
    /// Score below 20
    Low,
    /// Score below 40
    Moderate,
    /// Score below 60
    High,
    /// Score of 60 or more
    VeryHigh,
}

impl RiskLevel {
    /// Classifies a global score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            Self::Low
        } else if score < 40.0 {
            Self::Moderate
        } else if score < 60.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

/// Action category. Uses different cut points from [`RiskLevel`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RiskCategory {
    /// Score below 25
    Acceptable,
    /// Score below 45
    Watch,
    /// Score below 65
    Concerning,
    /// Score of 65 or more
    Critical,
}

impl RiskCategory {
    /// Classifies a global score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Acceptable
        } else if score < 45.0 {
            Self::Watch
        } else if score < 65.0 {
            Self::Concerning
        } else {
            Self::Critical
        }
    }
}

/// How each signal and site attribute fed into the global score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    /// Weighted weather contribution.
    pub weather: f64,
    /// Weighted disaster-history contribution.
    pub disaster: f64,
    /// Weighted vulnerability contribution.
    pub vulnerability: f64,
    /// Multiplier derived from the building value.
    pub value_factor: f64,
    /// Multiplier derived from the building type.
    pub type_factor: f64,
}

/// The composite risk for a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRiskResult {
    /// Score in `[0, 100]`.
    pub global_score: f64,
    /// Risk level.
    pub risk_level: RiskLevel,
    /// Action category.
    pub risk_category: RiskCategory,
    /// Data-quality confidence in `[0, 1]`.
    pub confidence_score: f64,
    /// Per-signal contributions.
    pub contributions: Contributions,
    /// Ordered mitigation recommendations.
    pub recommendations: Vec<String>,
}

/// The composite result together with every provider's detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// The composite result.
    pub result: CompositeRiskResult,
    /// Weather detail, absent if the provider task failed.
    pub weather: Option<WeatherAssessment>,
    /// Disaster detail, absent if the provider task failed.
    pub disaster: Option<DisasterAssessment>,
    /// Vulnerability detail, absent if the provider task failed.
    pub vulnerability: Option<VulnerabilityAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(19.99), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(20.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::VeryHigh.to_string(), "very-high");
    }

    #[test]
    fn category_thresholds_differ_from_levels() {
        assert_eq!(RiskCategory::from_score(22.0), RiskCategory::Acceptable);
        assert_eq!(RiskLevel::from_score(22.0), RiskLevel::Moderate);
        assert_eq!(RiskCategory::from_score(25.0), RiskCategory::Watch);
        assert_eq!(RiskCategory::from_score(45.0), RiskCategory::Concerning);
        assert_eq!(RiskCategory::from_score(65.0), RiskCategory::Critical);
    }
}
