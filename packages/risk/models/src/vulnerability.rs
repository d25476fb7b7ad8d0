//! Geographic vulnerability, as reported by the external vulnerability
//! provider.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::RiskSignal;

/// Hazard zone classification.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneLevel {
    /// Low exposure
    Low,
    /// Moderate exposure
    Moderate,
    /// High exposure
    High,
    /// No classification available
    #[default]
    Unknown,
}

/// Zone classifications for each hazard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityZones {
    /// Flood zone.
    #[serde(default)]
    pub flood: ZoneLevel,
    /// Seismic zone.
    #[serde(default)]
    pub earthquake: ZoneLevel,
    /// Wind exposure zone.
    #[serde(default)]
    pub wind: ZoneLevel,
    /// Ground subsidence zone.
    #[serde(default)]
    pub subsidence: ZoneLevel,
}

/// Output of the vulnerability-risk provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityAssessment {
    /// The scored signal. Factors include `flood_vulnerability`,
    /// `earthquake_vulnerability`, `wind_vulnerability`,
    /// `subsidence_vulnerability` and `infrastructure_vulnerability`.
    pub signal: RiskSignal,
    /// Hazard zone classifications.
    pub zones: VulnerabilityZones,
}
