//! Historical natural-disaster events and the disaster-risk assessment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{GeoPoint, Provenance, RiskSignal};

/// Kind of natural catastrophe.
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
pub enum DisasterType {
    /// River or flash flooding
    Flood,
    /// Windstorm, cyclone
    Storm,
    /// Prolonged drought (clay shrink-swell damage)
    Drought,
    /// Forest or bush fire
    Wildfire,
    /// Seismic event
    Earthquake,
    /// Ground movement, mudslide
    Landslide,
    /// Snow avalanche
    Avalanche,
    /// Marine submersion / storm surge
    CoastalSurge,
    /// Catalog label with no counterpart in this taxonomy
    Other,
}

impl DisasterType {
    /// Returns every classified type, i.e. all variants except
    /// [`DisasterType::Other`].
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Storm,
            Self::Drought,
            Self::Wildfire,
            Self::Earthquake,
            Self::Landslide,
            Self::Avalanche,
            Self::CoastalSurge,
        ]
    }

    /// Maps a catalog label (French or English) to a disaster type.
    ///
    /// Returns `None` for labels with no counterpart in the taxonomy.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if let Ok(parsed) = label.parse() {
            return Some(parsed);
        }
        let mapped = match label.as_str() {
            "inondation" | "inondations" | "flooding" => Self::Flood,
            "tempête" | "tempete" | "windstorm" | "cyclone" => Self::Storm,
            "sécheresse" | "secheresse" => Self::Drought,
            "feu de forêt" | "feu de foret" | "incendie" | "fire" => Self::Wildfire,
            "séisme" | "seisme" => Self::Earthquake,
            "mouvement de terrain" | "mass movement" => Self::Landslide,
            "submersion marine" | "storm surge" | "coastal surge" => Self::CoastalSurge,
            _ => return None,
        };
        Some(mapped)
    }
}

/// Severity label attached to a historical event.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DisasterSeverity {
    /// Minor damage
    Low,
    /// Significant local damage
    Moderate,
    /// Major damage
    High,
}

impl DisasterSeverity {
    /// Numeric score used when averaging event severity.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Low => 20.0,
            Self::Moderate => 50.0,
            Self::High => 80.0,
        }
    }

    /// Maps a catalog label (French or English) to a severity.
    ///
    /// Anything unrecognised counts as [`DisasterSeverity::Low`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" | "élevée" | "elevee" | "severe" => Self::High,
            "moderate" | "modérée" | "moderee" | "medium" => Self::Moderate,
            _ => Self::Low,
        }
    }
}

/// A historical catastrophe near the assessed site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterEvent {
    /// Catalog identifier (e.g. `"catnat_4821"`).
    pub id: String,
    /// Type of catastrophe.
    pub disaster_type: DisasterType,
    /// Day the event started, if the catalog date was readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Severity label.
    pub severity: DisasterSeverity,
    /// Approximate location of the event.
    pub location: GeoPoint,
    /// Estimated damage in currency units.
    pub damage_estimate: u64,
    /// Affected area in km².
    pub affected_area_km2: u32,
    /// Deaths, when the catalog reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths: Option<u32>,
    /// Injured people, when the catalog reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injured: Option<u32>,
}

impl DisasterEvent {
    /// Returns `true` if the event happened within `window_days` of `today`.
    ///
    /// Undated events and events dated after `today` are not considered
    /// recent.
    #[must_use]
    pub fn is_recent(&self, today: NaiveDate, window_days: i64) -> bool {
        self.date
            .is_some_and(|date| (0..=window_days).contains(&(today - date).num_days()))
    }
}

/// The two historical catalogs queried for disaster history.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CatalogId {
    /// French national natural-catastrophe registry.
    Catnat,
    /// International emergency events database.
    Emdat,
}

/// How many events one catalog contributed and where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// Which catalog.
    pub catalog: CatalogId,
    /// Live or synthetic.
    pub provenance: Provenance,
    /// Number of events returned.
    pub event_count: usize,
}

/// Coarse descriptive label for frequency, severity and proximity.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intensity {
    /// Nothing recorded
    None,
    /// Low
    Low,
    /// Moderate
    Moderate,
    /// High
    High,
}

/// Human-readable summary of the disaster history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterLabels {
    /// How often events happen.
    pub frequency: Intensity,
    /// How severe they were on average.
    pub severity: Intensity,
    /// How many happened recently.
    pub proximity: Intensity,
}

impl DisasterLabels {
    /// Labels for a site with no recorded history.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            frequency: Intensity::Low,
            severity: Intensity::Low,
            proximity: Intensity::Low,
        }
    }
}

/// Output of the disaster-risk provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterAssessment {
    /// All events from both catalogs, national first.
    pub events: Vec<DisasterEvent>,
    /// The scored signal.
    pub signal: RiskSignal,
    /// Descriptive labels.
    pub labels: DisasterLabels,
    /// Per-catalog provenance and counts.
    pub sources: Vec<CatalogSummary>,
}
