#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core types for site risk assessment.
//!
//! Every signal provider (weather, disaster history, vulnerability) produces
//! a [`RiskSignal`] for a validated [`GeoPoint`] and [`SiteProfile`]. The
//! aggregator combines those signals into a [`CompositeRiskResult`].
//!
//! Inputs are validated on construction, so an out-of-range coordinate or a
//! non-positive building value never reaches the scoring code.

pub mod composite;
pub mod disaster;
pub mod vulnerability;
pub mod weather;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use composite::{CompositeRiskResult, Contributions, RiskCategory, RiskLevel, RiskReport};
pub use disaster::{
    CatalogId, CatalogSummary, DisasterAssessment, DisasterEvent, DisasterLabels, DisasterSeverity,
    DisasterType, Intensity,
};
pub use vulnerability::{VulnerabilityAssessment, VulnerabilityZones, ZoneLevel};
pub use weather::{WeatherAssessment, WeatherSample};

/// Errors raised when caller-supplied input is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    /// Building value that is zero, negative or not finite.
    #[error("building value {0} must be a positive amount")]
    BuildingValue(f64),
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidInputError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a point after checking both coordinates are in range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if either coordinate is out of range
    /// or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidInputError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidInputError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidInputError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns a point shifted by the given offsets, clamped to valid
    /// coordinate ranges.
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            latitude: (self.latitude + d_lat).clamp(-90.0, 90.0),
            longitude: (self.longitude + d_lon).clamp(-180.0, 180.0),
        }
    }
}

/// Kind of building at the assessed site.
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
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BuildingType {
    /// Housing
    Residential,
    /// Offices, retail
    Commercial,
    /// Plants and workshops
    Industrial,
    /// Farms and agricultural buildings
    Agricultural,
    /// Public facilities
    Public,
    /// Warehouses and distribution centres
    Logistics,
}

impl BuildingType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Residential,
            Self::Commercial,
            Self::Industrial,
            Self::Agricultural,
            Self::Public,
            Self::Logistics,
        ]
    }
}

/// The building being assessed. Immutable for the duration of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSiteProfile")]
pub struct SiteProfile {
    building_type: BuildingType,
    building_value: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSiteProfile {
    building_type: BuildingType,
    building_value: f64,
}

impl TryFrom<RawSiteProfile> for SiteProfile {
    type Error = InvalidInputError;

    fn try_from(raw: RawSiteProfile) -> Result<Self, Self::Error> {
        Self::new(raw.building_type, raw.building_value)
    }
}

impl SiteProfile {
    /// Creates a site profile.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::BuildingValue`] if the value is not a
    /// positive finite amount.
    pub fn new(
        building_type: BuildingType,
        building_value: f64,
    ) -> Result<Self, InvalidInputError> {
        if !building_value.is_finite() || building_value <= 0.0 {
            return Err(InvalidInputError::BuildingValue(building_value));
        }
        Ok(Self {
            building_type,
            building_value,
        })
    }

    /// The building type.
    #[must_use]
    pub const fn building_type(&self) -> BuildingType {
        self.building_type
    }

    /// The building value in currency units.
    #[must_use]
    pub const fn building_value(&self) -> f64 {
        self.building_value
    }
}

/// Where the data behind a signal came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Provenance {
    /// Fetched from an external data source.
    Live,
    /// Generated locally because the live source was unavailable.
    Synthetic,
}

impl Provenance {
    /// Returns `true` for [`Provenance::Live`].
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Clamps a score into `[0, 100]`.
///
/// NaN maps to `0.0` so a malformed input can never leak out of range.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// A single provider's risk estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSignal {
    /// Score in `[0, 100]`.
    pub score: f64,
    /// Named sub-factors that went into the score.
    pub factors: BTreeMap<String, f64>,
    /// Whether the underlying data was live or synthetic.
    pub provenance: Provenance,
}

impl RiskSignal {
    /// Creates a signal, clamping the score into `[0, 100]`.
    #[must_use]
    pub fn new(score: f64, factors: BTreeMap<String, f64>, provenance: Provenance) -> Self {
        Self {
            score: clamp_score(score),
            factors,
            provenance,
        }
    }

    /// Looks up a named factor.
    #[must_use]
    pub fn factor(&self, name: &str) -> Option<f64> {
        self.factors.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_accepts_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(48.8566, 2.3522).is_ok());
    }

    #[test]
    fn geo_point_rejects_out_of_range_latitude() {
        assert_eq!(
            GeoPoint::new(91.0, 2.0),
            Err(InvalidInputError::Latitude(91.0))
        );
        assert!(GeoPoint::new(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn geo_point_rejects_out_of_range_longitude() {
        assert_eq!(
            GeoPoint::new(45.0, -180.5),
            Err(InvalidInputError::Longitude(-180.5))
        );
        assert!(GeoPoint::new(45.0, f64::INFINITY).is_err());
    }

    #[test]
    fn offset_stays_in_range() {
        let p = GeoPoint::new(89.95, 179.95).unwrap().offset(0.1, 0.1);
        assert!((p.latitude() - 90.0).abs() < f64::EPSILON);
        assert!((p.longitude() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn site_profile_rejects_non_positive_value() {
        assert!(SiteProfile::new(BuildingType::Residential, 0.0).is_err());
        assert!(SiteProfile::new(BuildingType::Residential, -5.0).is_err());
        assert!(SiteProfile::new(BuildingType::Residential, f64::NAN).is_err());
        assert!(SiteProfile::new(BuildingType::Residential, 250_000.0).is_ok());
    }

    #[test]
    fn building_type_parses_case_insensitively() {
        assert_eq!(
            "Industrial".parse::<BuildingType>().unwrap(),
            BuildingType::Industrial
        );
        assert_eq!(BuildingType::Logistics.to_string(), "logistics");
        assert!("castle".parse::<BuildingType>().is_err());
    }

    #[test]
    fn deserialization_validates_coordinates() {
        let ok: GeoPoint =
            serde_json::from_str(r#"{"latitude": 45.76, "longitude": 4.84}"#).unwrap();
        assert!((ok.latitude() - 45.76).abs() < 1e-9);
        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 91.0, "longitude": 4.84}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn signal_score_is_clamped() {
        let high = RiskSignal::new(140.0, BTreeMap::new(), Provenance::Live);
        assert!((high.score - 100.0).abs() < f64::EPSILON);
        let nan = RiskSignal::new(f64::NAN, BTreeMap::new(), Provenance::Synthetic);
        assert!(nan.score.abs() < f64::EPSILON);
    }
}
