//! Regional hazard tables that drive synthetic event generation.
//!
//! Metropolitan France is split into three latitude bands with their own
//! hazard mix; every other location uses a generic table. Table order is
//! significant: the generator walks each table top to bottom, drawing from
//! the same seeded stream.

use risk_insight_risk_models::{DisasterSeverity, DisasterType, GeoPoint};
use strum_macros::{AsRefStr, Display};

use DisasterSeverity::{High, Low, Moderate};
use DisasterType::{
    Avalanche, CoastalSurge, Drought, Earthquake, Flood, Landslide, Storm, Wildfire,
};

/// Hazard region of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Region {
    /// France, latitude above 48°.
    FranceNorth,
    /// France, latitude above 45° up to 48°.
    FranceCentre,
    /// France, latitude 43° to 45°.
    FranceSouth,
    /// Anywhere outside the French bounding box.
    Generic,
}

/// One row of the national catalog table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalHazard {
    /// Hazard type.
    pub disaster_type: DisasterType,
    /// Probability that the lookback window holds one such event.
    pub frequency: f64,
    /// Severity assigned to generated events.
    pub severity: DisasterSeverity,
}

/// One row of the international catalog table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternationalHazard {
    /// Hazard type.
    pub disaster_type: DisasterType,
    /// Probability that the lookback window holds one such event.
    pub frequency: f64,
    /// Typical death toll.
    pub avg_deaths: u32,
    /// Typical damage in US dollars.
    pub avg_damage: u64,
}

const fn national(
    disaster_type: DisasterType,
    frequency: f64,
    severity: DisasterSeverity,
) -> NationalHazard {
    NationalHazard {
        disaster_type,
        frequency,
        severity,
    }
}

const fn international(
    disaster_type: DisasterType,
    frequency: f64,
    avg_deaths: u32,
    avg_damage: u64,
) -> InternationalHazard {
    InternationalHazard {
        disaster_type,
        frequency,
        avg_deaths,
        avg_damage,
    }
}

const FRANCE_NORTH: &[NationalHazard] = &[
    national(Flood, 0.6, High),
    national(Storm, 0.5, High),
    national(Drought, 0.1, Moderate),
    national(Landslide, 0.05, Low),
    national(Wildfire, 0.05, Moderate),
    national(Earthquake, 0.02, Low),
    national(Avalanche, 0.08, Moderate),
    national(CoastalSurge, 0.12, High),
];

const FRANCE_CENTRE: &[NationalHazard] = &[
    national(Flood, 0.4, Moderate),
    national(Storm, 0.35, Moderate),
    national(Drought, 0.3, High),
    national(Landslide, 0.15, Moderate),
    national(Wildfire, 0.2, High),
    national(Earthquake, 0.08, Moderate),
    national(Avalanche, 0.02, Low),
    national(CoastalSurge, 0.03, Low),
];

const FRANCE_SOUTH: &[NationalHazard] = &[
    national(Flood, 0.3, Moderate),
    national(Storm, 0.25, Moderate),
    national(Drought, 0.5, High),
    national(Landslide, 0.25, High),
    national(Wildfire, 0.35, High),
    national(Earthquake, 0.15, Moderate),
    national(Avalanche, 0.03, Low),
    national(CoastalSurge, 0.08, Moderate),
];

const GENERIC_NATIONAL: &[NationalHazard] = &[
    national(Flood, 0.25, Moderate),
    national(Storm, 0.2, Moderate),
    national(Drought, 0.15, Moderate),
    national(Landslide, 0.08, Low),
    national(Wildfire, 0.1, Moderate),
    national(Earthquake, 0.05, Low),
    national(Avalanche, 0.02, Low),
    national(CoastalSurge, 0.05, Moderate),
];

const FRANCE_INTERNATIONAL: &[InternationalHazard] = &[
    international(Flood, 0.25, 5, 1_000_000),
    international(Storm, 0.2, 3, 500_000),
    international(Drought, 0.15, 0, 2_000_000),
    international(Wildfire, 0.1, 2, 300_000),
    international(Earthquake, 0.05, 10, 5_000_000),
    international(Landslide, 0.05, 1, 200_000),
];

const GENERIC_INTERNATIONAL: &[InternationalHazard] = &[
    international(Flood, 0.3, 10, 2_000_000),
    international(Storm, 0.25, 5, 1_000_000),
    international(Earthquake, 0.1, 50, 10_000_000),
    international(Drought, 0.15, 0, 5_000_000),
    international(Wildfire, 0.1, 3, 500_000),
    international(Landslide, 0.1, 2, 300_000),
];

impl Region {
    /// Classifies a coordinate. The French bounding box is inclusive.
    #[must_use]
    pub fn of(point: GeoPoint) -> Self {
        let (lat, lon) = (point.latitude(), point.longitude());
        if !((43.0..=51.0).contains(&lat) && (-5.0..=10.0).contains(&lon)) {
            Self::Generic
        } else if lat > 48.0 {
            Self::FranceNorth
        } else if lat > 45.0 {
            Self::FranceCentre
        } else {
            Self::FranceSouth
        }
    }

    /// National catalog hazards for this region, in draw order.
    #[must_use]
    pub const fn national_hazards(self) -> &'static [NationalHazard] {
        match self {
            Self::FranceNorth => FRANCE_NORTH,
            Self::FranceCentre => FRANCE_CENTRE,
            Self::FranceSouth => FRANCE_SOUTH,
            Self::Generic => GENERIC_NATIONAL,
        }
    }
}

/// International catalog hazards for a country filter, in draw order.
#[must_use]
pub fn international_hazards(country: &str) -> &'static [InternationalHazard] {
    if country.trim().eq_ignore_ascii_case("france") {
        FRANCE_INTERNATIONAL
    } else {
        GENERIC_INTERNATIONAL
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn region(lat: f64, lon: f64) -> Region {
        Region::of(GeoPoint::new(lat, lon).unwrap())
    }

    #[test]
    fn classifies_french_bands() {
        assert_eq!(region(48.8566, 2.3522), Region::FranceNorth);
        assert_eq!(region(45.764, 4.8357), Region::FranceCentre);
        assert_eq!(region(43.2965, 5.3698), Region::FranceSouth);
        assert_eq!(region(48.0, 2.0), Region::FranceCentre);
        assert_eq!(region(45.0, 2.0), Region::FranceSouth);
    }

    #[test]
    fn outside_bounding_box_is_generic() {
        assert_eq!(region(40.4168, -3.7038), Region::Generic);
        assert_eq!(region(48.0, 11.0), Region::Generic);
        assert_eq!(region(-33.8688, 151.2093), Region::Generic);
    }

    #[test]
    fn every_national_table_covers_every_type_once() {
        for r in [
            Region::FranceNorth,
            Region::FranceCentre,
            Region::FranceSouth,
            Region::Generic,
        ] {
            let table = r.national_hazards();
            let types: BTreeSet<_> = table.iter().map(|h| h.disaster_type).collect();
            let expected: BTreeSet<_> = DisasterType::all().iter().copied().collect();
            assert_eq!(table.len(), DisasterType::all().len(), "{r}");
            assert_eq!(types, expected, "{r}");
        }
    }

    #[test]
    fn frequencies_are_probabilities() {
        let national = [FRANCE_NORTH, FRANCE_CENTRE, FRANCE_SOUTH, GENERIC_NATIONAL]
            .iter()
            .flat_map(|t| t.iter().map(|h| h.frequency));
        let international = [FRANCE_INTERNATIONAL, GENERIC_INTERNATIONAL]
            .iter()
            .flat_map(|t| t.iter().map(|h| h.frequency));
        for f in national.chain(international) {
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn international_table_by_country() {
        assert_eq!(international_hazards("France").len(), 6);
        assert_eq!(international_hazards("france")[0].avg_damage, 1_000_000);
        assert_eq!(international_hazards("Spain")[2].disaster_type, Earthquake);
    }
}
