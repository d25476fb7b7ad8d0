//! Deterministic synthetic disaster history.
//!
//! Used when a catalog is unreachable. For a given coordinate, reference
//! date and lookback, the generated history is identical on every call:
//! each call seeds its own generator from the coordinate and walks the
//! regional hazard table in order, drawing one Bernoulli trial per row.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::rngs::StdRng;
use risk_insight_risk_models::{DisasterEvent, DisasterSeverity, GeoPoint};
use risk_insight_source::seeded_rng;

use crate::region::{Region, international_hazards};

/// Separates the international stream from the national one, which uses
/// the bare coordinate seed.
const INTERNATIONAL_SALT: u64 = 0x656d_6461_74;

fn days_before(today: NaiveDate, days: u64) -> Option<NaiveDate> {
    Some(today.checked_sub_days(Days::new(days)).unwrap_or(today))
}

fn jitter(rng: &mut StdRng, point: GeoPoint, spread: f64) -> GeoPoint {
    let d_lat = rng.gen_range(-spread..=spread);
    let d_lon = rng.gen_range(-spread..=spread);
    point.offset(d_lat, d_lon)
}

/// National-catalog history around `point`, up to `lookback_years` before
/// `today`.
#[must_use]
pub fn national_events(
    point: GeoPoint,
    today: NaiveDate,
    lookback_years: u32,
) -> Vec<DisasterEvent> {
    let mut rng = seeded_rng(point, 0);
    let window_days = u64::from(lookback_years.max(1)) * 365;

    Region::of(point)
        .national_hazards()
        .iter()
        .filter_map(|hazard| {
            if !rng.gen_bool(hazard.frequency) {
                return None;
            }
            let days_ago = rng.gen_range(1..=window_days);
            let id = format!("catnat_{}", rng.gen_range(1000..=9999));
            let location = jitter(&mut rng, point, 0.1);

            Some(DisasterEvent {
                id,
                disaster_type: hazard.disaster_type,
                date: days_before(today, days_ago),
                severity: hazard.severity,
                location,
                damage_estimate: rng.gen_range(100_000..=5_000_000),
                affected_area_km2: rng.gen_range(1..=100),
                deaths: None,
                injured: None,
            })
        })
        .collect()
}

/// International-catalog history for `country`, up to `lookback_years`
/// before `today`.
///
/// The international catalog grades events by casualties and damage, not
/// by a severity label, so every generated event is [`DisasterSeverity::Low`].
#[must_use]
pub fn international_events(
    point: GeoPoint,
    country: &str,
    today: NaiveDate,
    lookback_years: u32,
) -> Vec<DisasterEvent> {
    let mut rng = seeded_rng(point, INTERNATIONAL_SALT);
    let lookback_years = u64::from(lookback_years.max(1));

    international_hazards(country)
        .iter()
        .filter_map(|hazard| {
            if !rng.gen_bool(hazard.frequency) {
                return None;
            }
            let years_ago = rng.gen_range(1..=lookback_years);
            let days_ago = rng.gen_range(1..=365 * years_ago);
            let id = format!("emdat_{}", rng.gen_range(10_000..=99_999));
            let location = jitter(&mut rng, point, 0.5);
            let deaths = rng.gen_range(0..=hazard.avg_deaths * 2);
            let injured = rng.gen_range(0..=hazard.avg_deaths * 5);
            let damage = rng.gen_range(hazard.avg_damage / 2..=hazard.avg_damage * 2);

            Some(DisasterEvent {
                id,
                disaster_type: hazard.disaster_type,
                date: days_before(today, days_ago),
                severity: DisasterSeverity::Low,
                location,
                damage_estimate: damage,
                affected_area_km2: rng.gen_range(1..=500),
                deaths: Some(deaths),
                injured: Some(injured),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn national_history_is_deterministic() {
        let p = GeoPoint::new(48.8566, 2.3522).unwrap();
        let first = national_events(p, today(), 5);
        let second = national_events(p, today(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn international_history_is_deterministic() {
        let p = GeoPoint::new(43.6047, 1.4442).unwrap();
        assert_eq!(
            international_events(p, "France", today(), 20),
            international_events(p, "France", today(), 20)
        );
    }

    #[test]
    fn national_events_respect_window_and_ranges() {
        for (lat, lon) in [
            (48.8566, 2.3522),
            (45.764, 4.8357),
            (43.2965, 5.3698),
            (52.52, 13.405),
        ] {
            let p = GeoPoint::new(lat, lon).unwrap();
            for e in national_events(p, today(), 5) {
                let age = (today() - e.date.unwrap()).num_days();
                assert!((1..=1825).contains(&age), "age {age}");
                assert!(e.id.starts_with("catnat_"));
                assert!((100_000..=5_000_000).contains(&e.damage_estimate));
                assert!((1..=100).contains(&e.affected_area_km2));
                assert!((e.location.latitude() - lat).abs() <= 0.1 + 1e-9);
                assert!((e.location.longitude() - lon).abs() <= 0.1 + 1e-9);
                assert!(e.deaths.is_none());
            }
        }
    }

    #[test]
    fn national_severity_follows_region_table() {
        let p = GeoPoint::new(43.2965, 5.3698).unwrap();
        let table = Region::of(p).national_hazards();
        for e in national_events(p, today(), 5) {
            let row = table
                .iter()
                .find(|h| h.disaster_type == e.disaster_type)
                .unwrap();
            assert_eq!(e.severity, row.severity);
        }
    }

    #[test]
    fn international_events_respect_ranges() {
        let p = GeoPoint::new(-6.2088, 106.8456).unwrap();
        for e in international_events(p, "Indonesia", today(), 20) {
            let age = (today() - e.date.unwrap()).num_days();
            assert!((1..=365 * 20).contains(&age));
            assert!(e.id.starts_with("emdat_"));
            assert!((1..=500).contains(&e.affected_area_km2));
            assert!(e.deaths.is_some() && e.injured.is_some());
        }
    }

    #[test]
    fn international_events_are_low_severity() {
        let mut generated = 0;
        for i in 0..200_u32 {
            let p = GeoPoint::new(f64::from(i).mul_add(0.037, 43.0), 2.35).unwrap();
            for e in international_events(p, "France", today(), 20) {
                generated += 1;
                assert_eq!(e.severity, DisasterSeverity::Low, "{}", e.id);
            }
        }
        assert!(generated > 0);
    }

    #[test]
    fn reference_date_shifts_dates_only() {
        let p = GeoPoint::new(47.2184, -1.5536).unwrap();
        let later = today().checked_add_days(Days::new(30)).unwrap();
        let a = national_events(p, today(), 5);
        let b = national_events(p, later, 5);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!((y.date.unwrap() - x.date.unwrap()).num_days(), 30);
            assert_eq!(x.id, y.id);
        }
    }
}
