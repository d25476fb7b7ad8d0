//! Parsing of catalog responses into [`DisasterEvent`]s.
//!
//! Both catalogs answer with `{"disasters": [...]}`. Field names differ a
//! little between them (`damage_estimate` vs `damage_usd`) and labels may be
//! French or English, so records are read field by field.

use chrono::NaiveDate;
use risk_insight_risk_models::{DisasterEvent, DisasterSeverity, DisasterType, GeoPoint};
use risk_insight_source::SourceError;

/// Parses a catalog response body.
///
/// Every object record is kept so that it counts toward the history: an
/// unknown or missing type becomes [`DisasterType::Other`] and an unreadable
/// date is left empty. Records that are not objects are skipped. A missing
/// or out-of-range location falls back to the query point.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if the body has no `disasters` array.
pub fn parse_events(
    body: &serde_json::Value,
    query_point: GeoPoint,
    severity_of: impl Fn(&serde_json::Value) -> DisasterSeverity,
) -> Result<Vec<DisasterEvent>, SourceError> {
    let records = body["disasters"]
        .as_array()
        .ok_or_else(|| SourceError::Malformed {
            message: "catalog response has no disasters array".to_string(),
        })?;

    let events = records
        .iter()
        .filter_map(|record| {
            if !record.is_object() {
                log::debug!("skipping non-object catalog record: {record}");
                return None;
            }
            Some(parse_record(record, query_point, &severity_of))
        })
        .collect();

    Ok(events)
}

fn parse_record(
    record: &serde_json::Value,
    query_point: GeoPoint,
    severity_of: &impl Fn(&serde_json::Value) -> DisasterSeverity,
) -> DisasterEvent {
    let disaster_type = record["type"]
        .as_str()
        .and_then(DisasterType::from_label)
        .unwrap_or(DisasterType::Other);
    let date = record["date"]
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok());
    if disaster_type == DisasterType::Other || date.is_none() {
        log::debug!("unclassified catalog record kept for counting: {record}");
    }

    let location = GeoPoint::new(
        record["location"]["latitude"].as_f64().unwrap_or(f64::NAN),
        record["location"]["longitude"].as_f64().unwrap_or(f64::NAN),
    )
    .unwrap_or(query_point);

    let id = match &record["id"] {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => date.map_or_else(
            || disaster_type.to_string(),
            |date| format!("{disaster_type}_{date}"),
        ),
    };

    DisasterEvent {
        id,
        disaster_type,
        date,
        severity: severity_of(record),
        location,
        damage_estimate: record["damage_estimate"]
            .as_u64()
            .or_else(|| record["damage_usd"].as_u64())
            .unwrap_or(0),
        affected_area_km2: record["affected_area_km2"]
            .as_u64()
            .and_then(|a| u32::try_from(a).ok())
            .unwrap_or(0),
        deaths: record["deaths"].as_u64().and_then(|d| u32::try_from(d).ok()),
        injured: record["injured"].as_u64().and_then(|i| u32::try_from(i).ok()),
    }
}

/// Reads the `severity` label of a record.
#[must_use]
pub fn labelled_severity(record: &serde_json::Value) -> DisasterSeverity {
    DisasterSeverity::from_label(record["severity"].as_str().unwrap_or_default())
}
