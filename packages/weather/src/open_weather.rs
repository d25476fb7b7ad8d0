//! `OpenWeatherMap` current-weather client.
//!
//! See <https://openweathermap.org/current>

use risk_insight_risk_models::{GeoPoint, WeatherSample};
use risk_insight_source::service_registry::ProviderConfig;
use risk_insight_source::{ServiceSettings, SourceError, retry};

/// Fetches current conditions at `point`.
///
/// # Errors
///
/// Returns [`SourceError::NotConfigured`] if no API key is set, or another
/// [`SourceError`] if the request fails or the payload is unusable.
pub async fn fetch_current_weather(
    client: &reqwest::Client,
    settings: &ServiceSettings,
    point: GeoPoint,
) -> Result<WeatherSample, SourceError> {
    let api_key = settings.require_key()?;
    let (units, lang) = match settings.provider() {
        ProviderConfig::OpenWeather { units, lang } => (units.as_str(), lang.as_str()),
        _ => ("metric", "en"),
    };

    let url = format!("{}/weather", settings.base_url);
    let lat = point.latitude().to_string();
    let lon = point.longitude().to_string();

    let body = retry::send_json(|| {
        client.get(&url).query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", api_key),
            ("units", units),
            ("lang", lang),
        ])
    })
    .await?;

    parse_response(&body)
}

/// Parses an `OpenWeatherMap` `/weather` response.
///
/// `rain` and `snow` are absent when nothing fell, so they default to zero.
fn parse_response(body: &serde_json::Value) -> Result<WeatherSample, SourceError> {
    let number = |value: &serde_json::Value, field: &str| {
        value.as_f64().ok_or_else(|| SourceError::Malformed {
            message: format!("missing {field} in weather response"),
        })
    };

    let sample = WeatherSample {
        temperature: number(&body["main"]["temp"], "main.temp")?,
        humidity: number(&body["main"]["humidity"], "main.humidity")?,
        wind_speed: body["wind"]["speed"].as_f64().unwrap_or(0.0),
        precipitation_1h: body["rain"]["1h"].as_f64().unwrap_or(0.0),
        snowfall_1h: body["snow"]["1h"].as_f64().unwrap_or(0.0),
        condition: body["weather"][0]["description"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    };

    if !sample.is_finite() {
        return Err(SourceError::Malformed {
            message: "non-finite reading in weather response".to_string(),
        });
    }

    Ok(sample)
}
