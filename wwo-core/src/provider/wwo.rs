use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{
    WeatherError,
    config::{ApiKey, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    model::{CurrentConditions, ForecastDay, ForecastRequest, LocationLabel, WeatherReport},
};

use super::WeatherProvider;

/// Client for the World Weather Online `weather.ashx` endpoint.
#[derive(Debug, Clone)]
pub struct WorldWeatherOnline {
    api_key: ApiKey,
    base_url: String,
    http: Client,
}

impl WorldWeatherOnline {
    pub fn new(api_key: ApiKey) -> Result<Self, WeatherError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_options(
        api_key: ApiKey,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wwo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherError::unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { api_key, base_url: base_url.into(), http })
    }

    /// One GET, no retries.
    #[instrument(skip(self), fields(location = %request.location, days = %request.days))]
    pub async fn fetch(&self, request: &ForecastRequest) -> Result<WeatherReport, WeatherError> {
        if self.api_key.is_placeholder() {
            warn!("API key is unset; not contacting World Weather Online");
            return Err(WeatherError::MissingApiKey);
        }

        let days = request.days.to_string();
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.location.as_str()),
                ("format", "json"),
                ("num_of_days", days.as_str()),
                ("tp", "24"),
                ("includelocation", "yes"),
                ("cc", "yes"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request to World Weather Online failed");
                WeatherError::from(e)
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "World Weather Online returned an error status");
            return Err(WeatherError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        debug!(bytes = body.len(), "Received weather response");

        let report = parse_report(&body, &request.location)?;
        info!(label = %report.location, days = report.days.len(), "Forecast received");
        Ok(report)
    }
}

#[async_trait]
impl WeatherProvider for WorldWeatherOnline {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<WeatherReport, WeatherError> {
        self.fetch(request).await
    }
}

/// Decode a `weather.ashx` JSON body into a report. `requested` is the
/// location as the user typed it, used when the reverse geocode is unusable.
pub fn parse_report(body: &str, requested: &str) -> Result<WeatherReport, WeatherError> {
    let envelope: WwoEnvelope = serde_json::from_str(body).map_err(|e| {
        WeatherError::unexpected(format!(
            "Failed to parse World Weather Online JSON: {e} (body: {})",
            truncate_body(body)
        ))
    })?;

    envelope.data.into_report(requested)
}

#[derive(Debug, Deserialize)]
struct WwoEnvelope {
    data: WwoPayload,
}

#[derive(Debug, Deserialize)]
struct WwoPayload {
    error: Option<Vec<WwoMessage>>,

    #[serde(default)]
    current_condition: Vec<WwoCurrent>,

    #[serde(default)]
    weather: Vec<WwoDay>,

    // Only feeds the display label, so a malformed value degrades to "absent".
    #[serde(default, deserialize_with = "lenient")]
    nearest_area: Vec<WwoArea>,
}

#[derive(Debug, Deserialize)]
struct WwoMessage {
    msg: String,
}

#[derive(Debug, Deserialize)]
struct WwoText {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WwoCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    #[serde(rename = "winddir16Point")]
    winddir_16point: String,
    #[serde(rename = "uvIndex")]
    uv_index: String,
    visibility: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WwoText>,
}

#[derive(Debug, Deserialize)]
struct WwoDay {
    date: String,
    #[serde(rename = "maxtempC")]
    max_temp_c: String,
    #[serde(rename = "mintempC")]
    min_temp_c: String,
    #[serde(default)]
    hourly: Vec<WwoHourly>,
}

#[derive(Debug, Deserialize)]
struct WwoHourly {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WwoText>,
    chanceofrain: Option<String>,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    humidity: String,
}

#[derive(Debug, Deserialize)]
struct WwoArea {
    #[serde(rename = "areaName", default)]
    area_name: Vec<WwoText>,
    #[serde(default)]
    country: Vec<WwoText>,
}

impl WwoPayload {
    fn into_report(self, requested: &str) -> Result<WeatherReport, WeatherError> {
        if let Some(errors) = self.error {
            let msg = errors
                .into_iter()
                .next()
                .map(|e| e.msg)
                .unwrap_or_else(|| "unknown error".to_string());
            warn!(%msg, "World Weather Online reported an error");
            return Err(WeatherError::Api(msg));
        }

        let area = self.nearest_area.first();
        let location = LocationLabel::resolve(
            area.and_then(|a| first_value(&a.area_name)),
            area.and_then(|a| first_value(&a.country)),
            requested,
        );

        let current: CurrentConditions = self
            .current_condition
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::unexpected("Response contained no current conditions"))?
            .into();

        if self.weather.is_empty() {
            return Err(WeatherError::EmptyForecast);
        }

        let days = self
            .weather
            .into_iter()
            .map(ForecastDay::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WeatherReport { location, current, days })
    }
}

impl From<WwoCurrent> for CurrentConditions {
    fn from(raw: WwoCurrent) -> Self {
        CurrentConditions {
            description: description_or_unknown(&raw.weather_desc),
            temp_c: raw.temp_c,
            temp_f: raw.temp_f,
            feels_like_c: raw.feels_like_c,
            humidity: raw.humidity,
            wind_mph: raw.windspeed_miles,
            wind_dir_16pt: raw.winddir_16point,
            uv_index: raw.uv_index,
            visibility_km: raw.visibility,
        }
    }
}

impl TryFrom<WwoDay> for ForecastDay {
    type Error = WeatherError;

    fn try_from(raw: WwoDay) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
            .map_err(|e| WeatherError::unexpected(format!("Invalid forecast date '{}': {e}", raw.date)))?;

        let slot = raw.hourly.into_iter().next().ok_or_else(|| {
            WeatherError::unexpected(format!("Forecast for {} contained no hourly data", raw.date))
        })?;

        Ok(ForecastDay {
            date,
            max_temp_c: raw.max_temp_c,
            min_temp_c: raw.min_temp_c,
            description: description_or_unknown(&slot.weather_desc),
            chance_of_rain: slot.chanceofrain,
            wind_mph: slot.windspeed_miles,
            humidity: slot.humidity,
        })
    }
}

fn first_value(texts: &[WwoText]) -> Option<&str> {
    texts.first().map(|t| t.value.as_str())
}

fn description_or_unknown(texts: &[WwoText]) -> String {
    first_value(texts).unwrap_or("Unknown").to_string()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = include_str!("../../tests/fixtures/paris.json");

    #[test]
    fn parses_sample_payload() {
        let report = parse_report(PARIS, "paris").expect("valid payload");

        assert_eq!(report.location.as_str(), "Paris, France");
        assert_eq!(report.current.temp_c, "9");
        assert_eq!(report.current.wind_dir_16pt, "SW");
        assert_eq!(report.current.icon(), "⛅");
        assert_eq!(report.days.len(), 5);
        assert_eq!(report.days[0].formatted_date(), "Sat 24 Feb");
        assert_eq!(report.days[1].chance_of_rain.as_deref(), Some("65"));
    }

    #[test]
    fn api_error_array_becomes_api_error() {
        let body = r#"{"data": {"error": [{"msg": "Unable to find location"}]}}"#;
        let err = parse_report(body, "Atlantis").unwrap_err();
        assert!(matches!(err, WeatherError::Api(ref m) if m == "Unable to find location"));
    }

    #[test]
    fn empty_error_array_is_still_an_api_error() {
        let err = parse_report(r#"{"data": {"error": []}}"#, "x").unwrap_err();
        assert!(matches!(err, WeatherError::Api(_)));
    }

    #[test]
    fn missing_nearest_area_falls_back_to_input() {
        let mut json: serde_json::Value = serde_json::from_str(PARIS).unwrap();
        json["data"].as_object_mut().unwrap().remove("nearest_area");

        let report = parse_report(&json.to_string(), "48.85,2.35").unwrap();
        assert_eq!(report.location.as_str(), "48.85,2.35");
    }

    #[test]
    fn malformed_nearest_area_falls_back_to_input() {
        let mut json: serde_json::Value = serde_json::from_str(PARIS).unwrap();
        json["data"]["nearest_area"] = serde_json::json!([{ "areaName": "Paris", "country": 7 }]);

        let report = parse_report(&json.to_string(), "paris").unwrap();
        assert_eq!(report.location.as_str(), "paris");
    }

    #[test]
    fn missing_chance_of_rain_is_none() {
        let mut json: serde_json::Value = serde_json::from_str(PARIS).unwrap();
        json["data"]["weather"][2]["hourly"][0].as_object_mut().unwrap().remove("chanceofrain");

        let report = parse_report(&json.to_string(), "paris").unwrap();
        assert_eq!(report.days[2].chance_of_rain, None);
    }

    #[test]
    fn zero_forecast_days_is_reported() {
        let mut json: serde_json::Value = serde_json::from_str(PARIS).unwrap();
        json["data"]["weather"] = serde_json::json!([]);

        let err = parse_report(&json.to_string(), "paris").unwrap_err();
        assert!(matches!(err, WeatherError::EmptyForecast));
    }

    #[test]
    fn missing_current_conditions_is_unexpected() {
        let mut json: serde_json::Value = serde_json::from_str(PARIS).unwrap();
        json["data"]["current_condition"] = serde_json::json!([]);

        let err = parse_report(&json.to_string(), "paris").unwrap_err();
        assert!(matches!(err, WeatherError::Unexpected(_)));
    }

    #[test]
    fn garbage_body_is_unexpected() {
        let err = parse_report("<html>oops</html>", "paris").unwrap_err();
        assert!(matches!(err, WeatherError::Unexpected(ref m) if m.contains("<html>")));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
