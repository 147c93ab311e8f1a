use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    model::{LocationSelector, WeatherReading},
    units::UnitSystem,
};

use super::{FetchError, WeatherSource};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather "current weather" client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    id: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    weather: Vec<OwCondition>,
    main: OwMain,
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_reading(
        &self,
        selector: &LocationSelector,
        units: UnitSystem,
        app_id: &str,
    ) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/weather", self.base_url);
        let (location_key, location_value) = selector.query_param();

        debug!(location = location_value, units = units.api_key(), "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("units", units.api_key()),
                (location_key, location_value),
                ("appid", app_id),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, "weather request rejected");
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        parse_reading(&body)
    }
}

/// Map the raw response body into a normalized reading.
fn parse_reading(body: &str) -> Result<WeatherReading, FetchError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Malformed("weather condition list is empty".to_string()))?;

    Ok(WeatherReading {
        city_display_name: parsed.name,
        condition_main: condition.main,
        condition_code: condition.id,
        // Truncated toward zero, not rounded.
        temperature: parsed.main.temp as i32,
        observed_at: Local::now(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Walk back to a char boundary so multi-byte text cannot panic the cut.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}
