use chrono::{DateTime, Local};

/// The variant determining whether a lookup is by city name or by city
/// identifier. Exactly one request parameter is produced per lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelector {
    ByName(String),
    ById(String),
}

impl LocationSelector {
    /// Query parameter pair for the weather API: `q=` by name, `id=` by id.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            LocationSelector::ByName(city) => ("q", city.as_str()),
            LocationSelector::ById(id) => ("id", id.as_str()),
        }
    }
}

/// One normalized observation, produced only by a successful fetch and
/// replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub city_display_name: String,
    pub condition_main: String,
    pub condition_code: i64,
    /// Truncated toward zero, not rounded.
    pub temperature: i32,
    /// Client-local time the reading was received.
    pub observed_at: DateTime<Local>,
}
