use crate::{
    model::{LocationSelector, WeatherReading},
    units::UnitSystem,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Failure of one remote lookup. Every variant is recoverable: the
/// controller surfaces it as a localized display string and nothing else.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("weather service response was malformed: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Fetch the current reading for one location. No shared state is
    /// mutated; the caller decides what to do with the result.
    async fn fetch_reading(
        &self,
        selector: &LocationSelector,
        units: UnitSystem,
        app_id: &str,
    ) -> Result<WeatherReading, FetchError>;
}

/// Decide which display name to keep after a successful fetch.
///
/// The reported name replaces the current one only when it is NOT already a
/// case-insensitive substring of the current name. Keeps the displayed name
/// stable when the service echoes back a shorter form of what the user typed.
pub fn resolve_display_name(current: Option<&str>, reported: &str) -> String {
    match current {
        Some(current) if current.to_lowercase().contains(&reported.to_lowercase()) => {
            current.to_string()
        }
        _ => reported.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_reported_name_is_adopted() {
        // The configured name is contained in the reported one.
        assert_eq!(resolve_display_name(Some("NEW YORK"), "New York City"), "New York City");
    }

    #[test]
    fn shorter_reported_name_is_ignored() {
        // The reported name is contained in the configured one.
        assert_eq!(resolve_display_name(Some("New York City"), "New York"), "New York City");
    }

    #[test]
    fn identical_name_keeps_configured_casing() {
        assert_eq!(resolve_display_name(Some("rome"), "Rome"), "rome");
    }

    #[test]
    fn unrelated_name_is_adopted() {
        assert_eq!(resolve_display_name(Some("Rome"), "Fiumicino"), "Fiumicino");
    }

    #[test]
    fn missing_current_name_adopts_reported() {
        assert_eq!(resolve_display_name(None, "Paris"), "Paris");
    }
}
