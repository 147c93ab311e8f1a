//! The widget controller: owns one instance's configuration and view-state
//! and drives the `Idle → Loading → {Success, Error}` fetch lifecycle.
//!
//! The presentation layer only ever reads [`ViewState`] and calls back into
//! [`WidgetController::reload`], [`WidgetController::open_settings`] and
//! [`WidgetController::commit_new_location`]. Every failure ends up as a
//! localized string in the view-state; nothing here panics or propagates.

use chrono::Local;
use tracing::{debug, warn};

use crate::{
    config::WidgetConfig,
    locale::{self, Language, Strings},
    model::{LocationSelector, WeatherReading},
    source::{self, FetchError, WeatherSource},
    units::UnitSystem,
};

/// Fetch lifecycle phase. Never two at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// The renderable snapshot of the controller, recomputed on every
/// transition. The settings overlay is orthogonal to the fetch phase.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub phase: Phase,
    /// Last successful reading. Kept in memory across a failure, but the
    /// `Error` phase means it is not displayed.
    pub reading: Option<WeatherReading>,
    pub error_text: Option<String>,
    /// Localized "<prefix> HH:MM" line for the last successful fetch.
    pub updated_at: Option<String>,
    pub settings_open: bool,
    /// Text buffer behind the settings form input.
    pub pending_location: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            reading: None,
            error_text: None,
            updated_at: None,
            settings_open: false,
            pending_location: String::new(),
        }
    }
}

/// Handle for one issued fetch. [`WidgetController::finish_reload`] uses the
/// embedded sequence number to discard completions that a newer reload has
/// superseded.
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    selector: LocationSelector,
}

impl FetchTicket {
    pub fn selector(&self) -> &LocationSelector {
        &self.selector
    }
}

pub struct WidgetController {
    config: WidgetConfig,
    language: Language,
    strings: &'static Strings,
    units: UnitSystem,
    source: Box<dyn WeatherSource>,
    view: ViewState,
    fetch_seq: u64,
}

impl WidgetController {
    /// Create a widget instance. Resolves the language from the configured
    /// override or the platform locale, which also fixes the default unit
    /// system. The view starts idle; call [`Self::start`] to fetch.
    pub fn new(config: WidgetConfig, source: Box<dyn WeatherSource>) -> Self {
        let language =
            locale::resolve_language(config.locale.as_deref(), locale::platform_locale().as_deref());

        Self {
            strings: language.strings(),
            units: language.default_units(),
            language,
            config,
            source,
            view: ViewState::default(),
            fetch_seq: 0,
        }
    }

    /// Replace the locale-derived unit system.
    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    /// Initial load: a widget fetches as soon as it is created, with
    /// whatever location was configured declaratively.
    pub async fn start(&mut self) {
        self.reload(None).await;
    }

    /// Full reload cycle: guard, fetch, settle.
    pub async fn reload(&mut self, city_override: Option<String>) {
        let Some(ticket) = self.begin_reload(city_override) else {
            return;
        };

        let outcome = self
            .source
            .fetch_reading(&ticket.selector, self.units, &self.config.app_id)
            .await;

        self.finish_reload(ticket, outcome);
    }

    /// First half of a reload. Applies the city override, resolves the
    /// location selector and moves the view to `Loading`.
    ///
    /// Returns `None` when no location is resolvable: the view goes straight
    /// to `Error` with the localized configuration message and no request
    /// must be issued.
    ///
    /// Public so reactive hosts can run the fetch on their own executor and
    /// hand the outcome back to [`Self::finish_reload`].
    pub fn begin_reload(&mut self, city_override: Option<String>) -> Option<FetchTicket> {
        if let Some(city) = city_override {
            // Replaces the name selector only; a configured city id keeps
            // precedence over it.
            self.config.city = Some(city);
        }

        let Some(selector) = self.config.selector() else {
            warn!("reload requested without a resolvable location");
            self.view.error_text = Some(self.strings.config_error.to_string());
            self.view.phase = Phase::Error;
            return None;
        };

        self.fetch_seq += 1;
        self.view.error_text = None;
        self.view.phase = Phase::Loading;

        debug!(seq = self.fetch_seq, ?selector, "fetch issued");

        Some(FetchTicket {
            seq: self.fetch_seq,
            selector,
        })
    }

    /// Second half of a reload: apply a settled fetch to the view.
    ///
    /// A stale ticket (a newer reload was issued since) is discarded
    /// wholesale. For a live ticket both arms leave `Loading`; there is no
    /// path out of this function that keeps the spinner up.
    pub fn finish_reload(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<WeatherReading, FetchError>,
    ) {
        if ticket.seq != self.fetch_seq {
            debug!(seq = ticket.seq, current = self.fetch_seq, "discarding superseded fetch");
            return;
        }

        match outcome {
            Ok(mut reading) => {
                reading.city_display_name = source::resolve_display_name(
                    self.config.city.as_deref(),
                    &reading.city_display_name,
                );
                if matches!(ticket.selector, LocationSelector::ByName(_)) {
                    // Keep the configured name in sync with what we display,
                    // so the next lookup uses the authoritative spelling.
                    self.config.city = Some(reading.city_display_name.clone());
                }

                self.view.updated_at = Some(format!(
                    "{} {}",
                    self.strings.updated_time_prefix,
                    Local::now().format("%H:%M")
                ));
                self.view.reading = Some(reading);
                self.view.error_text = None;
                self.view.phase = Phase::Success;
            }
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                self.view.error_text = Some(self.strings.server_error.to_string());
                self.view.phase = Phase::Error;
            }
        }
    }

    /// Open the settings overlay. Pure view-state toggle, no fetch.
    pub fn open_settings(&mut self) {
        self.view.settings_open = true;
    }

    /// Update the settings form buffer.
    pub fn set_pending_location(&mut self, text: impl Into<String>) {
        self.view.pending_location = text.into();
    }

    /// Commit the settings form: reload with the new city, then clear the
    /// buffer and close the overlay whatever the outcome was, including the
    /// configuration-error guard.
    pub async fn commit_new_location(&mut self, new_city: String) {
        self.reload(Some(new_city)).await;
        self.view.pending_location.clear();
        self.view.settings_open = false;
    }
}
