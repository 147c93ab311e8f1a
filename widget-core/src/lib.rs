//! Core library for the weather widget.
//!
//! This crate defines:
//! - The localization table and unit registry
//! - The weather source abstraction and its OpenWeather client
//! - The widget controller and the view-state it exposes
//!
//! It is used by `widget-cli`, but any host that can render the view-state
//! (terminal, GUI toolkit, status bar) can embed it.

pub mod config;
pub mod controller;
pub mod locale;
pub mod model;
pub mod source;
pub mod units;

pub use config::{StoredConfig, WidgetConfig};
pub use controller::{FetchTicket, Phase, ViewState, WidgetController};
pub use locale::{Language, Strings};
pub use model::{LocationSelector, WeatherReading};
pub use source::{FetchError, WeatherSource, openweather::OpenWeatherClient};
pub use units::UnitSystem;
