use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::LocationSelector;

/// Declarative configuration for one widget instance.
///
/// Exactly one of `city`/`city_id` is the active location selector at any
/// time; setting one does not clear the other, and `city_id` wins when both
/// are present.
#[derive(Debug, Clone, Default)]
pub struct WidgetConfig {
    pub city: Option<String>,
    pub city_id: Option<String>,
    /// Application credential; required for any fetch to succeed.
    pub app_id: String,
    /// Optional locale override, e.g. "it-IT".
    pub locale: Option<String>,
}

impl WidgetConfig {
    /// The active location selector, or `None` when neither field resolves
    /// to a usable value.
    pub fn selector(&self) -> Option<LocationSelector> {
        if let Some(id) = self.city_id.as_deref().filter(|s| !s.trim().is_empty()) {
            return Some(LocationSelector::ById(id.to_string()));
        }

        self.city
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|city| LocationSelector::ByName(city.to_string()))
    }
}

/// Host-side defaults stored on disk, so the credential does not have to be
/// supplied on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredConfig {
    pub app_id: Option<String>,
    pub city: Option<String>,
    pub city_id: Option<String>,
    pub locale: Option<String>,
    /// Unit system name, parsed with `UnitSystem::try_from`.
    pub units: Option<String>,
}

impl StoredConfig {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: StoredConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "widget-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Build a widget configuration, letting explicit values override the
    /// stored defaults. Only the credential is mandatory.
    pub fn widget_config(
        &self,
        city: Option<String>,
        city_id: Option<String>,
        app_id: Option<String>,
        locale: Option<String>,
    ) -> Result<WidgetConfig> {
        let app_id = app_id.or_else(|| self.app_id.clone()).ok_or_else(|| {
            anyhow!(
                "No API credential configured.\n\
                 Hint: run `widget configure` first, or pass --app-id."
            )
        })?;

        Ok(WidgetConfig {
            city: city.or_else(|| self.city.clone()),
            city_id: city_id.or_else(|| self.city_id.clone()),
            app_id,
            locale: locale.or_else(|| self.locale.clone()),
        })
    }
}
