use anyhow::Context;
use clap::{Parser, Subcommand};
use widget_core::{
    OpenWeatherClient, Phase, StoredConfig, Strings, UnitSystem, ViewState, WidgetController,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "widget", version, about = "Weather widget in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API credential and optional defaults.
    Configure,

    /// Show current weather for the configured or given location.
    Show {
        /// City name; falls back to the stored default.
        city: Option<String>,

        /// City identifier; wins over the city name when both are set.
        #[arg(long)]
        city_id: Option<String>,

        /// API credential; falls back to the stored one.
        #[arg(long)]
        app_id: Option<String>,

        /// Locale override, e.g. "it-IT".
        #[arg(long)]
        locale: Option<String>,

        /// Unit system: imperial, metric or absolute.
        #[arg(long)]
        units: Option<String>,

        /// Keep prompting for new locations after the first reading.
        #[arg(long)]
        interactive: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                city_id,
                app_id,
                locale,
                units,
                interactive,
            } => show(city, city_id, app_id, locale, units, interactive).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut stored = StoredConfig::load()?;

    let app_id = inquire::Text::new("API credential (appid):")
        .prompt()
        .context("Failed to read the credential")?;
    stored.app_id = Some(app_id);

    let city = inquire::Text::new("Default city (leave empty to skip):")
        .prompt()
        .context("Failed to read the default city")?;
    if !city.trim().is_empty() {
        stored.city = Some(city);
    }

    let city_id = inquire::Text::new("Default city id (wins over the city; empty to skip):")
        .prompt()
        .context("Failed to read the default city id")?;
    if !city_id.trim().is_empty() {
        stored.city_id = Some(city_id);
    }

    let locale = inquire::Text::new("Locale override, e.g. \"it-IT\" (empty to skip):")
        .prompt()
        .context("Failed to read the locale")?;
    if !locale.trim().is_empty() {
        stored.locale = Some(locale);
    }

    let units = inquire::Text::new("Unit system: imperial, metric or absolute (empty to skip):")
        .prompt()
        .context("Failed to read the unit system")?;
    if !units.trim().is_empty() {
        UnitSystem::try_from(units.as_str())?;
        stored.units = Some(units);
    }

    stored.save()?;
    println!("Saved configuration to {}", StoredConfig::config_file_path()?.display());

    Ok(())
}

async fn show(
    city: Option<String>,
    city_id: Option<String>,
    app_id: Option<String>,
    locale: Option<String>,
    units: Option<String>,
    interactive: bool,
) -> anyhow::Result<()> {
    let stored = StoredConfig::load()?;
    let units = units.or_else(|| stored.units.clone());
    let config = stored.widget_config(city, city_id, app_id, locale)?;

    let mut controller = WidgetController::new(config, Box::new(OpenWeatherClient::new()));
    if let Some(units) = units.as_deref() {
        controller = controller.with_units(UnitSystem::try_from(units)?);
    }

    controller.start().await;
    render(controller.view(), controller.units(), controller.strings());

    if interactive {
        loop {
            let change = inquire::Confirm::new("Change location?")
                .with_default(false)
                .prompt()
                .context("Failed to read the answer")?;
            if !change {
                break;
            }

            controller.open_settings();
            let city = inquire::Text::new(controller.strings().new_location_prompt)
                .prompt()
                .context("Failed to read the new location")?;
            controller.set_pending_location(city.clone());
            controller.commit_new_location(city).await;

            render(controller.view(), controller.units(), controller.strings());
        }
    }

    Ok(())
}

/// Text rendering of the four mutually exclusive view modes.
fn render(view: &ViewState, units: UnitSystem, strings: &Strings) {
    match view.phase {
        Phase::Idle => println!("(idle)"),
        Phase::Loading => println!("Loading..."),
        Phase::Error => println!("! {}", view.error_text.as_deref().unwrap_or_default()),
        Phase::Success => {
            if let Some(reading) = &view.reading {
                println!(
                    "{}  {}{}  {} ({})",
                    reading.city_display_name,
                    reading.temperature,
                    units.symbol(),
                    reading.condition_main,
                    reading.condition_code,
                );
            }
            if let Some(updated_at) = &view.updated_at {
                println!("  {} {}", strings.updated_label, updated_at);
            }
        }
    }
}
