use std::fmt;

use anyhow::Context;
use inquire::{Confirm, CustomType, Select, Text, validator::Validation};
use skycast_core::{Config, LocationCandidate, lookup_from_config, model::MAX_FORECAST_DAYS};

/// Display wrapper so candidates can be listed by `inquire::Select`.
struct Choice(LocationCandidate);

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}, {:.2})", self.0.label(), self.0.latitude, self.0.longitude)
    }
}

/// Interactive setup: home location and forecast defaults.
pub async fn run(mut config: Config) -> anyhow::Result<()> {
    let lookup = lookup_from_config(&config)?;

    let query = Text::new("Home city:")
        .with_help_message("Used by `skycast here`")
        .prompt()
        .context("Failed to read home city")?;

    let candidates = lookup.search(&query).await?;
    let choices = candidates.into_iter().map(Choice).collect::<Vec<_>>();
    let Choice(home) = Select::new("Pick your location:", choices)
        .prompt()
        .context("Failed to read location choice")?;

    let days = CustomType::<u8>::new("Forecast days:")
        .with_default(config.forecast.forecast_days)
        .with_help_message("1 to 16")
        .with_validator(|days: &u8| {
            if (1..=MAX_FORECAST_DAYS).contains(days) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    format!("Must be between 1 and {MAX_FORECAST_DAYS}").into(),
                ))
            }
        })
        .prompt()
        .context("Failed to read forecast days")?;

    let timezone = Text::new("Timezone:")
        .with_default(&config.forecast.timezone)
        .with_help_message("IANA name such as Europe/Oslo, or \"auto\"")
        .prompt()
        .context("Failed to read timezone")?;

    let include_hourly = Confirm::new("Include hourly forecast?")
        .with_default(config.forecast.include_hourly)
        .prompt()
        .context("Failed to read hourly preference")?;

    let include_daily = Confirm::new("Include daily forecast?")
        .with_default(config.forecast.include_daily)
        .prompt()
        .context("Failed to read daily preference")?;

    config.set_home(home);
    config.forecast.forecast_days = days;
    config.forecast.timezone = timezone.trim().to_string();
    config.forecast.include_hourly = include_hourly;
    config.forecast.include_daily = include_daily;

    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
