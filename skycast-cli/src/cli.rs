use clap::{Args, Parser, Subcommand};
use skycast_core::{Config, ForecastOptions, ForecastResult, RecentSearches, lookup_from_config};

use crate::{configure, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and forecasts from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city name.
    City {
        /// City or place name, e.g. "Ilorin" or "New York".
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        #[command(flatten)]
        forecast: ForecastArgs,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[command(flatten)]
        forecast: ForecastArgs,
    },

    /// Show weather for the configured home location.
    Here {
        #[command(flatten)]
        forecast: ForecastArgs,
    },

    /// List places matching a name.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List recent city searches.
    Recent {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Interactively pick a home location and forecast defaults.
    Configure,
}

/// Per-invocation overrides of the configured forecast options.
#[derive(Debug, Clone, Args)]
pub struct ForecastArgs {
    /// Number of forecast days (1-16).
    #[arg(long)]
    pub days: Option<u8>,

    /// IANA timezone name, or "auto".
    #[arg(long)]
    pub timezone: Option<String>,

    /// Skip the hourly forecast.
    #[arg(long)]
    pub no_hourly: bool,

    /// Skip the daily forecast.
    #[arg(long)]
    pub no_daily: bool,

    /// Print the raw result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ForecastArgs {
    pub fn apply(&self, base: &ForecastOptions) -> ForecastOptions {
        ForecastOptions {
            include_hourly: base.include_hourly && !self.no_hourly,
            include_daily: base.include_daily && !self.no_daily,
            forecast_days: self.days.unwrap_or(base.forecast_days),
            timezone: self.timezone.clone().unwrap_or_else(|| base.timezone.clone()),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure::run(config).await,
            Command::Recent { clear } => show_recent(clear),
            Command::Search { query } => {
                let lookup = lookup_from_config(&config)?;
                let candidates = lookup.search(&query.join(" ")).await?;
                print!("{}", render::render_candidates(&candidates));
                Ok(())
            }
            Command::City { name, forecast } => {
                let lookup = lookup_from_config(&config)?;
                let name = name.join(" ");
                let options = forecast.apply(lookup.options());

                let result = lookup.by_city_with(&name, &options).await?;
                remember_search(name.trim());
                output(&result, &forecast)
            }
            Command::Coords { latitude, longitude, forecast } => {
                let lookup = lookup_from_config(&config)?;
                let options = forecast.apply(lookup.options());

                let result = lookup.by_coords_with(latitude, longitude, &options).await?;
                output(&result, &forecast)
            }
            Command::Here { forecast } => {
                let home = config.home_location()?;
                let lookup = lookup_from_config(&config)?;
                let options = forecast.apply(lookup.options());

                let result = lookup.by_location(home, &options).await?;
                output(&result, &forecast)
            }
        }
    }
}

fn output(result: &ForecastResult, args: &ForecastArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render::render_forecast(result, skycast_core::display::local_hour_index()));
    }
    Ok(())
}

/// History is a convenience; failing to persist it must not fail the lookup.
fn remember_search(city: &str) {
    let saved = RecentSearches::load().and_then(|mut recent| {
        recent.record(city);
        recent.save()
    });

    if let Err(e) = saved {
        tracing::warn!("Could not update recent searches: {e:#}");
    }
}

fn show_recent(clear: bool) -> anyhow::Result<()> {
    let mut recent = RecentSearches::load()?;

    if clear {
        recent.clear();
        recent.save()?;
        println!("Recent searches cleared.");
        return Ok(());
    }

    if recent.is_empty() {
        println!("No recent searches.");
    } else {
        for (i, city) in recent.entries().iter().enumerate() {
            println!("{}. {city}", i + 1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multi_word_city_names_are_joined() {
        let cli = Cli::try_parse_from(["skycast", "city", "New", "York", "--days", "3"]).unwrap();
        match cli.command {
            Command::City { name, forecast } => {
                assert_eq!(name.join(" "), "New York");
                assert_eq!(forecast.days, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["skycast", "coords", "-33.87", "151.21"]).unwrap();
        match cli.command {
            Command::Coords { latitude, longitude, .. } => {
                assert_eq!(latitude, -33.87);
                assert_eq!(longitude, 151.21);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn flags_override_configured_options() {
        let args = ForecastArgs {
            days: Some(2),
            timezone: None,
            no_hourly: true,
            no_daily: false,
            json: false,
        };
        let base = ForecastOptions::default();

        let applied = args.apply(&base);
        assert_eq!(applied.forecast_days, 2);
        assert!(!applied.include_hourly);
        assert!(applied.include_daily);
        assert_eq!(applied.timezone, "auto");
    }

    #[test]
    fn flags_cannot_re_enable_disabled_blocks() {
        let args = ForecastArgs {
            days: None,
            timezone: Some("Europe/Oslo".into()),
            no_hourly: false,
            no_daily: false,
            json: false,
        };
        let base = ForecastOptions { include_daily: false, ..Default::default() };

        let applied = args.apply(&base);
        assert!(!applied.include_daily);
        assert_eq!(applied.timezone, "Europe/Oslo");
        assert_eq!(applied.forecast_days, 7);
    }

    #[test]
    fn city_requires_a_name() {
        assert!(Cli::try_parse_from(["skycast", "city"]).is_err());
    }
}
