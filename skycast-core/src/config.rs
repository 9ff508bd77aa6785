use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    model::{ForecastOptions, LocationCandidate, MAX_FORECAST_DAYS},
    provider::{forecast::DEFAULT_FORECAST_URL, geocoding::DEFAULT_GEOCODING_URL},
};

/// Base URLs of the two provider endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast: String,
    pub geocoding: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: DEFAULT_FORECAST_URL.to_string(),
            geocoding: DEFAULT_GEOCODING_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Maximum number of candidates per search.
    pub count: u8,
    pub language: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self { count: 5, language: "en".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("skycast/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [forecast]
/// forecast_days = 3
///
/// [home]
/// name = "Ilorin"
/// country = "Nigeria"
/// latitude = 8.4966
/// longitude = 4.5421
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub forecast: ForecastOptions,
    pub geocoding: GeocodingConfig,
    pub http: HttpConfig,

    /// Stand-in for device geolocation: the place `skycast here` reports on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<LocationCandidate>,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
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
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast.forecast_days == 0 || self.forecast.forecast_days > MAX_FORECAST_DAYS {
            bail!(
                "Invalid forecast.forecast_days = {}: must be between 1 and {MAX_FORECAST_DAYS}.",
                self.forecast.forecast_days
            );
        }
        if self.forecast.timezone.trim().is_empty() {
            bail!("Invalid forecast.timezone: must not be empty (use \"auto\" to infer it).");
        }
        if self.geocoding.count == 0 || self.geocoding.count > 100 {
            bail!(
                "Invalid geocoding.count = {}: must be between 1 and 100.",
                self.geocoding.count
            );
        }
        if self.geocoding.language.trim().is_empty() {
            bail!("Invalid geocoding.language: must not be empty.");
        }
        if self.http.timeout_secs == 0 {
            bail!("Invalid http.timeout_secs: must be at least 1.");
        }
        if let Some(home) = &self.home {
            home.coordinates()
                .map_err(|e| anyhow!("Invalid home location '{}': {e}", home.name))?;
        }
        Ok(())
    }

    /// The saved home location, with a hint when none is configured.
    pub fn home_location(&self) -> Result<&LocationCandidate> {
        self.home.as_ref().ok_or_else(|| {
            anyhow!(
                "No home location configured.\n\
                 Hint: run `skycast configure` to pick one."
            )
        })
    }

    pub fn set_home(&mut self, location: LocationCandidate) {
        self.home = Some(location);
    }
}

/// Platform directories shared by the config file and search history.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "skycast", "skycast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
