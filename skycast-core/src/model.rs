use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

/// Upper bound the forecast provider accepts for `forecast_days`.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::invalid_input(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::invalid_input(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A place returned by the geocoder, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// First-level administrative area (state, region), when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Name, Region, Country", skipping empty parts.
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(region) = self.admin1.as_deref().filter(|r| !r.is_empty() && *r != self.name) {
            parts.push(region);
        }
        if !self.country.is_empty() {
            parts.push(self.country.as_str());
        }
        parts.join(", ")
    }
}

/// What to ask the forecast provider for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastOptions {
    pub include_hourly: bool,
    pub include_daily: bool,
    pub forecast_days: u8,
    /// IANA zone name, or "auto" to let the provider infer it from coordinates.
    pub timezone: String,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            include_hourly: true,
            include_daily: true,
            forecast_days: 7,
            timezone: "auto".to_string(),
        }
    }
}

impl ForecastOptions {
    pub fn validate(&self) -> Result<()> {
        if self.forecast_days == 0 || self.forecast_days > MAX_FORECAST_DAYS {
            return Err(WeatherError::invalid_input(format!(
                "forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.forecast_days
            )));
        }
        if self.timezone.trim().is_empty() {
            return Err(WeatherError::invalid_input("timezone must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// Degrees, 0..=359.
    pub wind_direction: u16,
    pub weather_code: i32,
    /// Provider-local wall-clock time of the observation.
    pub observed_at: NaiveDateTime,
}

/// Parallel hourly sequences. Index `i` of every field refers to `time[i]`.
///
/// Individual values may be missing when the provider has no data for that hour.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<Option<f64>>,
    pub relative_humidity: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub wind_speed: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Length of every field, labelled, in request order.
    pub fn field_lengths(&self) -> [(&'static str, usize); 7] {
        [
            ("time", self.time.len()),
            ("temperature_2m", self.temperature.len()),
            ("relativehumidity_2m", self.relative_humidity.len()),
            ("apparent_temperature", self.apparent_temperature.len()),
            ("precipitation_probability", self.precipitation_probability.len()),
            ("weathercode", self.weather_code.len()),
            ("windspeed_10m", self.wind_speed.len()),
        ]
    }
}

/// Parallel daily sequences, index 0 being today.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<NaiveDateTime>>,
    pub sunset: Vec<Option<NaiveDateTime>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn field_lengths(&self) -> [(&'static str, usize); 6] {
        [
            ("time", self.time.len()),
            ("weathercode", self.weather_code.len()),
            ("temperature_2m_max", self.temperature_max.len()),
            ("temperature_2m_min", self.temperature_min.len()),
            ("sunrise", self.sunrise.len()),
            ("sunset", self.sunset.len()),
        ]
    }
}

/// One forecast fetch. Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub current: CurrentConditions,
    pub hourly: Option<HourlySeries>,
    pub daily: Option<DailySeries>,
    /// Set only for lookups that started from a place name.
    pub location: Option<LocationCandidate>,
    pub timezone: Option<String>,
    pub utc_offset_seconds: Option<i32>,
}

impl ForecastResult {
    pub fn with_location(self, location: LocationCandidate) -> Self {
        Self { location: Some(location), ..self }
    }
}
