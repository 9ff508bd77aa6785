use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    model::{
        Coordinates, CurrentConditions, DailySeries, ForecastOptions, ForecastResult, HourlySeries,
    },
};

use super::{ForecastSource, read_body, trim_base_url};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";

/// Hourly variables requested from the provider, in this order.
pub const HOURLY_FIELDS: [&str; 6] = [
    "temperature_2m",
    "relativehumidity_2m",
    "apparent_temperature",
    "precipitation_probability",
    "weathercode",
    "windspeed_10m",
];

/// Daily variables requested from the provider, in this order.
pub const DAILY_FIELDS: [&str; 5] =
    ["weathercode", "temperature_2m_max", "temperature_2m_min", "sunrise", "sunset"];

/// Open-Meteo forecast: `GET {base}/forecast`.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self { http, base_url: trim_base_url(base_url) }
    }

    #[instrument(
        skip(self, options),
        level = "debug",
        fields(lat = coords.latitude(), lon = coords.longitude())
    )]
    pub async fn fetch(
        &self,
        coords: Coordinates,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        options.validate()?;

        let url = format!("{}/forecast", self.base_url);
        debug!(%url, days = options.forecast_days, "sending forecast request");

        let res = self.http.get(&url).query(&query_params(coords, options)).send().await?;
        let body = read_body(res, "forecast").await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(format!("forecast payload: {e}")))?;

        let result = parsed.into_result(options)?;
        debug!(
            hourly = result.hourly.as_ref().map(HourlySeries::len),
            daily = result.daily.as_ref().map(DailySeries::len),
            "forecast parsed"
        );
        Ok(result)
    }
}

fn query_params(coords: Coordinates, options: &ForecastOptions) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("latitude", coords.latitude().to_string()),
        ("longitude", coords.longitude().to_string()),
        ("current_weather", "true".to_string()),
    ];

    if options.include_hourly {
        params.push(("hourly", HOURLY_FIELDS.join(",")));
    }
    if options.include_daily {
        params.push(("daily", DAILY_FIELDS.join(",")));
    }

    params.push(("timezone", options.timezone.clone()));
    params.push(("forecast_days", options.forecast_days.to_string()));
    params
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    timezone: Option<String>,
    utc_offset_seconds: Option<i32>,
    current_weather: Option<OmCurrentWeather>,
    hourly: Option<OmHourly>,
    daily: Option<OmDaily>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: f64,
    time: String,
}

// Every field is optional so a missing one is reported by name.
#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(alias = "relative_humidity_2m")]
    relativehumidity_2m: Option<Vec<Option<f64>>>,
    apparent_temperature: Option<Vec<Option<f64>>>,
    precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(alias = "weather_code")]
    weathercode: Option<Vec<Option<f64>>>,
    #[serde(alias = "wind_speed_10m")]
    windspeed_10m: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Option<Vec<String>>,
    #[serde(alias = "weather_code")]
    weathercode: Option<Vec<Option<f64>>>,
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
    sunrise: Option<Vec<Option<String>>>,
    sunset: Option<Vec<Option<String>>>,
}

impl OmForecastResponse {
    fn into_result(self, options: &ForecastOptions) -> Result<ForecastResult> {
        let current = require(self.current_weather, "current_weather")?.into_conditions()?;

        let hourly = if options.include_hourly {
            Some(require(self.hourly, "hourly")?.into_series()?)
        } else {
            None
        };

        let daily = if options.include_daily {
            Some(require(self.daily, "daily")?.into_series()?)
        } else {
            None
        };

        Ok(ForecastResult {
            current,
            hourly,
            daily,
            location: None,
            timezone: self.timezone,
            utc_offset_seconds: self.utc_offset_seconds,
        })
    }
}

impl OmCurrentWeather {
    fn into_conditions(self) -> Result<CurrentConditions> {
        Ok(CurrentConditions {
            temperature: self.temperature,
            wind_speed: self.windspeed,
            wind_direction: (self.winddirection.round() as i64).rem_euclid(360) as u16,
            weather_code: self.weathercode.round() as i32,
            observed_at: parse_timestamp(&self.time, "current_weather.time")?,
        })
    }
}

impl OmHourly {
    fn into_series(self) -> Result<HourlySeries> {
        let series = HourlySeries {
            time: require(self.time, "hourly.time")?
                .iter()
                .map(|t| parse_timestamp(t, "hourly.time"))
                .collect::<Result<_>>()?,
            temperature: require(self.temperature_2m, "hourly.temperature_2m")?,
            relative_humidity: require(self.relativehumidity_2m, "hourly.relativehumidity_2m")?,
            apparent_temperature: require(
                self.apparent_temperature,
                "hourly.apparent_temperature",
            )?,
            precipitation_probability: require(
                self.precipitation_probability,
                "hourly.precipitation_probability",
            )?,
            weather_code: to_codes(require(self.weathercode, "hourly.weathercode")?),
            wind_speed: require(self.windspeed_10m, "hourly.windspeed_10m")?,
        };

        ensure_aligned("hourly", &series.field_lengths())?;
        Ok(series)
    }
}

impl OmDaily {
    fn into_series(self) -> Result<DailySeries> {
        let series = DailySeries {
            time: require(self.time, "daily.time")?
                .iter()
                .map(|d| {
                    NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|e| {
                        WeatherError::malformed(format!("daily.time value '{d}': {e}"))
                    })
                })
                .collect::<Result<_>>()?,
            weather_code: to_codes(require(self.weathercode, "daily.weathercode")?),
            temperature_max: require(self.temperature_2m_max, "daily.temperature_2m_max")?,
            temperature_min: require(self.temperature_2m_min, "daily.temperature_2m_min")?,
            sunrise: parse_optional_timestamps(
                require(self.sunrise, "daily.sunrise")?,
                "daily.sunrise",
            )?,
            sunset: parse_optional_timestamps(
                require(self.sunset, "daily.sunset")?,
                "daily.sunset",
            )?,
        };

        ensure_aligned("daily", &series.field_lengths())?;
        Ok(series)
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| WeatherError::malformed(format!("missing field '{field}'")))
}

/// The first entry is the time axis; every other series must match it.
fn ensure_aligned(block: &str, lengths: &[(&'static str, usize)]) -> Result<()> {
    let Some(&(_, expected)) = lengths.first() else {
        return Ok(());
    };

    if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != expected) {
        return Err(WeatherError::malformed(format!(
            "{block}.{field} has {len} entries, expected {expected}"
        )));
    }

    Ok(())
}

fn to_codes(values: Vec<Option<f64>>) -> Vec<Option<i32>> {
    values.into_iter().map(|v| v.map(|code| code.round() as i32)).collect()
}

fn parse_timestamp(value: &str, field: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::malformed(format!("{field} value '{value}': {e}")))
}

fn parse_optional_timestamps(
    values: Vec<Option<String>>,
    field: &str,
) -> Result<Vec<Option<NaiveDateTime>>> {
    values
        .into_iter()
        .map(|v| v.map(|s| parse_timestamp(&s, field)).transpose())
        .collect()
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn fetch(
        &self,
        coords: Coordinates,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        OpenMeteoForecast::fetch(self, coords, options).await
    }
}
