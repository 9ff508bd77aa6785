//! Values derived from a [`ForecastResult`] for presentation.
//!
//! The "current hour" used to index hourly series is the caller's local
//! wall-clock hour, not a match against `hourly.time`. When the caller's zone
//! differs from the forecast's zone the two can disagree; this approximation is
//! kept on purpose.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::{
    codes::{self, WeatherDescriptor},
    model::ForecastResult,
};

/// Shown wherever a value is missing. Never substituted by 0.
pub const NOT_AVAILABLE: &str = "N/A";

/// Hours shown in the short-term preview.
pub const DEFAULT_PREVIEW_HOURS: usize = 8;

/// The caller's local hour, 0..=23.
pub fn local_hour_index() -> usize {
    Local::now().hour() as usize
}

/// Apparent temperature for the current hour, else the current temperature.
pub fn feels_like(result: &ForecastResult, hour_index: usize) -> f64 {
    result
        .hourly
        .as_ref()
        .and_then(|h| h.apparent_temperature.get(hour_index).copied().flatten())
        .unwrap_or(result.current.temperature)
}

/// Relative humidity for the current hour, if the hourly series has it.
pub fn current_humidity(result: &ForecastResult, hour_index: usize) -> Option<f64> {
    result
        .hourly
        .as_ref()
        .and_then(|h| h.relative_humidity.get(hour_index).copied().flatten())
}

pub fn format_humidity(humidity: Option<f64>) -> String {
    humidity.map_or_else(|| NOT_AVAILABLE.to_string(), |h| format!("{h:.0}%"))
}

pub fn sunrise_today(result: &ForecastResult) -> String {
    format_clock(result.daily.as_ref().and_then(|d| d.sunrise.first().copied().flatten()))
}

pub fn sunset_today(result: &ForecastResult) -> String {
    format_clock(result.daily.as_ref().and_then(|d| d.sunset.first().copied().flatten()))
}

/// Today's (max, min), each possibly missing.
pub fn today_range(result: &ForecastResult) -> (Option<f64>, Option<f64>) {
    let Some(daily) = result.daily.as_ref() else {
        return (None, None);
    };
    (
        daily.temperature_max.first().copied().flatten(),
        daily.temperature_min.first().copied().flatten(),
    )
}

fn format_clock(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |t| t.format("%H:%M").to_string())
}

/// 8-point compass name for a bearing in degrees.
pub fn compass_point(degrees: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let sector = ((f64::from(degrees % 360) + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[sector]
}

fn descriptor_for(code: Option<i32>) -> WeatherDescriptor {
    code.map_or(codes::UNKNOWN, codes::describe)
}

/// Current conditions with the derived fields filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSummary {
    pub descriptor: WeatherDescriptor,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: Option<f64>,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub sunrise: String,
    pub sunset: String,
    pub today_max: Option<f64>,
    pub today_min: Option<f64>,
    pub observed_at: NaiveDateTime,
}

pub fn summarize(result: &ForecastResult, hour_index: usize) -> CurrentSummary {
    let (today_max, today_min) = today_range(result);
    CurrentSummary {
        descriptor: codes::describe(result.current.weather_code),
        temperature: result.current.temperature,
        feels_like: feels_like(result, hour_index),
        humidity: current_humidity(result, hour_index),
        wind_speed: result.current.wind_speed,
        wind_direction: result.current.wind_direction,
        sunrise: sunrise_today(result),
        sunset: sunset_today(result),
        today_max,
        today_min,
        observed_at: result.current.observed_at,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    /// "HH:00" style label.
    pub label: String,
    pub temperature: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub descriptor: WeatherDescriptor,
}

/// The first `hours` entries of the hourly series, from hour offset 0.
pub fn hourly_preview(result: &ForecastResult, hours: usize) -> Vec<HourlyEntry> {
    let Some(hourly) = result.hourly.as_ref() else {
        return Vec::new();
    };

    hourly
        .time
        .iter()
        .take(hours)
        .enumerate()
        .map(|(i, time)| HourlyEntry {
            time: *time,
            label: time.format("%H:%M").to_string(),
            temperature: hourly.temperature.get(i).copied().flatten(),
            precipitation_probability: hourly.precipitation_probability.get(i).copied().flatten(),
            descriptor: descriptor_for(hourly.weather_code.get(i).copied().flatten()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    /// "Today" for day 0, otherwise the weekday name.
    pub label: String,
    pub descriptor: WeatherDescriptor,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
}

pub fn daily_outlook(result: &ForecastResult) -> Vec<DailyEntry> {
    let Some(daily) = result.daily.as_ref() else {
        return Vec::new();
    };

    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| DailyEntry {
            date: *date,
            label: if i == 0 { "Today".to_string() } else { date.format("%A").to_string() },
            descriptor: descriptor_for(daily.weather_code.get(i).copied().flatten()),
            temperature_max: daily.temperature_max.get(i).copied().flatten(),
            temperature_min: daily.temperature_min.get(i).copied().flatten(),
        })
        .collect()
}
