//! WMO weather interpretation codes, as reported by Open-Meteo.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Human-readable text and icon for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherDescriptor {
    pub description: &'static str,
    pub icon: &'static str,
}

impl WeatherDescriptor {
    const fn new(description: &'static str, icon: &'static str) -> Self {
        Self { description, icon }
    }
}

/// Returned for any code outside the known set.
pub const UNKNOWN: WeatherDescriptor = WeatherDescriptor::new("Unknown", "❓");

const KNOWN_CODES: &[(i32, WeatherDescriptor)] = &[
    (0, WeatherDescriptor::new("Clear sky", "☀️")),
    (1, WeatherDescriptor::new("Mainly clear", "🌤️")),
    (2, WeatherDescriptor::new("Partly cloudy", "⛅")),
    (3, WeatherDescriptor::new("Overcast", "☁️")),
    (45, WeatherDescriptor::new("Fog", "🌫️")),
    (48, WeatherDescriptor::new("Depositing rime fog", "🌫️")),
    (51, WeatherDescriptor::new("Light drizzle", "🌧️")),
    (53, WeatherDescriptor::new("Moderate drizzle", "🌧️")),
    (55, WeatherDescriptor::new("Dense drizzle", "🌧️")),
    (56, WeatherDescriptor::new("Light freezing drizzle", "🌧️")),
    (57, WeatherDescriptor::new("Dense freezing drizzle", "🌧️")),
    (61, WeatherDescriptor::new("Slight rain", "🌦️")),
    (63, WeatherDescriptor::new("Moderate rain", "🌦️")),
    (65, WeatherDescriptor::new("Heavy rain", "🌧️")),
    (66, WeatherDescriptor::new("Light freezing rain", "🌧️")),
    (67, WeatherDescriptor::new("Heavy freezing rain", "🌧️")),
    (71, WeatherDescriptor::new("Slight snow fall", "🌨️")),
    (73, WeatherDescriptor::new("Moderate snow fall", "🌨️")),
    (75, WeatherDescriptor::new("Heavy snow fall", "❄️")),
    (77, WeatherDescriptor::new("Snow grains", "❄️")),
    (80, WeatherDescriptor::new("Slight rain showers", "🌦️")),
    (81, WeatherDescriptor::new("Moderate rain showers", "🌦️")),
    (82, WeatherDescriptor::new("Violent rain showers", "🌧️")),
    (85, WeatherDescriptor::new("Slight snow showers", "🌨️")),
    (86, WeatherDescriptor::new("Heavy snow showers", "❄️")),
    (95, WeatherDescriptor::new("Thunderstorm", "⛈️")),
    (96, WeatherDescriptor::new("Thunderstorm with slight hail", "⛈️")),
    (99, WeatherDescriptor::new("Thunderstorm with heavy hail", "⛈️")),
];

/// Describe a weather code. Total: unknown codes map to [`UNKNOWN`].
pub fn describe(code: i32) -> WeatherDescriptor {
    KNOWN_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, descriptor)| *descriptor)
        .unwrap_or(UNKNOWN)
}

/// Whether `code` belongs to the documented set.
pub fn is_known(code: i32) -> bool {
    KNOWN_CODES.iter().any(|(known, _)| *known == code)
}
