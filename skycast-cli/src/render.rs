use std::fmt::Write;

use skycast_core::{
    ForecastResult, LocationCandidate,
    display::{self, DEFAULT_PREVIEW_HOURS, NOT_AVAILABLE},
};

fn temp(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |t| format!("{t:.0}°"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("{p:.0}%"))
}

/// Human-readable forecast. `hour_index` selects the hourly slot treated as "now".
pub fn render_forecast(result: &ForecastResult, hour_index: usize) -> String {
    let summary = display::summarize(result, hour_index);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_forecast(&mut out, result, &summary);
    out
}

fn write_forecast(
    out: &mut String,
    result: &ForecastResult,
    summary: &display::CurrentSummary,
) -> std::fmt::Result {
    match &result.location {
        Some(location) => writeln!(out, "📍 {}", location.label())?,
        None => writeln!(out, "📍 Your location")?,
    }
    writeln!(out)?;

    writeln!(
        out,
        "{}  {:.0}°C  {}",
        summary.descriptor.icon, summary.temperature, summary.descriptor.description
    )?;
    writeln!(out, "  Feels like  {:.0}°C", summary.feels_like)?;
    writeln!(out, "  Humidity    {}", display::format_humidity(summary.humidity))?;
    writeln!(
        out,
        "  Wind        {:.0} km/h {} ({}°)",
        summary.wind_speed,
        display::compass_point(summary.wind_direction),
        summary.wind_direction
    )?;

    if result.daily.is_some() {
        writeln!(
            out,
            "  High / Low  {} / {}",
            temp(summary.today_max),
            temp(summary.today_min)
        )?;
        writeln!(out, "  Sunrise     {}", summary.sunrise)?;
        writeln!(out, "  Sunset      {}", summary.sunset)?;
    }

    let preview = display::hourly_preview(result, DEFAULT_PREVIEW_HOURS);
    if !preview.is_empty() {
        writeln!(out)?;
        writeln!(out, "Next hours")?;
        for hour in &preview {
            writeln!(
                out,
                "  {}  {} {:>5}  💧 {}",
                hour.label,
                hour.descriptor.icon,
                temp(hour.temperature),
                percent(hour.precipitation_probability)
            )?;
        }
    }

    let outlook = display::daily_outlook(result);
    if !outlook.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}-day forecast", outlook.len())?;
        for day in &outlook {
            writeln!(
                out,
                "  {:<10} {} {:<30} {:>5} / {}",
                day.label,
                day.descriptor.icon,
                day.descriptor.description,
                temp(day.temperature_max),
                temp(day.temperature_min)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Updated: {}", summary.observed_at.format("%Y-%m-%d %H:%M"))?;
    Ok(())
}

pub fn render_candidates(candidates: &[LocationCandidate]) -> String {
    let mut out = String::new();
    for (i, place) in candidates.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({:.4}, {:.4})",
            i + 1,
            place.label(),
            place.latitude,
            place.longitude
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use skycast_core::{CurrentConditions, DailySeries, HourlySeries};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn result() -> ForecastResult {
        ForecastResult {
            current: CurrentConditions {
                temperature: 21.6,
                wind_speed: 14.0,
                wind_direction: 270,
                weather_code: 2,
                observed_at: at("2024-06-10T09:00"),
            },
            hourly: Some(HourlySeries {
                time: vec![at("2024-06-10T00:00"), at("2024-06-10T01:00")],
                temperature: vec![Some(18.2), Some(17.9)],
                relative_humidity: vec![Some(64.0), None],
                apparent_temperature: vec![Some(17.0), None],
                precipitation_probability: vec![Some(5.0), None],
                weather_code: vec![Some(1), Some(1000)],
                wind_speed: vec![Some(8.0), Some(9.0)],
            }),
            daily: Some(DailySeries {
                time: vec![
                    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
                ],
                weather_code: vec![Some(2), Some(95)],
                temperature_max: vec![Some(24.4), Some(19.0)],
                temperature_min: vec![Some(12.0), None],
                sunrise: vec![Some(at("2024-06-10T04:47")), None],
                sunset: vec![Some(at("2024-06-10T21:33")), None],
            }),
            location: Some(LocationCandidate {
                name: "Ilorin".into(),
                country: "Nigeria".into(),
                admin1: None,
                latitude: 8.4966,
                longitude: 4.5421,
            }),
            timezone: Some("Africa/Lagos".into()),
            utc_offset_seconds: Some(3600),
        }
    }

    #[test]
    fn renders_current_block() {
        let text = render_forecast(&result(), 0);

        assert!(text.starts_with("📍 Ilorin, Nigeria\n"));
        assert!(text.contains("⛅  22°C  Partly cloudy"));
        assert!(text.contains("Feels like  17°C"));
        assert!(text.contains("Humidity    64%"));
        assert!(text.contains("Wind        14 km/h W (270°)"));
        assert!(text.contains("Sunrise     04:47"));
        assert!(text.contains("Updated: 2024-06-10 09:00"));
    }

    #[test]
    fn missing_hour_shows_not_available_humidity() {
        let text = render_forecast(&result(), 1);
        assert!(text.contains("Humidity    N/A"));
        // No apparent temperature for that hour: falls back to the current reading.
        assert!(text.contains("Feels like  22°C"));
    }

    #[test]
    fn renders_hourly_and_daily_sections() {
        let text = render_forecast(&result(), 0);

        assert!(text.contains("Next hours"));
        assert!(text.contains("00:00  🌤️"));
        assert!(text.contains("01:00  ❓"));
        assert!(text.contains("2-day forecast"));
        assert!(text.contains("Today"));
        assert!(text.contains("Tuesday"));
        assert!(text.contains("Thunderstorm"));
    }

    #[test]
    fn coordinate_lookup_without_blocks() {
        let mut r = result();
        r.location = None;
        r.hourly = None;
        r.daily = None;

        let text = render_forecast(&r, 3);
        assert!(text.starts_with("📍 Your location"));
        assert!(text.contains("Humidity    N/A"));
        assert!(!text.contains("Next hours"));
        assert!(!text.contains("Sunrise"));
    }

    #[test]
    fn candidates_are_numbered() {
        let r = result();
        let text = render_candidates(&[r.location.unwrap()]);
        assert_eq!(text, "1. Ilorin, Nigeria (8.4966, 4.5421)\n");
    }
}
