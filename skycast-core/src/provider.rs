use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{
    Config, WeatherLookup,
    config::HttpConfig,
    error::{Result, WeatherError},
    model::{Coordinates, ForecastOptions, ForecastResult, LocationCandidate},
};

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

/// Resolves free text to candidate places.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Candidates in provider order. An empty match is `NoResults`, never `Ok(vec![])`.
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>>;
}

/// Fetches forecasts for a point.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, coords: Coordinates, options: &ForecastOptions)
    -> Result<ForecastResult>;
}

/// Build the HTTP client shared by both Open-Meteo clients.
pub fn build_http_client(http: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(http.user_agent.as_str())
        .build()
}

/// Construct the city/coordinate lookup wired to Open-Meteo, from config.
pub fn lookup_from_config(config: &Config) -> anyhow::Result<WeatherLookup> {
    config.validate()?;

    let http = build_http_client(&config.http).context("Failed to build HTTP client")?;

    let geocoder = OpenMeteoGeocoder::new(http.clone(), &config.endpoints.geocoding)
        .with_count(config.geocoding.count)
        .with_language(&config.geocoding.language);
    let forecast = OpenMeteoForecast::new(http, &config.endpoints.forecast);

    Ok(WeatherLookup::new(geocoder, forecast).with_options(config.forecast.clone()))
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Read a response body, turning error statuses and flagged error bodies into
/// `WeatherError::Provider`.
async fn read_body(res: Response, endpoint: &str) -> Result<String> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        tracing::warn!(endpoint, status = status.as_u16(), "provider returned error status");
        return Err(WeatherError::Provider {
            status: status.as_u16(),
            message: provider_reason(&body).unwrap_or_else(|| truncate_body(&body)),
        });
    }

    if let Some(reason) = provider_reason(&body) {
        tracing::warn!(endpoint, %reason, "provider flagged response as error");
        return Err(WeatherError::Provider { status: status.as_u16(), message: reason });
    }

    Ok(body)
}

fn provider_reason(body: &str) -> Option<String> {
    serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .filter(|b| b.error)
        .map(|b| b.reason.unwrap_or_else(|| "unspecified provider error".to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_reason_only_for_flagged_bodies() {
        let flagged = r#"{"error": true, "reason": "Latitude must be in range of -90 to 90°."}"#;
        assert_eq!(
            provider_reason(flagged).as_deref(),
            Some("Latitude must be in range of -90 to 90°.")
        );

        assert_eq!(
            provider_reason(r#"{"error": true}"#).as_deref(),
            Some("unspecified provider error")
        );
        assert_eq!(provider_reason(r#"{"results": []}"#), None);
        assert_eq!(provider_reason("<html>bad gateway</html>"), None);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn lookup_from_default_config_builds() {
        let cfg = Config::default();
        let lookup = lookup_from_config(&cfg).expect("default config must be usable");
        assert_eq!(lookup.options().forecast_days, 7);
    }

    #[test]
    fn lookup_from_config_rejects_invalid_settings() {
        let mut cfg = Config::default();
        cfg.geocoding.count = 0;

        let err = lookup_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("geocoding.count"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        assert_eq!(trim_base_url("http://localhost:1234/v1/"), "http://localhost:1234/v1");
        assert_eq!(trim_base_url("http://localhost:1234"), "http://localhost:1234");
    }
}
