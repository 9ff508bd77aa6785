use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    model::LocationCandidate,
};

use super::{Geocoder, read_body, trim_base_url};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_RESULT_COUNT: u8 = 5;

/// Open-Meteo geocoding: `GET {base}/search`.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
    count: u8,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base_url(base_url),
            count: DEFAULT_RESULT_COUNT,
            language: "en".to_string(),
        }
    }

    /// Page size; the provider never returns more than this many candidates.
    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::invalid_input("search query must not be empty"));
        }
        if self.count == 0 {
            return Err(WeatherError::invalid_input("result count must be at least 1"));
        }

        let url = format!("{}/search", self.base_url);
        let count = self.count.to_string();
        debug!(%url, count = self.count, "sending geocoding request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = read_body(res, "geocoding").await?;

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(format!("geocoding payload: {e}")))?;

        let places = parsed.results.unwrap_or_default();
        if places.is_empty() {
            debug!("geocoding returned no results");
            return Err(WeatherError::NoResults { query: query.to_string() });
        }

        let candidates = places
            .into_iter()
            .take(usize::from(self.count))
            .map(GeoPlace::into_candidate)
            .collect::<Result<Vec<_>>>()?;

        debug!(results = candidates.len(), "geocoding resolved");
        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoPlace>>,
}

#[derive(Debug, Deserialize)]
struct GeoPlace {
    name: String,
    country: Option<String>,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl GeoPlace {
    // Strict on purpose: one candidate with impossible coordinates means the
    // whole page is untrustworthy, so the search fails even if the first is valid.
    fn into_candidate(self) -> Result<LocationCandidate> {
        let candidate = LocationCandidate {
            name: self.name,
            country: self.country.unwrap_or_default(),
            admin1: self.admin1,
            latitude: self.latitude,
            longitude: self.longitude,
        };

        candidate.coordinates().map_err(|_| {
            WeatherError::malformed(format!(
                "geocoding result '{}' has invalid coordinates ({}, {})",
                candidate.name, candidate.latitude, candidate.longitude
            ))
        })?;

        Ok(candidate)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        OpenMeteoGeocoder::search(self, query).await
    }
}
