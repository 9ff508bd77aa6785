//! City-name and coordinate lookups composed from a geocoder and a forecast source.

use tracing::{debug, info, instrument};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinates, ForecastOptions, ForecastResult, LocationCandidate},
    provider::{ForecastSource, Geocoder},
};

/// Stateless after construction; every call performs fresh requests.
#[derive(Debug)]
pub struct WeatherLookup {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastSource>,
    options: ForecastOptions,
}

impl WeatherLookup {
    pub fn new(
        geocoder: impl Geocoder + 'static,
        forecast: impl ForecastSource + 'static,
    ) -> Self {
        Self {
            geocoder: Box::new(geocoder),
            forecast: Box::new(forecast),
            options: ForecastOptions::default(),
        }
    }

    /// Options used by [`by_city`](Self::by_city) and [`by_coords`](Self::by_coords).
    pub fn with_options(mut self, options: ForecastOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ForecastOptions {
        &self.options
    }

    /// Candidate places for `query`, straight from the geocoder.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        self.geocoder.search(query).await
    }

    pub async fn by_city(&self, name: &str) -> Result<ForecastResult> {
        self.by_city_with(name, &self.options).await
    }

    /// Geocode `name`, take the first candidate, and fetch its forecast.
    ///
    /// `NoResults` from the geocoder becomes `LocationNotFound`; every other
    /// error passes through unchanged.
    #[instrument(skip(self, options), level = "debug")]
    pub async fn by_city_with(
        &self,
        name: &str,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        let candidates = match self.geocoder.search(name).await {
            Err(WeatherError::NoResults { query }) => {
                return Err(WeatherError::LocationNotFound { query });
            }
            other => other?,
        };

        let chosen = candidates
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound { query: name.trim().to_string() })?;

        info!(location = %chosen.label(), "resolved city");

        let result = self.forecast.fetch(chosen.coordinates()?, options).await?;
        Ok(result.with_location(chosen))
    }

    pub async fn by_coords(&self, latitude: f64, longitude: f64) -> Result<ForecastResult> {
        self.by_coords_with(latitude, longitude, &self.options).await
    }

    /// Forecast for raw coordinates. No location metadata is attached.
    #[instrument(skip(self, options), level = "debug")]
    pub async fn by_coords_with(
        &self,
        latitude: f64,
        longitude: f64,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        let coords = Coordinates::new(latitude, longitude)?;
        debug!("fetching forecast for coordinates");
        self.forecast.fetch(coords, options).await
    }

    /// Forecast for an already resolved place, e.g. a saved home location.
    pub async fn by_location(
        &self,
        location: &LocationCandidate,
        options: &ForecastOptions,
    ) -> Result<ForecastResult> {
        let result = self.forecast.fetch(location.coordinates()?, options).await?;
        Ok(result.with_location(location.clone()))
    }
}
