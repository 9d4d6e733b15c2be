//! Weather provider contract and implementations
//!
//! The data layer depends on a two-operation provider trait rather than a
//! concrete transport: given a city name, a provider returns a normalized
//! current-weather record or a five-day forecast, or fails with one of the
//! classified errors below. [`OpenWeatherClient`] is the shipped
//! OpenWeatherMap-backed implementation; tests substitute scripted doubles.

mod openweather;

pub use openweather::OpenWeatherClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ForecastRecord, WeatherRecord};

/// Classified provider failures
///
/// The display strings are user-facing and surfaced verbatim by the
/// orchestrator when no cached fallback exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider does not know the requested city
    #[error("City not found. Please check the city name and try again.")]
    CityNotFound,

    /// The provider rejected the configured API key
    #[error("Invalid API key. Please set up your OpenWeatherMap API key.")]
    InvalidApiKey,

    /// The current-weather request failed for any other reason
    #[error("Failed to fetch weather data.")]
    WeatherUnavailable,

    /// The forecast request failed for any other reason
    #[error("Failed to fetch forecast data.")]
    ForecastUnavailable,
}

/// Source of normalized weather data for a city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions for `city`
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, ProviderError>;

    /// Fetches the five-day forecast for `city`
    async fn forecast(&self, city: &str) -> Result<ForecastRecord, ProviderError>;
}
