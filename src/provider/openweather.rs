//! OpenWeatherMap API client
//!
//! Fetches current conditions and five-day forecasts from the OpenWeatherMap
//! API and normalizes the payloads into our weather record types. Requests
//! use metric units. HTTP 404 maps to the not-found error and HTTP 401 to
//! the bad-key error; every other failure becomes the generic per-operation
//! error after being logged.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{ProviderError, WeatherProvider};
use crate::types::{DailyForecast, ForecastRecord, WeatherRecord};

/// Base URL for the OpenWeatherMap API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Environment variable read by [`OpenWeatherClient::from_env`]
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Maximum number of days in a normalized forecast
const FORECAST_DAYS: usize = 5;

/// Client for the OpenWeatherMap current-weather and forecast endpoints
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    /// HTTP client for making requests
    client: Client,
    /// API key sent with every request
    api_key: String,
    /// Base URL for the API
    base_url: String,
}

impl OpenWeatherClient {
    /// Creates a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with the API key from `OPENWEATHER_API_KEY`
    ///
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok()?;
        if api_key.is_empty() {
            return None;
        }
        Some(Self::new(api_key))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, ProviderError> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url, city, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Weather request failed: {}", e);
            ProviderError::WeatherUnavailable
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ProviderError::CityNotFound),
            StatusCode::UNAUTHORIZED => return Err(ProviderError::InvalidApiKey),
            status if !status.is_success() => {
                tracing::debug!("Weather request returned {}", status);
                return Err(ProviderError::WeatherUnavailable);
            }
            _ => {}
        }

        let payload: CurrentWeatherResponse = response.json().await.map_err(|e| {
            tracing::debug!("Weather response unreadable: {}", e);
            ProviderError::WeatherUnavailable
        })?;

        Ok(normalize_current(payload))
    }

    async fn forecast(&self, city: &str) -> Result<ForecastRecord, ProviderError> {
        let url = format!(
            "{}/forecast?q={}&appid={}&units=metric",
            self.base_url, city, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("Forecast request failed: {}", e);
            ProviderError::ForecastUnavailable
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ProviderError::CityNotFound),
            StatusCode::UNAUTHORIZED => return Err(ProviderError::InvalidApiKey),
            status if !status.is_success() => {
                tracing::debug!("Forecast request returned {}", status);
                return Err(ProviderError::ForecastUnavailable);
            }
            _ => {}
        }

        let payload: ForecastResponse = response.json().await.map_err(|e| {
            tracing::debug!("Forecast response unreadable: {}", e);
            ProviderError::ForecastUnavailable
        })?;

        Ok(normalize_forecast(payload))
    }
}

/// Maps a current-weather payload into a weather record
///
/// Temperatures are rounded to whole degrees. A payload without condition
/// entries yields an empty description and icon.
fn normalize_current(response: CurrentWeatherResponse) -> WeatherRecord {
    let (description, icon) = response
        .weather
        .first()
        .map(|condition| (condition.description.clone(), condition.icon.clone()))
        .unwrap_or_default();

    WeatherRecord {
        id: response.id,
        city: response.name,
        country: response.sys.country,
        temperature: response.main.temp.round() as i32,
        feels_like: response.main.feels_like.round() as i32,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        description,
        icon,
        wind_speed: response.wind.speed,
        clouds: response.clouds.all,
        timestamp: Utc::now(),
        cached_at: None,
        bookmarked_at: None,
    }
}

/// Maps a forecast payload into per-day aggregates
///
/// Three-hour samples are grouped by their calendar date at the forecast
/// location (the payload's UTC offset applied to each sample time), and
/// only the first five days are kept. Per day: average/max/min temperature
/// rounded to whole degrees, description and icon from the day's first
/// sample, rounded average humidity, and average wind speed to one decimal.
fn normalize_forecast(response: ForecastResponse) -> ForecastRecord {
    let mut days: Vec<DayBucket> = Vec::new();

    for slot in &response.list {
        let date = match slot_local_date(slot.dt, response.city.timezone) {
            Some(date) => date,
            None => continue,
        };

        match days.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => {
                bucket.temps.push(slot.main.temp);
                bucket.humidity.push(slot.main.humidity);
                bucket.wind_speed.push(slot.wind.speed);
            }
            None => {
                let (description, icon) = slot
                    .weather
                    .first()
                    .map(|condition| (condition.description.clone(), condition.icon.clone()))
                    .unwrap_or_default();
                days.push(DayBucket {
                    date,
                    temps: vec![slot.main.temp],
                    description,
                    icon,
                    humidity: vec![slot.main.humidity],
                    wind_speed: vec![slot.wind.speed],
                });
            }
        }
    }

    let forecast = days
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|bucket| {
            let count = bucket.temps.len() as f64;
            let avg = bucket.temps.iter().sum::<f64>() / count;
            let max = bucket.temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = bucket.temps.iter().cloned().fold(f64::INFINITY, f64::min);

            DailyForecast {
                date: bucket.date,
                avg_temp: avg.round() as i32,
                max_temp: max.round() as i32,
                min_temp: min.round() as i32,
                description: bucket.description,
                icon: bucket.icon,
                humidity: (bucket.humidity.iter().sum::<f64>() / count).round() as u8,
                wind_speed: round_to_tenth(bucket.wind_speed.iter().sum::<f64>() / count),
            }
        })
        .collect();

    ForecastRecord {
        city: response.city.name,
        country: response.city.country,
        forecast,
        timestamp: Utc::now(),
    }
}

/// Samples collected for one forecast day during grouping
struct DayBucket {
    date: NaiveDate,
    temps: Vec<f64>,
    description: String,
    icon: String,
    humidity: Vec<f64>,
    wind_speed: Vec<f64>,
}

/// Calendar date of a forecast sample in the location's local time
fn slot_local_date(timestamp: i64, offset_seconds: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp + offset_seconds, 0).map(|dt| dt.date_naive())
}

/// Rounds to one decimal place
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Current-weather payload from OpenWeatherMap
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    /// Provider city identifier
    id: Option<u64>,
    /// Provider-reported city name
    name: String,
    sys: SysInfo,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<ConditionInfo>,
    wind: WindInfo,
    clouds: CloudsInfo,
}

#[derive(Debug, Deserialize)]
struct SysInfo {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CloudsInfo {
    all: u8,
}

/// Forecast payload from OpenWeatherMap
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastSlot>,
    city: ForecastCity,
}

/// One three-hour forecast sample
#[derive(Debug, Deserialize)]
struct ForecastSlot {
    /// Sample time as a unix timestamp
    dt: i64,
    main: SlotReadings,
    #[serde(default)]
    weather: Vec<ConditionInfo>,
    wind: WindInfo,
}

#[derive(Debug, Deserialize)]
struct SlotReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastCity {
    name: String,
    #[serde(default)]
    country: String,
    /// Offset from UTC in seconds
    #[serde(default)]
    timezone: i64,
}
