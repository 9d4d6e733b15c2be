//! Core data types for the weather data layer
//!
//! This module contains the weather record shared by the cache, bookmark, and
//! recent-search stores, the five-day forecast types, and user preferences.
//! Persisted JSON uses camelCase field names so that state written by earlier
//! versions of the application remains loadable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of current conditions for one city at one fetch instant
///
/// The `city` field is the identity key for caching and bookmarking:
/// comparisons are exact and case-sensitive, with no normalization.
/// `cached_at` is set when the record is stored in the weather cache and
/// `bookmarked_at` when it is stored as a bookmark; a record carries both
/// if it was bookmarked after being cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Provider-assigned numeric identifier for the city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// City name as reported by the provider
    pub city: String,
    /// Two-letter country code
    pub country: String,
    /// Temperature in whole degrees Celsius
    pub temperature: i32,
    /// Feels-like temperature in whole degrees Celsius
    pub feels_like: i32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Free-text condition description
    pub description: String,
    /// Provider icon code
    pub icon: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Cloud cover percentage (0-100)
    pub clouds: u8,
    /// When this data was fetched
    pub timestamp: DateTime<Utc>,
    /// When this record was stored in the cache, if it ever was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    /// When this record was bookmarked, if it ever was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarked_at: Option<DateTime<Utc>>,
}

/// Aggregated forecast for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Local calendar date of the day at the forecast location
    pub date: NaiveDate,
    /// Average of the day's temperature samples, whole degrees Celsius
    pub avg_temp: i32,
    /// Highest sampled temperature, whole degrees Celsius
    pub max_temp: i32,
    /// Lowest sampled temperature, whole degrees Celsius
    pub min_temp: i32,
    /// Condition description from the day's first sample
    pub description: String,
    /// Icon code from the day's first sample
    pub icon: String,
    /// Average humidity percentage, rounded
    pub humidity: u8,
    /// Average wind speed in m/s, rounded to one decimal
    pub wind_speed: f64,
}

/// Five-day forecast for one city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// City name as reported by the provider
    pub city: String,
    /// Two-letter country code
    pub country: String,
    /// Per-day aggregates, at most five days, earliest first
    pub forecast: Vec<DailyForecast>,
    /// When this data was fetched
    pub timestamp: DateTime<Utc>,
}

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Measurement unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Metric,
    Imperial,
}

/// User preferences persisted across sessions
///
/// Missing fields in persisted state fall back to the defaults, so partial
/// preference blobs from older versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Display theme
    pub theme: Theme,
    /// Measurement units for display
    pub unit: Unit,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            unit: Unit::Metric,
        }
    }
}
