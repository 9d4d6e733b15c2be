//! Skycache Weather Library
//!
//! Offline-aware weather data layer for city lookups: a provider client,
//! a freshness-stamped cache, bookmarks, recent searches, and user
//! preferences, all persisted through a pluggable storage backend.

pub mod bookmarks;
pub mod cache;
pub mod prefs;
pub mod provider;
pub mod recents;
pub mod service;
pub mod storage;
pub mod types;

pub use bookmarks::BookmarkStore;
pub use cache::WeatherCache;
pub use prefs::PreferenceStore;
pub use provider::{OpenWeatherClient, ProviderError, WeatherProvider};
pub use recents::RecentSearches;
pub use service::{FetchOutcome, WeatherService};
pub use storage::{FileStore, MemoryStore, StorageBackend};
pub use types::{
    DailyForecast, ForecastRecord, Theme, Unit, UserPreferences, WeatherRecord,
};
