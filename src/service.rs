//! Offline-aware weather orchestration
//!
//! [`WeatherService`] ties the provider, cache, bookmark store, and
//! recent-search list together into one lookup operation. Given a city and
//! the host's connectivity signal it decides whether to serve from cache,
//! fetch fresh, or fall back to a stale entry, and reports the result as an
//! explicit [`FetchOutcome`] instead of an error channel.

use std::sync::Arc;

use crate::bookmarks::BookmarkStore;
use crate::cache::WeatherCache;
use crate::provider::{ProviderError, WeatherProvider};
use crate::recents::RecentSearches;
use crate::storage::StorageBackend;
use crate::types::{ForecastRecord, WeatherRecord};

/// Outcome of a weather lookup
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Weather to display, served fresh or from an acceptable cache entry
    Success(WeatherRecord),
    /// Cached weather served because the fetch failed, with an advisory
    /// message for the user
    Degraded(WeatherRecord, String),
    /// No weather available; the message says why
    Fatal(String),
}

impl FetchOutcome {
    /// The weather record, when the lookup produced one
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            FetchOutcome::Success(record) | FetchOutcome::Degraded(record, _) => Some(record),
            FetchOutcome::Fatal(_) => None,
        }
    }

    /// The advisory or failure message, when there is one
    pub fn message(&self) -> Option<&str> {
        match self {
            FetchOutcome::Success(_) => None,
            FetchOutcome::Degraded(_, message) | FetchOutcome::Fatal(message) => Some(message),
        }
    }

    /// Whether the lookup produced no weather at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchOutcome::Fatal(_))
    }
}

/// Orchestrates weather lookups over a provider and the persistent stores
///
/// The service holds the cache, bookmarks, and recent searches over one
/// shared storage backend; the stores are also exposed directly so hosts
/// can render bookmark and history views without going through a lookup.
pub struct WeatherService<P> {
    provider: P,
    cache: WeatherCache,
    bookmarks: BookmarkStore,
    recents: RecentSearches,
}

impl<P: WeatherProvider> WeatherService<P> {
    /// Creates a service over the given provider and storage backend
    pub fn new(provider: P, store: Arc<dyn StorageBackend>) -> Self {
        Self {
            provider,
            cache: WeatherCache::new(store.clone()),
            bookmarks: BookmarkStore::new(store.clone()),
            recents: RecentSearches::new(store),
        }
    }

    /// The weather cache backing this service
    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// The bookmark store backing this service
    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    /// The recent-search list backing this service
    pub fn recent_searches(&self) -> &RecentSearches {
        &self.recents
    }

    /// Looks up current weather for `city`
    ///
    /// `is_offline` is the host's connectivity signal, sampled by the caller
    /// at request time. The lookup resolves in precedence order:
    ///
    /// 1. Blank input fails immediately without touching cache or network.
    /// 2. Offline with any cached entry serves that entry, fresh or stale.
    /// 3. Online with a fresh cached entry serves it without a network call.
    /// 4. Otherwise the provider is called; a fetched record is cached and
    ///    the search is recorded before it is returned.
    /// 5. If the provider fails, any cached entry is served with an advisory;
    ///    with no cache the provider's message is surfaced as fatal.
    ///
    /// Only step 4 records a recent search: cache-served and failed lookups
    /// leave the history untouched.
    pub async fn fetch_weather(&self, city: &str, is_offline: bool) -> FetchOutcome {
        if city.trim().is_empty() {
            return FetchOutcome::Fatal("Please enter a city name".to_string());
        }

        let cached = self.cache.get(city);

        if is_offline {
            // Offline requests take any cached entry, fresh or stale
            if let Some(entry) = cached {
                return FetchOutcome::Success(entry);
            }
        } else if let Some(entry) = cached {
            // A fresh entry also short-circuits online lookups
            if self.cache.is_fresh(&entry) {
                return FetchOutcome::Success(entry);
            }
        }

        match self.provider.current_weather(city).await {
            Ok(record) => {
                self.cache.put(city, &record);
                self.recents.record(city);
                FetchOutcome::Success(record)
            }
            Err(e) => match self.cache.get(city) {
                Some(entry) => {
                    tracing::debug!("Serving cached weather for {}: {}", city, e);
                    FetchOutcome::Degraded(
                        entry,
                        "Showing cached data - unable to fetch fresh data".to_string(),
                    )
                }
                None => FetchOutcome::Fatal(e.to_string()),
            },
        }
    }

    /// Fetches the five-day forecast for `city`
    ///
    /// Forecasts are not cached and do not touch the recent-search list.
    /// Blank input yields the generic forecast failure without a provider
    /// call.
    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastRecord, ProviderError> {
        if city.trim().is_empty() {
            return Err(ProviderError::ForecastUnavailable);
        }
        self.provider.forecast(city).await
    }

    /// Toggles the bookmark for a record's city
    ///
    /// The decision always reads current bookmark state: a bookmarked city
    /// is removed, anything else is added. Returns whether the underlying
    /// operation took effect.
    pub fn toggle_bookmark(&self, record: &WeatherRecord) -> bool {
        if self.bookmarks.contains(&record.city) {
            self.bookmarks.remove(&record.city)
        } else {
            self.bookmarks.add(record)
        }
    }
}
