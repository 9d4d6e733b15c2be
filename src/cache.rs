//! Per-city weather cache with a one-hour freshness window
//!
//! The cache holds the last known weather record for every city the user has
//! looked up, keyed by the exact query string. Entries are overwritten on
//! every successful fetch and never evicted, so previously viewed cities stay
//! available offline indefinitely. Freshness only gates whether the
//! orchestrator skips a network call; stale entries are still served when
//! nothing better is available.

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::storage::{StorageBackend, CACHED_DATA_KEY};
use crate::types::WeatherRecord;

/// How long a cache entry counts as fresh, in minutes
const FRESH_WINDOW_MINUTES: i64 = 60;

/// Stores the last known weather per city
///
/// All mutations run under a collection lock so concurrent callers cannot
/// interleave the read-modify-write against the backing store.
pub struct WeatherCache {
    store: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl WeatherCache {
    /// Creates a cache over the given storage backend
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Caches `record` under `city`, stamping it with the current time
    ///
    /// Any prior entry for the city is overwritten unconditionally. The city
    /// key is the caller's query string, which may differ in case or spacing
    /// from the provider-reported name inside the record.
    pub fn put(&self, city: &str, record: &WeatherRecord) {
        let _guard = self.lock.lock();
        let mut cached = self.load();
        let mut entry = record.clone();
        entry.cached_at = Some(Utc::now());
        cached.insert(city.to_string(), entry);
        self.save(&cached);
    }

    /// Returns the cached entry for `city`, fresh or not
    pub fn get(&self, city: &str) -> Option<WeatherRecord> {
        let _guard = self.lock.lock();
        self.load().remove(city)
    }

    /// Reports whether a cached record is still fresh
    ///
    /// A record is fresh when it carries a cache stamp from within the last
    /// hour. Records without a stamp are never fresh.
    pub fn is_fresh(&self, record: &WeatherRecord) -> bool {
        record.cached_at.is_some_and(|cached_at| {
            Utc::now().signed_duration_since(cached_at) < Duration::minutes(FRESH_WINDOW_MINUTES)
        })
    }

    /// Lists the city keys currently cached
    pub fn cities(&self) -> Vec<String> {
        let _guard = self.lock.lock();
        self.load().into_keys().collect()
    }

    /// Drops every cached entry
    pub fn clear(&self) {
        let _guard = self.lock.lock();
        self.store.remove(CACHED_DATA_KEY);
    }

    /// Reads the full city-to-entry mapping, empty when absent or corrupt
    fn load(&self) -> HashMap<String, WeatherRecord> {
        let raw = match self.store.read(CACHED_DATA_KEY) {
            Some(raw) => raw,
            None => return HashMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!("Discarding unreadable weather cache: {}", e);
                HashMap::new()
            }
        }
    }

    /// Persists the full mapping
    fn save(&self, cached: &HashMap<String, WeatherRecord>) {
        match serde_json::to_string(cached) {
            Ok(json) => {
                self.store.write(CACHED_DATA_KEY, &json);
            }
            Err(e) => {
                tracing::warn!("Failed to serialize weather cache: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn test_cache() -> WeatherCache {
        WeatherCache::new(Arc::new(MemoryStore::new()))
    }

    fn test_record(city: &str, temperature: i32) -> WeatherRecord {
        WeatherRecord {
            id: Some(1),
            city: city.to_string(),
            country: "GB".to_string(),
            temperature,
            feels_like: temperature - 2,
            humidity: 70,
            pressure: 1013,
            description: "overcast clouds".to_string(),
            icon: "04d".to_string(),
            wind_speed: 5.2,
            clouds: 90,
            timestamp: Utc::now(),
            cached_at: None,
            bookmarked_at: None,
        }
    }

    #[test]
    fn test_put_then_get_round_trips_all_fields() {
        let cache = test_cache();
        let record = test_record("London", 15);

        let before = Utc::now();
        cache.put("London", &record);
        let after = Utc::now();

        let entry = cache.get("London").expect("Entry should exist");
        assert_eq!(entry.id, record.id);
        assert_eq!(entry.city, "London");
        assert_eq!(entry.country, "GB");
        assert_eq!(entry.temperature, 15);
        assert_eq!(entry.feels_like, 13);
        assert_eq!(entry.humidity, 70);
        assert_eq!(entry.pressure, 1013);
        assert_eq!(entry.description, "overcast clouds");
        assert_eq!(entry.icon, "04d");
        assert!((entry.wind_speed - 5.2).abs() < 0.01);
        assert_eq!(entry.clouds, 90);

        let cached_at = entry.cached_at.expect("Cache stamp should be set");
        assert!(cached_at >= before, "Stamp should be after put started");
        assert!(cached_at <= after, "Stamp should be before put returned");
    }

    #[test]
    fn test_get_returns_none_for_missing_city() {
        let cache = test_cache();

        assert!(cache.get("Nowhere").is_none());
    }

    #[test]
    fn test_put_overwrites_prior_entry() {
        let cache = test_cache();

        cache.put("Tokyo", &test_record("Tokyo", 20));
        cache.put("Tokyo", &test_record("Tokyo", 25));

        let entry = cache.get("Tokyo").expect("Entry should exist");
        assert_eq!(entry.temperature, 25);
    }

    #[test]
    fn test_entries_are_keyed_by_exact_query_string() {
        let cache = test_cache();

        cache.put("paris", &test_record("Paris", 18));

        assert!(cache.get("paris").is_some());
        assert!(cache.get("Paris").is_none(), "Lookup is case-sensitive");
    }

    #[test]
    fn test_entry_just_under_an_hour_old_is_fresh() {
        let cache = test_cache();
        let mut record = test_record("Berlin", 12);
        record.cached_at = Some(Utc::now() - Duration::minutes(59) - Duration::seconds(59));

        assert!(cache.is_fresh(&record));
    }

    #[test]
    fn test_entry_just_over_an_hour_old_is_stale() {
        let cache = test_cache();
        let mut record = test_record("Berlin", 12);
        record.cached_at = Some(Utc::now() - Duration::minutes(60) - Duration::seconds(1));

        assert!(!cache.is_fresh(&record));
    }

    #[test]
    fn test_entry_without_stamp_is_never_fresh() {
        let cache = test_cache();
        let record = test_record("Berlin", 12);

        assert!(!cache.is_fresh(&record));
    }

    #[test]
    fn test_cities_lists_cached_keys() {
        let cache = test_cache();

        cache.put("London", &test_record("London", 15));
        cache.put("Tokyo", &test_record("Tokyo", 22));

        let mut cities = cache.cities();
        cities.sort();
        assert_eq!(cities, vec!["London", "Tokyo"]);
    }

    #[test]
    fn test_clear_empties_the_cache() {
        let cache = test_cache();

        cache.put("London", &test_record("London", 15));
        cache.clear();

        assert!(cache.get("London").is_none());
        assert!(cache.cities().is_empty());
    }

    #[test]
    fn test_corrupt_store_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.write(CACHED_DATA_KEY, "{ not json");
        let cache = WeatherCache::new(store);

        assert!(cache.get("London").is_none());
        assert!(cache.cities().is_empty());
    }

    #[test]
    fn test_put_survives_corrupt_prior_state() {
        let store = Arc::new(MemoryStore::new());
        store.write(CACHED_DATA_KEY, "garbage");
        let cache = WeatherCache::new(store);

        cache.put("London", &test_record("London", 15));

        assert_eq!(cache.get("London").map(|e| e.temperature), Some(15));
    }
}
