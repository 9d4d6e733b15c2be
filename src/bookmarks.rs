//! Bookmarked cities, unique by city name
//!
//! Bookmarks are full weather records saved by explicit user action, kept in
//! insertion order. The city name is the identity: a second bookmark for the
//! same city is rejected rather than replaced, and removal matches by name.

use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::storage::{StorageBackend, BOOKMARKS_KEY};
use crate::types::WeatherRecord;

/// Ordered collection of bookmarked weather records
pub struct BookmarkStore {
    store: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl BookmarkStore {
    /// Creates a bookmark store over the given storage backend
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Bookmarks `record`, stamping it with the current time
    ///
    /// Returns false without touching the store if the record's city is
    /// already bookmarked. The record keeps any cache stamp it carries, so a
    /// bookmarked cache entry holds both timestamps.
    pub fn add(&self, record: &WeatherRecord) -> bool {
        let _guard = self.lock.lock();
        let mut bookmarks = self.load();

        let exists = bookmarks.iter().any(|item| item.city == record.city);
        if exists {
            return false;
        }

        let mut entry = record.clone();
        entry.bookmarked_at = Some(Utc::now());
        bookmarks.push(entry);
        self.save(&bookmarks);
        true
    }

    /// Removes any bookmark for `city`
    ///
    /// Always returns true; removing a city that was never bookmarked is not
    /// an error.
    pub fn remove(&self, city: &str) -> bool {
        let _guard = self.lock.lock();
        let mut bookmarks = self.load();
        bookmarks.retain(|item| item.city != city);
        self.save(&bookmarks);
        true
    }

    /// Reports whether `city` is bookmarked
    pub fn contains(&self, city: &str) -> bool {
        let _guard = self.lock.lock();
        self.load().iter().any(|item| item.city == city)
    }

    /// Returns all bookmarks in insertion order
    pub fn list(&self) -> Vec<WeatherRecord> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Reads the persisted bookmark list, empty when absent or corrupt
    fn load(&self) -> Vec<WeatherRecord> {
        let raw = match self.store.read(BOOKMARKS_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!("Discarding unreadable bookmarks: {}", e);
                Vec::new()
            }
        }
    }

    /// Persists the bookmark list
    fn save(&self, bookmarks: &[WeatherRecord]) {
        match serde_json::to_string(bookmarks) {
            Ok(json) => {
                self.store.write(BOOKMARKS_KEY, &json);
            }
            Err(e) => {
                tracing::warn!("Failed to serialize bookmarks: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn test_store() -> BookmarkStore {
        BookmarkStore::new(Arc::new(MemoryStore::new()))
    }

    fn test_record(city: &str, temperature: i32) -> WeatherRecord {
        WeatherRecord {
            id: None,
            city: city.to_string(),
            country: "JP".to_string(),
            temperature,
            feels_like: temperature + 1,
            humidity: 55,
            pressure: 1009,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            wind_speed: 2.8,
            clouds: 0,
            timestamp: Utc::now(),
            cached_at: None,
            bookmarked_at: None,
        }
    }

    #[test]
    fn test_add_stamps_and_stores_the_record() {
        let store = test_store();

        let before = Utc::now();
        assert!(store.add(&test_record("Tokyo", 22)));
        let after = Utc::now();

        let bookmarks = store.list();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].city, "Tokyo");
        assert_eq!(bookmarks[0].temperature, 22);

        let stamp = bookmarks[0].bookmarked_at.expect("Bookmark stamp should be set");
        assert!(stamp >= before && stamp <= after);
    }

    #[test]
    fn test_add_rejects_duplicate_city() {
        let store = test_store();

        assert!(store.add(&test_record("Tokyo", 22)));
        assert!(!store.add(&test_record("Tokyo", 30)));

        let bookmarks = store.list();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].temperature, 22, "Original entry is untouched");
    }

    #[test]
    fn test_city_match_is_case_sensitive() {
        let store = test_store();

        assert!(store.add(&test_record("Tokyo", 22)));
        assert!(store.add(&test_record("tokyo", 22)));

        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_remove_deletes_matching_bookmark() {
        let store = test_store();
        store.add(&test_record("Tokyo", 22));
        store.add(&test_record("Osaka", 25));

        assert!(store.remove("Tokyo"));

        let bookmarks = store.list();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].city, "Osaka");
    }

    #[test]
    fn test_remove_of_non_member_is_idempotent() {
        let store = test_store();
        store.add(&test_record("Tokyo", 22));

        assert!(store.remove("Atlantis"));

        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_contains_reflects_store_state() {
        let store = test_store();

        assert!(!store.contains("Tokyo"));
        store.add(&test_record("Tokyo", 22));
        assert!(store.contains("Tokyo"));
        store.remove("Tokyo");
        assert!(!store.contains("Tokyo"));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = test_store();

        store.add(&test_record("Tokyo", 22));
        store.add(&test_record("Osaka", 25));
        store.add(&test_record("Kyoto", 24));

        let cities: Vec<String> = store.list().into_iter().map(|b| b.city).collect();
        assert_eq!(cities, vec!["Tokyo", "Osaka", "Kyoto"]);
    }

    #[test]
    fn test_cached_record_keeps_both_stamps_when_bookmarked() {
        let store = test_store();
        let mut record = test_record("Tokyo", 22);
        record.cached_at = Some(Utc::now());

        store.add(&record);

        let bookmarks = store.list();
        assert!(bookmarks[0].cached_at.is_some());
        assert!(bookmarks[0].bookmarked_at.is_some());
    }

    #[test]
    fn test_corrupt_store_reads_as_empty() {
        let backing = Arc::new(MemoryStore::new());
        backing.write(BOOKMARKS_KEY, "[{broken");
        let store = BookmarkStore::new(backing);

        assert!(store.list().is_empty());
        assert!(store.add(&test_record("Tokyo", 22)), "Add recovers from corrupt state");
        assert_eq!(store.list().len(), 1);
    }
}
