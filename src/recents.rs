//! Recent-search history, most recent first
//!
//! A bounded list of the city names the user has successfully looked up.
//! Recording a city that is already present moves it to the front instead of
//! duplicating it; the list never grows beyond ten entries.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::storage::{StorageBackend, RECENT_SEARCHES_KEY};

/// Maximum number of recent searches kept
const MAX_RECENT_SEARCHES: usize = 10;

/// Deduplicated ring of recently searched city names
pub struct RecentSearches {
    store: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl RecentSearches {
    /// Creates a recent-search list over the given storage backend
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Records a search for `city`
    ///
    /// Any existing occurrence is removed first, then the city is placed at
    /// the front and the list is cut back to the ten most recent entries.
    pub fn record(&self, city: &str) {
        let _guard = self.lock.lock();
        let mut searches = self.load();
        searches.retain(|entry| entry != city);
        searches.insert(0, city.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);
        self.save(&searches);
    }

    /// Returns the recent searches, most recent first
    pub fn list(&self) -> Vec<String> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Forgets all recent searches
    pub fn clear(&self) {
        let _guard = self.lock.lock();
        self.store.remove(RECENT_SEARCHES_KEY);
    }

    /// Reads the persisted list, empty when absent or corrupt
    fn load(&self) -> Vec<String> {
        let raw = match self.store.read(RECENT_SEARCHES_KEY) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(searches) => searches,
            Err(e) => {
                tracing::warn!("Discarding unreadable recent searches: {}", e);
                Vec::new()
            }
        }
    }

    /// Persists the list
    fn save(&self, searches: &[String]) {
        match serde_json::to_string(searches) {
            Ok(json) => {
                self.store.write(RECENT_SEARCHES_KEY, &json);
            }
            Err(e) => {
                tracing::warn!("Failed to serialize recent searches: {}", e);
            }
        }
    }
}
