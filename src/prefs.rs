//! User preference persistence

use parking_lot::Mutex;
use std::sync::Arc;

use crate::storage::{StorageBackend, PREFERENCES_KEY};
use crate::types::UserPreferences;

/// Loads and saves user preferences
///
/// Absent or unreadable state loads as the defaults (light theme, metric
/// units); preferences are only written on explicit save.
pub struct PreferenceStore {
    store: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl PreferenceStore {
    /// Creates a preference store over the given storage backend
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Returns the persisted preferences, or the defaults
    pub fn load(&self) -> UserPreferences {
        let _guard = self.lock.lock();
        let raw = match self.store.read(PREFERENCES_KEY) {
            Some(raw) => raw,
            None => return UserPreferences::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Discarding unreadable preferences: {}", e);
                UserPreferences::default()
            }
        }
    }

    /// Persists `prefs`
    pub fn save(&self, prefs: &UserPreferences) {
        let _guard = self.lock.lock();
        match serde_json::to_string(prefs) {
            Ok(json) => {
                self.store.write(PREFERENCES_KEY, &json);
            }
            Err(e) => {
                tracing::warn!("Failed to serialize preferences: {}", e);
            }
        }
    }
}
