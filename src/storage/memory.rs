//! In-memory storage backend

use parking_lot::Mutex;
use std::collections::HashMap;

use super::StorageBackend;

/// Keeps all values in a process-local map
///
/// Nothing survives the process; intended for tests and for hosts that
/// handle persistence themselves. Every operation succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.entries.lock().insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let store = MemoryStore::new();

        assert!(store.read("missing").is_none());
    }

    #[test]
    fn test_write_then_read_returns_value() {
        let store = MemoryStore::new();

        assert!(store.write("key", "value"));

        assert_eq!(store.read("key").as_deref(), Some("value"));
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStore::new();

        store.write("first", "1");
        store.write("second", "2");
        store.remove("first");

        assert!(store.read("first").is_none());
        assert_eq!(store.read("second").as_deref(), Some("2"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = MemoryStore::new();

        store.write("key", "old");
        store.write("key", "new");

        assert_eq!(store.read("key").as_deref(), Some("new"));
    }
}
