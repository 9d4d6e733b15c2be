//! Persistent key-value storage for the weather data layer
//!
//! This module provides the storage abstraction the cache, bookmark,
//! recent-search, and preference stores are built on. Backends never panic
//! and never surface errors: a failed read behaves like a missing key and a
//! failed write is logged and dropped, so a corrupt or full store degrades
//! to empty collections instead of taking the application down.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key for the bookmark collection
pub const BOOKMARKS_KEY: &str = "weather_bookmarks";
/// Storage key for the recent-search list
pub const RECENT_SEARCHES_KEY: &str = "weather_recent_searches";
/// Storage key for the per-city weather cache
pub const CACHED_DATA_KEY: &str = "weather_cached_data";
/// Storage key for user preferences
pub const PREFERENCES_KEY: &str = "weather_user_preferences";

/// A durable, synchronous, string-keyed blob store
///
/// Implementations must swallow their own failures: `read` returns `None`
/// for anything that cannot be produced (missing key, I/O error, corrupt
/// content), `write` reports failure through its return value only, and
/// `remove` of a missing key is a no-op. Callers treat the store as
/// unreliable and fall back to defaults on `None`.
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent or unreadable
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, returning whether the write succeeded
    fn write(&self, key: &str, value: &str) -> bool;

    /// Removes the value stored under `key`, if any
    fn remove(&self, key: &str);
}
