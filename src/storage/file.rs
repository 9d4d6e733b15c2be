//! File-backed storage using the platform data directory

use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::StorageBackend;

/// Stores each key as a JSON file in an XDG-compliant data directory
///
/// Keys map to files (`weather_bookmarks` becomes `weather_bookmarks.json`
/// under `~/.local/share/skycache/` on Linux). I/O failures are logged and
/// absorbed so callers see them as missing data rather than errors.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where storage files live
    dir: PathBuf,
}

impl FileStore {
    /// Creates a new FileStore using the XDG-compliant data directory
    ///
    /// Returns `None` if the data directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycache")?;
        let dir = project_dirs.data_dir().to_path_buf();
        Some(Self { dir })
    }

    /// Creates a new FileStore rooted at a custom directory
    ///
    /// Useful for testing or when a specific storage location is needed.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the path of the file backing the given key
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read storage key {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> bool {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!("Failed to create storage directory: {}", e);
            return false;
        }
        match fs::write(self.path_for(key), value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to write storage key {}: {}", key, e);
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Failed to remove storage key {}: {}", key, e);
            }
        }
    }
}
