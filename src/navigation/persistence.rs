//! Key-value persistence backends for the navigation store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::NavigationError;

/// Storage for serialized navigation state.
pub trait NavigationPersistence: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, NavigationError>;
    fn save(&self, key: &str, value: &str) -> Result<(), NavigationError>;
}

/// In-process storage, used in tests and when no state directory exists.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationPersistence for MemoryPersistence {
    fn load(&self, key: &str) -> Result<Option<String>, NavigationError> {
        let values = self.values.lock().map_err(|_| NavigationError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), NavigationError> {
        let mut values = self.values.lock().map_err(|_| NavigationError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.local/state/stellar` or the platform equivalent.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|d| d.join("stellar"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl NavigationPersistence for FilePersistence {
    fn load(&self, key: &str) -> Result<Option<String>, NavigationError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), NavigationError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let store = MemoryPersistence::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_persistence_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FilePersistence::new(tmp.path().join("nested"));
        assert_eq!(store.load("navigation-storage").unwrap(), None);
        store.save("navigation-storage", "{}").unwrap();
        assert!(tmp.path().join("nested/navigation-storage.json").exists());
        assert_eq!(store.load("navigation-storage").unwrap().as_deref(), Some("{}"));
    }
}
