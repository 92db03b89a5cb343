//! Key-value storage port for wizard state.
//!
//! Values are JSON strings under a handful of well-known keys. [MemoryStore]
//! backs tests and ephemeral servers; [JsonFileStore] keeps one JSON object on
//! disk so a session survives a restart.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const PROFILE_KEY: &str = "profile";
pub const PHOTOS_KEY: &str = "photos";
pub const ANALYSIS_KEY: &str = "analysis";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read session store '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse session value '{key}': {source}")]
    Parse {
        key: String,
        source: serde_json::Error,
    },
    #[error("failed to persist session store '{path}': {source}")]
    Write { path: String, source: io::Error },
}

pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

pub fn load_json<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            key: key.to_string(),
            source,
        })
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn SessionStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Parse {
        key: key.to_string(),
        source,
    })?;
    store.set(key, raw)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

/// One JSON object on disk, rewritten after every mutation. A missing file is an
/// empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read {
                path: path.display().to_string(),
                source,
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                    key: path.display().to_string(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| write_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        fs::write(&self.path, raw).map_err(write_err)
    }
}

impl SessionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_typed_values() {
        let mut store = MemoryStore::new();
        save_json(&mut store, PHOTOS_KEY, &vec!["a".to_string(), "b".to_string()]).unwrap();
        let photos: Option<Vec<String>> = load_json(&store, PHOTOS_KEY).unwrap();
        assert_eq!(photos, Some(vec!["a".to_string(), "b".to_string()]));

        store.clear().unwrap();
        assert_eq!(store.get(PHOTOS_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_value_is_a_parse_error() {
        let mut store = MemoryStore::new();
        store.set(PROFILE_KEY, "{not json".to_string()).unwrap();
        let err = load_json::<serde_json::Value>(&store, PROFILE_KEY).unwrap_err();
        assert!(matches!(err, StoreError::Parse { ref key, .. } if key == PROFILE_KEY));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(ANALYSIS_KEY, "{\"type\":\"Other\"}".to_string()).unwrap();
        store.set(PHOTOS_KEY, "[]".to_string()).unwrap();
        store.remove(PHOTOS_KEY).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(ANALYSIS_KEY).unwrap().as_deref(),
            Some("{\"type\":\"Other\"}")
        );
        assert_eq!(reopened.get(PHOTOS_KEY).unwrap(), None);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get(PROFILE_KEY).unwrap(), None);
    }
}
