//! # Durable Key-Value Storage
//!
//! The working set is persisted as one JSON document per key. The
//! [`KeyValueStore`] trait is the only thing the rest of the crate sees, so
//! the medium can be swapped without touching the record store.
//!
//! ## Backends
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`FileStore`] | `<dir>/<key>.json`, written atomically via rename |
//! | [`MemoryStore`] | tests and throwaway sessions |
//!
//! Writes are last-write-wins. There is no versioning; a single writer is
//! assumed.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::SlabelError;

/// Key holding the ordered label list
pub const LABELS_KEY: &str = "labels";

/// Key holding `{color, size}`
pub const BORDER_KEY: &str = "globalBorder";

/// Key holding `{widthIn, heightIn}`
pub const LABEL_SIZE_KEY: &str = "globalLabelSize";

/// Key holding the selected theme index
pub const THEME_KEY: &str = "themeIndex";

/// A flat string-keyed store of string values.
pub trait KeyValueStore: Send + Sync {
    /// Read a key. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, SlabelError>;

    /// Write a key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SlabelError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), SlabelError>;
}

/// Read and decode a JSON value.
///
/// Absent keys, read failures, and malformed JSON all yield `None`; the
/// latter two are logged. Callers substitute their default.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is malformed, using default");
            None
        }
    }
}

/// Read and decode a value stored as a JSON object.
///
/// Like [`load_json`], but arrays and scalars count as malformed even when
/// the target type could be built from them.
pub fn load_object<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let map = match load_json::<Value>(store, key)? {
        Value::Object(map) => map,
        _ => {
            tracing::warn!(key, "stored value is not an object, using default");
            return None;
        }
    };
    match serde_json::from_value(Value::Object(map)) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is malformed, using default");
            None
        }
    }
}

/// Encode a value as JSON and write it.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), SlabelError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlabelError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SlabelError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SlabelError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SlabelError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SlabelError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlabelError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlabelError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| {
            SlabelError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            SlabelError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SlabelError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SlabelError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// Volatile in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, for tests that start from existing state.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SlabelError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlabelError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SlabelError> {
        self.entries.remove(key);
        Ok(())
    }
}
