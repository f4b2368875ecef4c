//! Key-value persistence for chat history.
//!
//! Native builds keep one JSON file per key under the local data directory;
//! WASM builds and tests use the in-memory store.

use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored history is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

// ============================================
// File Store (native platforms)
// ============================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform data directory, or `cache/` when there is none.
    pub fn in_data_dir() -> Self {
        match dirs::data_local_dir() {
            Some(dir) => Self::new(dir.join("smilebot")),
            None => Self::new(PathBuf::from("cache").join("smilebot")),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================
// Memory Store
// ============================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Sanitize storage key for filesystem use
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}
