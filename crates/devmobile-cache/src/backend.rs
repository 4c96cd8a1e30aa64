//! Storage backends for the cache.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;

use crate::CacheError;

/// Raw byte storage under string keys.
///
/// Backends know nothing about serialization; [`crate::Cache`] layers JSON
/// on top.
pub trait KvBackend: Send + Sync {
    /// Read the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys in lexical order.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Process-local backend.
///
/// Clones share the same underlying map, so two handles behave like two
/// browser tabs looking at the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        // One temp file per write; persist renames it into place atomically.
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value)?;
        temp.persist(&path)
            .map_err(|e| CacheError::StoreError(format!("{}: {}", path.display(), e)))?;
        tracing::trace!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clones_share_entries() {
        let a = MemoryBackend::new();
        let b = a.clone();

        a.set("cart", b"{}").unwrap();
        assert_eq!(b.get("cart").unwrap(), Some(b"{}".to_vec()));

        b.delete("cart").unwrap();
        assert!(!a.exists("cart").unwrap());
    }

    #[test]
    fn test_memory_delete_missing_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.delete("nothing").is_ok());
    }

    #[test]
    fn test_file_roundtrip_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("store")).unwrap();

        backend.set("dev-mobile-cart", b"[1,2]").unwrap();
        backend.set("prefs", b"{}").unwrap();

        assert_eq!(
            backend.get("dev-mobile-cart").unwrap(),
            Some(b"[1,2]".to_vec())
        );
        assert_eq!(backend.keys().unwrap(), vec!["dev-mobile-cart", "prefs"]);
        assert!(backend.exists("prefs").unwrap());
    }

    #[test]
    fn test_file_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("absent").unwrap(), None);
        assert!(backend.delete("absent").is_ok());
    }

    #[test]
    fn test_file_concurrent_writers_never_tear() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(FileBackend::open(dir.path()).unwrap());
        let size = 64 * 1024;

        let writers: Vec<_> = [b'a', b'b']
            .into_iter()
            .map(|byte| {
                let backend = Arc::clone(&backend);
                thread::spawn(move || {
                    let value = vec![byte; size];
                    for _ in 0..100 {
                        backend.set("dev-mobile-cart", &value).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let backend = Arc::clone(&backend);
            thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(bytes) = backend.get("dev-mobile-cart").unwrap() {
                        assert_eq!(bytes.len(), size);
                        assert!(bytes.iter().all(|&b| b == bytes[0]));
                    }
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        let last = backend.get("dev-mobile-cart").unwrap().unwrap();
        assert!(last.iter().all(|&b| b == last[0]));
        assert_eq!(backend.keys().unwrap(), vec!["dev-mobile-cart"]);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        for key in ["", "../escape", ".hidden", "a/b"] {
            assert!(matches!(
                backend.set(key, b"x"),
                Err(CacheError::InvalidKey(_))
            ));
        }
    }
}
