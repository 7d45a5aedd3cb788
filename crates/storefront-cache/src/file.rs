//! File-backed backend, one JSON file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CacheError, KeyValueStore};

const EXTENSION: &str = "json";

/// Durable Key-Value backend rooted at a directory.
///
/// Each key maps to `<root>/<key>.json`. The directory is created when the
/// store is opened. Writes go to a temporary sibling first and are renamed
/// into place, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store under `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {e}", root.display())))?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Directory holding the values.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
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
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
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
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
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
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("cart", b"[{\"id\":1}]").unwrap();

        assert!(dir.path().join("cart.json").is_file());
        assert_eq!(store.get("cart").unwrap().unwrap(), b"[{\"id\":1}]".to_vec());
    }

    #[test]
    fn test_reopen_sees_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .set("theme", b"\"light\"")
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("theme").unwrap().unwrap(), b"\"light\"".to_vec());
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("cart").unwrap().is_none());
        assert!(!store.exists("cart").unwrap());
        assert!(store.delete("cart").is_ok());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("cart", b"[]").unwrap();
        store.set("theme", b"\"dark\"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["cart", "theme"]);
    }

    #[test]
    fn test_opens_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert_eq!(store.root(), nested.as_path());
        assert!(nested.is_dir());
    }
}
