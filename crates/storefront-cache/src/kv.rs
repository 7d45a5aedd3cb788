//! Key-Value store abstraction with automatic serialization.

use std::sync::Arc;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Raw byte-oriented Key-Value backend.
///
/// Backends overwrite the whole value on `set`; there is no partial update
/// and no transaction.
pub trait KeyValueStore: Send + Sync {
    /// Read the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and clones share the
/// same backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_cache::{Cache, MemoryStore};
    ///
    /// let cache = Cache::new(MemoryStore::new());
    /// cache.set("theme", &"dark").unwrap();
    /// assert_eq!(cache.get::<String>("theme").unwrap().as_deref(), Some("dark"));
    /// ```
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open a cache backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(crate::MemoryStore::new())
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes do not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the undecoded bytes stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Store raw bytes under `key` without encoding them.
    pub fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.store.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: i64,
        quantity: u32,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::in_memory();
        let lines = vec![Line { id: 1, quantity: 2 }, Line { id: 7, quantity: 1 }];
        cache.set("cart", &lines).unwrap();

        let loaded: Vec<Line> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, lines);
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::in_memory();
        let value: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_malformed_value_is_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", b"{not json").unwrap();
        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("theme", "light").unwrap();
        assert!(other.exists("theme").unwrap());
    }
}
