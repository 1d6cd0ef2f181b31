//! Key-value persistence
//!
//! The engine only needs a scalar string store. Backends:
//! - [`MemoryStore`]: in-process map (native host, tests)
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("write to {key:?} rejected: {reason}")]
    Rejected { key: String, reason: String },
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.get("snakeHighScore").is_none());
        store.set("snakeHighScore", "120").unwrap();
        assert_eq!(store.get("snakeHighScore").as_deref(), Some("120"));
        store.set("snakeHighScore", "130").unwrap();
        assert_eq!(store.get("snakeHighScore").as_deref(), Some("130"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::with_entry("k", "v"));
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("w"));
    }
}
