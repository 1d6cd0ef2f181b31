//! Browser LocalStorage backend

use web_sys::Storage;

use super::{KeyValueStore, StoreError};

/// Store backed by `window.localStorage`
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected {
                key: key.to_string(),
                reason: format!("{:?}", err),
            })
    }
}
