//! `window.localStorage` backend for `wasm32` builds.
//!
//! The host page registers its own `storage` event listener and hands each
//! DOM event to `Storefront::on_storage_event` after converting it with
//! `StorageEvent::from`.

use web_sys::Storage;

use super::{KeyValueStore, StorageEvent, StoreError};

/// Store backed by the browser's `localStorage`.
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Open `window.localStorage`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if there is no window or storage is
    /// disabled (private mode, blocked cookies).
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_owned()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

impl From<&web_sys::StorageEvent> for StorageEvent {
    fn from(event: &web_sys::StorageEvent) -> Self {
        Self {
            key: event.key(),
            new_value: event.new_value(),
        }
    }
}
