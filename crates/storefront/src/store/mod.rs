//! Key-value store abstraction.
//!
//! Everything the engine persists goes through [`KeyValueStore`]: a
//! synchronous string-to-string map, shared by every tab of one browser
//! profile. Backends:
//!
//! - [`MemoryStore`] - in-process, with cross-tab change events (tests, demos)
//! - [`JsonFileStore`] - one JSON object on disk (the CLI)
//! - `WebStorage` - `window.localStorage` (`wasm32` with the `web` feature)

mod file;
mod memory;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web;

pub use file::JsonFileStore;
pub use memory::{MemoryBackend, MemoryStore};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web::WebStorage;

use thiserror::Error;

/// Errors raised by a store backend.
///
/// All of these are fatal for the operation that hit them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("store file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A synchronous string-to-string store.
///
/// Methods take `&self`: backends handle their own interior mutability, the
/// way `localStorage` does.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// A change made to the store by another tab.
///
/// `key` is `None` when the whole store was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed.
    pub key: Option<String>,
    /// Value after the change; `None` if the key was removed.
    pub new_value: Option<String>,
}

impl StorageEvent {
    /// Event for a write or removal of a single key.
    #[must_use]
    pub fn changed(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: Some(key.into()),
            new_value,
        }
    }

    /// Event for the whole store being cleared.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            key: None,
            new_value: None,
        }
    }
}
