//! Store-backed repositories.
//!
//! # Key layout
//!
//! | Key | Value |
//! |---|---|
//! | `fw_users` | JSON object: account id → [`Account`](crate::models::Account) |
//! | `fw_currentUser` | signed-in account id (plain string) |
//! | `cart:guest` | JSON array of [`CartLine`](crate::models::CartLine) |
//! | `cart:<account id>` | JSON array of [`CartLine`](crate::models::CartLine) |
//! | `orders:<account id>` | JSON array of [`Order`](crate::models::Order) |
//!
//! Nothing outside this module touches these keys.

pub mod accounts;
pub mod carts;
pub mod keys;
pub mod orders;
pub mod sessions;

pub use accounts::AccountDirectory;
pub use carts::{CartOwner, CartStore};
pub use orders::OrderHistory;
pub use sessions::SessionRegistry;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::store::{KeyValueStore, StoreError};

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store backend failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be decoded.
    #[error("data corruption in {key}: {source}")]
    DataCorruption {
        /// Key holding the bad record.
        key: String,
        /// Decoder error.
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("encode error: {0}")]
    Encode(serde_json::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate account id).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A step of a multi-key change failed and undoing the earlier steps
    /// failed too. Stored data may be half-updated.
    #[error("{error}; rollback failed: {rollback}")]
    RollbackFailed {
        /// The step that failed.
        error: Box<RepositoryError>,
        /// The failed undo.
        rollback: Box<RepositoryError>,
    },
}

impl RepositoryError {
    /// Attach the outcome of undoing earlier steps to this error.
    #[must_use]
    pub fn with_rollback(self, rollback: Result<(), Self>) -> Self {
        match rollback {
            Ok(()) => self,
            Err(rollback) => Self::RollbackFailed {
                error: Box::new(self),
                rollback: Box::new(rollback),
            },
        }
    }

    /// Whether stored data may be left half-updated.
    #[must_use]
    pub const fn is_rollback_failure(&self) -> bool {
        matches!(self, Self::RollbackFailed { .. })
    }
}

/// Read and decode the JSON record under `key`.
fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, RepositoryError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| RepositoryError::DataCorruption {
            key: key.to_owned(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(RepositoryError::Encode)?;
    store.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "record written");
    Ok(())
}

/// Store `items` under `key`, or remove the key when there are none.
fn write_list<S, T>(store: &S, key: &str, items: &[T]) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    if items.is_empty() {
        store.remove(key)?;
        tracing::debug!(key, "record removed");
        return Ok(());
    }
    write_json(store, key, items)
}
