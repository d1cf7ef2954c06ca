//! Signed-in identity.

use tracing::{debug, warn};

use tabcart_core::AccountId;

use super::{AccountDirectory, RepositoryError, keys};
use crate::store::KeyValueStore;

/// Tracks which account, if any, is signed in.
///
/// Reads are self-healing: a stored id that is malformed or names an
/// account that no longer exists is cleared on the spot, and the caller sees
/// a guest.
pub struct SessionRegistry<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionRegistry<'a, S> {
    /// Create a new session registry.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The signed-in account, or `None` for a guest.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read or the dangling
    /// id cannot be cleared.
    pub fn current_identity(&self) -> Result<Option<AccountId>, RepositoryError> {
        let Some(raw) = self.store.get(keys::CURRENT_USER)? else {
            return Ok(None);
        };

        let valid = match AccountId::parse(&raw) {
            Ok(id) => AccountDirectory::new(self.store)
                .exists(&id)?
                .then_some(id),
            Err(_) => None,
        };

        if valid.is_none() {
            warn!(stored = %raw, "Clearing session for unknown account");
            self.store.remove(keys::CURRENT_USER)?;
        }

        Ok(valid)
    }

    /// Sign `id` in, or sign out with `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be written.
    pub fn set_current_identity(&self, id: Option<&AccountId>) -> Result<(), RepositoryError> {
        match id {
            Some(id) => {
                self.store.set(keys::CURRENT_USER, id.as_str())?;
                debug!(account = %id, "Session set");
            }
            None => {
                self.store.remove(keys::CURRENT_USER)?;
                debug!("Session cleared");
            }
        }
        Ok(())
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be written.
    pub fn logout(&self) -> Result<(), RepositoryError> {
        self.set_current_identity(None)
    }
}
