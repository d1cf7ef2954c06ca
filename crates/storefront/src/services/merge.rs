//! Guest-cart merge.

use tracing::{error, info, instrument};

use tabcart_core::{AccountId, MergeOutcome};

use crate::db::{CartOwner, CartStore, RepositoryError};
use crate::store::KeyValueStore;

/// Moves the guest cart into an account cart.
///
/// The store has no transactions. The account cart is written first and the
/// guest key removed second; if the removal fails the account cart is put
/// back, so a caller sees either the old state or the merged one.
pub struct CartMergeEngine<'a, S: ?Sized> {
    carts: CartStore<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> CartMergeEngine<'a, S> {
    /// Create a new merge engine.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            carts: CartStore::new(store),
        }
    }

    /// Append every guest line, in order, to `id`'s cart and empty the guest
    /// cart. An empty guest cart changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails; the carts are left as
    /// they were, unless the error is `RepositoryError::RollbackFailed`.
    #[instrument(skip(self), fields(account = %id))]
    pub fn merge_guest_into(&self, id: &AccountId) -> Result<MergeOutcome, RepositoryError> {
        let guest = self.carts.read(&CartOwner::Guest)?;
        if guest.is_empty() {
            return Ok(MergeOutcome::NothingToMerge);
        }

        let owner = CartOwner::Account(id.clone());
        let before = self.carts.read(&owner)?;
        let moved = guest.len();

        let mut merged = before.clone();
        merged.extend(guest);
        self.carts.replace(&owner, &merged)?;

        if let Err(e) = self.carts.clear(&CartOwner::Guest) {
            error!(error = %e, "Failed to clear guest cart, restoring account cart");
            let restore = self.carts.replace(&owner, &before).inspect_err(|restore| {
                error!(error = %restore, "Failed to restore account cart");
            });
            return Err(e.with_rollback(restore));
        }

        info!(moved, total = merged.len(), "Guest cart merged");
        Ok(MergeOutcome::Merged(moved))
    }
}
