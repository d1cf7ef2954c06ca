//! Per-owner carts.

use tracing::debug;

use tabcart_core::{AccountId, LineId};

use super::{RepositoryError, keys, read_json, write_list};
use crate::models::CartLine;
use crate::store::KeyValueStore;

/// Who a cart belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartOwner {
    /// The single anonymous cart.
    Guest,
    /// A signed-in account's cart.
    Account(AccountId),
}

impl CartOwner {
    /// Store key holding this owner's cart.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Guest => keys::GUEST_CART.to_owned(),
            Self::Account(id) => keys::account_cart(id),
        }
    }
}

impl From<Option<AccountId>> for CartOwner {
    fn from(identity: Option<AccountId>) -> Self {
        identity.map_or(Self::Guest, Self::Account)
    }
}

impl From<AccountId> for CartOwner {
    fn from(id: AccountId) -> Self {
        Self::Account(id)
    }
}

/// Repository for carts.
///
/// A missing key is an empty cart; emptying a cart removes its key.
pub struct CartStore<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> CartStore<'a, S> {
    /// Create a new cart store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All lines in `owner`'s cart, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    /// Returns `RepositoryError::DataCorruption` if the cart cannot be decoded.
    pub fn read(&self, owner: &CartOwner) -> Result<Vec<CartLine>, RepositoryError> {
        let mut lines: Vec<CartLine> = read_json(self.store, &owner.key())?.unwrap_or_default();
        CartLine::assign_legacy_ids(&mut lines);
        Ok(lines)
    }

    /// Number of lines in `owner`'s cart.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub fn len(&self, owner: &CartOwner) -> Result<usize, RepositoryError> {
        Ok(self.read(owner)?.len())
    }

    /// Add a line to the end of `owner`'s cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read or written.
    pub fn append(&self, owner: &CartOwner, line: CartLine) -> Result<(), RepositoryError> {
        let mut lines = self.read(owner)?;
        lines.push(line);
        self.replace(owner, &lines)?;
        debug!(cart = %owner.key(), len = lines.len(), "Line appended");
        Ok(())
    }

    /// Remove the line at `index`.
    ///
    /// Returns the removed line, or `None` (with nothing written) if `index`
    /// is past the end.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read or written.
    pub fn remove_at(
        &self,
        owner: &CartOwner,
        index: usize,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let mut lines = self.read(owner)?;
        if index >= lines.len() {
            return Ok(None);
        }

        let removed = lines.remove(index);
        self.replace(owner, &lines)?;
        debug!(cart = %owner.key(), index, len = lines.len(), "Line removed");
        Ok(Some(removed))
    }

    /// Remove the line with id `line_id`.
    ///
    /// Returns the removed line, or `None` (with nothing written) if no line
    /// has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read or written.
    pub fn remove_line(
        &self,
        owner: &CartOwner,
        line_id: LineId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let lines = self.read(owner)?;
        let Some(index) = lines.iter().position(|line| line.id == line_id) else {
            return Ok(None);
        };
        self.remove_at(owner, index)
    }

    /// Empty `owner`'s cart. Clearing an empty cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    pub fn clear(&self, owner: &CartOwner) -> Result<(), RepositoryError> {
        self.replace(owner, &[])
    }

    /// Overwrite `owner`'s cart with `lines`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be written.
    pub fn replace(&self, owner: &CartOwner, lines: &[CartLine]) -> Result<(), RepositoryError> {
        write_list(self.store, &owner.key(), lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use tabcart_core::total_amount;

    use super::*;
    use crate::models::NewCartLine;
    use crate::store::MemoryStore;

    fn line(title: &str, price: &str) -> CartLine {
        NewCartLine {
            title: title.to_owned(),
            price: price.to_owned(),
            image: None,
        }
        .into_line("p.jpg", Utc.timestamp_millis_opt(0).unwrap())
    }

    fn titles(lines: &[CartLine]) -> Vec<&str> {
        lines.iter().map(|l| l.title.as_str()).collect()
    }

    fn account() -> CartOwner {
        CartOwner::Account(AccountId::parse("a@b.com").unwrap())
    }

    #[test]
    fn test_owner_key() {
        assert_eq!(CartOwner::from(None).key(), "cart:guest");
        assert_eq!(
            CartOwner::from(Some(AccountId::parse("A@b.com").unwrap())).key(),
            "cart:a@b.com"
        );
    }

    #[test]
    fn test_read_missing_is_empty() {
        let store = MemoryStore::new();
        assert!(CartStore::new(&store).read(&CartOwner::Guest).unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);

        carts.append(&CartOwner::Guest, line("a", "1")).unwrap();
        carts.append(&CartOwner::Guest, line("b", "2")).unwrap();
        carts.append(&CartOwner::Guest, line("c", "3")).unwrap();

        assert_eq!(titles(&carts.read(&CartOwner::Guest).unwrap()), ["a", "b", "c"]);
        // Other owners are untouched.
        assert!(carts.read(&account()).unwrap().is_empty());
    }

    #[test]
    fn test_remove_at() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        for t in ["a", "b", "c"] {
            carts.append(&account(), line(t, "1")).unwrap();
        }

        let removed = carts.remove_at(&account(), 1).unwrap().unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&carts.read(&account()).unwrap()), ["a", "c"]);
    }

    #[test]
    fn test_remove_at_out_of_range_changes_nothing() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        carts.append(&account(), line("a", "1")).unwrap();
        carts.append(&account(), line("b", "1")).unwrap();
        let before = store.get("cart:a@b.com").unwrap();

        assert!(carts.remove_at(&account(), 2).unwrap().is_none());
        assert!(carts.remove_at(&account(), usize::MAX).unwrap().is_none());
        assert_eq!(store.get("cart:a@b.com").unwrap(), before);

        // Empty cart, index 0.
        assert!(carts.remove_at(&CartOwner::Guest, 0).unwrap().is_none());
    }

    #[test]
    fn test_remove_line_by_id() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        carts.append(&CartOwner::Guest, line("a", "1")).unwrap();
        carts.append(&CartOwner::Guest, line("b", "1")).unwrap();
        let target = carts.read(&CartOwner::Guest).unwrap()[1].id;

        let removed = carts.remove_line(&CartOwner::Guest, target).unwrap().unwrap();
        assert_eq!(removed.title, "b");
        assert!(carts
            .remove_line(&CartOwner::Guest, target)
            .unwrap()
            .is_none());
        assert_eq!(titles(&carts.read(&CartOwner::Guest).unwrap()), ["a"]);
    }

    #[test]
    fn test_removing_last_line_removes_key() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        carts.append(&CartOwner::Guest, line("a", "1")).unwrap();

        carts.remove_at(&CartOwner::Guest, 0).unwrap();
        assert_eq!(store.get("cart:guest").unwrap(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        carts.append(&CartOwner::Guest, line("a", "1")).unwrap();

        carts.clear(&CartOwner::Guest).unwrap();
        carts.clear(&CartOwner::Guest).unwrap();
        assert_eq!(carts.len(&CartOwner::Guest).unwrap(), 0);
    }

    #[test]
    fn test_total() {
        let store = MemoryStore::new();
        let carts = CartStore::new(&store);
        carts.append(&CartOwner::Guest, line("Shirt", "₦5,000")).unwrap();
        carts.append(&CartOwner::Guest, line("Cap", "₦1,250")).unwrap();
        carts.append(&CartOwner::Guest, line("Gift", "free")).unwrap();

        let lines = carts.read(&CartOwner::Guest).unwrap();
        assert_eq!(total_amount(lines.iter().map(|line| &line.price)), 6250);
    }

    fn legacy_guest_cart() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .set(
                "cart:guest",
                r#"[{"title":"Old","price":"₦10","image":"x.jpg","added":0},
                    {"title":"Older","price":"₦20","image":"x.jpg","added":0}]"#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_legacy_line_removable_by_id_from_earlier_read() {
        let store = legacy_guest_cart();
        let carts = CartStore::new(&store);

        let shown = carts.read(&CartOwner::Guest).unwrap();
        let removed = carts
            .remove_line(&CartOwner::Guest, shown[1].id)
            .unwrap()
            .unwrap();

        assert_eq!(removed.title, "Older");
        assert_eq!(titles(&carts.read(&CartOwner::Guest).unwrap()), ["Old"]);
    }

    #[test]
    fn test_legacy_ids_persist_after_write() {
        let store = legacy_guest_cart();
        let carts = CartStore::new(&store);
        let before = carts.read(&CartOwner::Guest).unwrap();

        carts.append(&CartOwner::Guest, line("New", "₦20")).unwrap();

        assert!(store.get("cart:guest").unwrap().unwrap().contains(&before[0].id.to_string()));
        let after = carts.read(&CartOwner::Guest).unwrap();
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[1].id, before[1].id);
    }
}
