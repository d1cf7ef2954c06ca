//! Account directory.
//!
//! All accounts live in one JSON object under [`keys::ACCOUNTS`], keyed by
//! normalized account id. Accounts are only removed to undo a registration
//! that could not be completed.

use std::collections::BTreeMap;

use tracing::debug;

use tabcart_core::{AccountId, Secret};

use super::{RepositoryError, keys, read_json, write_json};
use crate::models::Account;
use crate::store::KeyValueStore;

type AccountMap = BTreeMap<String, Account>;

/// Repository for account profiles.
pub struct AccountDirectory<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> AccountDirectory<'a, S> {
    /// Create a new account directory.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<AccountMap, RepositoryError> {
        Ok(read_json(self.store, keys::ACCOUNTS)?.unwrap_or_default())
    }

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    /// Returns `RepositoryError::DataCorruption` if the directory cannot be decoded.
    pub fn lookup(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.load()?.remove(id.as_str()))
    }

    /// Whether an account with this id exists.
    ///
    /// # Errors
    ///
    /// Same as [`Self::lookup`].
    pub fn exists(&self, id: &AccountId) -> Result<bool, RepositoryError> {
        Ok(self.load()?.contains_key(id.as_str()))
    }

    /// Add a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is already registered;
    /// the directory is left untouched.
    /// Returns `RepositoryError::Store` if the store fails.
    pub fn insert(&self, id: &AccountId, account: Account) -> Result<(), RepositoryError> {
        let mut accounts = self.load()?;
        if accounts.contains_key(id.as_str()) {
            return Err(RepositoryError::Conflict("account already exists".to_owned()));
        }

        accounts.insert(id.as_str().to_owned(), account);
        write_json(self.store, keys::ACCOUNTS, &accounts)?;
        debug!(account = %id, total = accounts.len(), "Account created");
        Ok(())
    }

    /// Remove an account. Removing a missing account is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    pub fn remove(&self, id: &AccountId) -> Result<(), RepositoryError> {
        let mut accounts = self.load()?;
        if accounts.remove(id.as_str()).is_none() {
            return Ok(());
        }

        if accounts.is_empty() {
            self.store.remove(keys::ACCOUNTS)?;
        } else {
            write_json(self.store, keys::ACCOUNTS, &accounts)?;
        }
        debug!(account = %id, total = accounts.len(), "Account removed");
        Ok(())
    }

    /// Replace an account's password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no such account.
    /// Returns `RepositoryError::Store` if the store fails.
    pub fn update_secret(&self, id: &AccountId, secret: Secret) -> Result<(), RepositoryError> {
        let mut accounts = self.load()?;
        let account = accounts
            .get_mut(id.as_str())
            .ok_or(RepositoryError::NotFound)?;

        account.secret = secret;
        write_json(self.store, keys::ACCOUNTS, &accounts)?;
        debug!(account = %id, "Account password updated");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn account(secret: &str) -> Account {
        Account {
            secret: Secret::new(secret).unwrap(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            phone: String::new(),
        }
    }

    fn id(s: &str) -> AccountId {
        AccountId::parse(s).unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        accounts.insert(&id("a@b.com"), account("secret1")).unwrap();

        assert_eq!(accounts.lookup(&id("a@b.com")).unwrap(), Some(account("secret1")));
        assert!(accounts.exists(&id("A@B.com")).unwrap());
        assert_eq!(accounts.lookup(&id("x@b.com")).unwrap(), None);
    }

    #[test]
    fn test_remove_restores_previous_directory() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);
        accounts.insert(&id("a@b.com"), account("secret1")).unwrap();
        let before = store.get(keys::ACCOUNTS).unwrap();

        accounts.insert(&id("x@b.com"), account("secret1")).unwrap();
        accounts.remove(&id("x@b.com")).unwrap();
        assert_eq!(store.get(keys::ACCOUNTS).unwrap(), before);

        accounts.remove(&id("a@b.com")).unwrap();
        accounts.remove(&id("a@b.com")).unwrap();
        assert_eq!(store.get(keys::ACCOUNTS).unwrap(), None);
    }

    #[test]
    fn test_insert_duplicate_leaves_directory_unchanged() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);
        accounts.insert(&id("a@b.com"), account("secret1")).unwrap();
        let before = store.get(keys::ACCOUNTS).unwrap();

        let err = accounts
            .insert(&id("a@b.com"), account("other-secret"))
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.get(keys::ACCOUNTS).unwrap(), before);
    }

    #[test]
    fn test_update_secret() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);
        accounts.insert(&id("a@b.com"), account("secret1")).unwrap();

        accounts
            .update_secret(&id("a@b.com"), Secret::new("secret2").unwrap())
            .unwrap();

        let updated = accounts.lookup(&id("a@b.com")).unwrap().unwrap();
        assert!(updated.secret.matches("secret2"));
        assert_eq!(updated.first_name, "Ada");
    }

    #[test]
    fn test_update_secret_unknown_account() {
        let store = MemoryStore::new();
        let err = AccountDirectory::new(&store)
            .update_secret(&id("a@b.com"), Secret::new("secret2").unwrap())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(store.get(keys::ACCOUNTS).unwrap(), None);
    }

    #[test]
    fn test_reads_directory_written_by_browser_pages() {
        let store = MemoryStore::new();
        store
            .set(
                keys::ACCOUNTS,
                r#"{"a@b.com":{"password":"pw1234","firstName":"Ada","lastName":"L","phone":""}}"#,
            )
            .unwrap();

        let found = AccountDirectory::new(&store)
            .lookup(&id("a@b.com"))
            .unwrap()
            .unwrap();
        assert!(found.secret.matches("pw1234"));
    }
}
