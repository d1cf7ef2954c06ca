//! Per-account order history.

use tracing::debug;

use tabcart_core::AccountId;

use super::{RepositoryError, keys, read_json, write_list};
use crate::models::{CartLine, Order};
use crate::store::KeyValueStore;

/// Repository for order history. Orders are append-only, oldest first.
pub struct OrderHistory<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> OrderHistory<'a, S> {
    /// Create a new order history repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All orders placed by `id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    /// Returns `RepositoryError::DataCorruption` if the history cannot be decoded.
    pub fn list(&self, id: &AccountId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = read_json(self.store, &keys::orders(id))?.unwrap_or_default();
        for order in &mut orders {
            CartLine::assign_legacy_ids(&mut order.items);
        }
        Ok(orders)
    }

    /// Append `order` to `id`'s history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the history cannot be read or written.
    pub fn append(&self, id: &AccountId, order: Order) -> Result<(), RepositoryError> {
        let mut orders = self.list(id)?;
        let order_id = order.id;
        orders.push(order);
        self.replace(id, &orders)?;
        debug!(account = %id, order = %order_id, count = orders.len(), "Order recorded");
        Ok(())
    }

    /// Overwrite `id`'s history with `orders`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the history cannot be written.
    pub fn replace(&self, id: &AccountId, orders: &[Order]) -> Result<(), RepositoryError> {
        write_list(self.store, &keys::orders(id), orders)
    }
}
