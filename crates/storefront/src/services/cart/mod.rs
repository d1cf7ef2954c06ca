//! Cart service.
//!
//! Add, remove, clear and checkout on top of [`CartStore`] and
//! [`OrderHistory`].

mod error;

pub use error::{CartError, Gated};

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};

use tabcart_core::{LineId, OrderId, total_amount};

use crate::db::{CartOwner, CartStore, OrderHistory};
use crate::models::{CartLine, NewCartLine, Order};
use crate::store::KeyValueStore;

/// Cart service.
pub struct CartService<'a, S: ?Sized> {
    carts: CartStore<'a, S>,
    orders: OrderHistory<'a, S>,
    placeholder_image: &'a str,
}

impl<'a, S: KeyValueStore + ?Sized> CartService<'a, S> {
    /// Create a new cart service. `placeholder_image` fills in for product
    /// cards without an image.
    #[must_use]
    pub const fn new(store: &'a S, placeholder_image: &'a str) -> Self {
        Self {
            carts: CartStore::new(store),
            orders: OrderHistory::new(store),
            placeholder_image,
        }
    }

    /// Lines in `owner`'s cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub fn lines(&self, owner: &CartOwner) -> Result<Vec<CartLine>, CartError> {
        Ok(self.carts.read(owner)?)
    }

    /// Add a product to the end of `owner`'s cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self, item), fields(cart = %owner.key()))]
    pub fn add(
        &self,
        owner: &CartOwner,
        item: NewCartLine,
        now: DateTime<Utc>,
    ) -> Result<CartLine, CartError> {
        let line = item.into_line(self.placeholder_image, now);
        self.carts.append(owner, line.clone())?;
        Ok(line)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfRange` if there is no such line; the cart is
    /// untouched.
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self), fields(cart = %owner.key()))]
    pub fn remove_at(&self, owner: &CartOwner, index: usize) -> Result<CartLine, CartError> {
        match self.carts.remove_at(owner, index)? {
            Some(line) => Ok(line),
            None => Err(CartError::OutOfRange {
                index,
                len: self.carts.len(owner)?,
            }),
        }
    }

    /// Remove the line with id `line_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line has that id.
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self), fields(cart = %owner.key()))]
    pub fn remove_line(&self, owner: &CartOwner, line_id: LineId) -> Result<CartLine, CartError> {
        self.carts
            .remove_line(owner, line_id)?
            .ok_or(CartError::LineNotFound)
    }

    /// Empty `owner`'s cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    #[instrument(skip(self), fields(cart = %owner.key()))]
    pub fn clear(&self, owner: &CartOwner) -> Result<(), CartError> {
        Ok(self.carts.clear(owner)?)
    }

    /// Turn `owner`'s cart into an order.
    ///
    /// The order is recorded before the cart is cleared; if clearing fails
    /// the history is put back and the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `CartError::SignInRequired` for the guest cart.
    /// Returns `CartError::EmptyCart` if there is nothing to check out.
    /// Returns `CartError::Repository` if the store fails, wrapping
    /// `RepositoryError::RollbackFailed` if the history could not be put back.
    #[instrument(skip(self), fields(cart = %owner.key()))]
    pub fn checkout(&self, owner: &CartOwner, now: DateTime<Utc>) -> Result<Order, CartError> {
        let CartOwner::Account(id) = owner else {
            return Err(CartError::SignInRequired(Gated::Checkout));
        };

        let items = self.carts.read(owner)?;
        if items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let previous = self.orders.list(id)?;
        let newest = previous.iter().map(|order| order.id).max();
        let order = Order {
            id: OrderId::next_after(newest, now.timestamp_millis()),
            total: total_amount(items.iter().map(|line| &line.price)),
            items,
            date: now,
        };

        self.orders.append(id, order.clone())?;

        if let Err(e) = self.carts.clear(owner) {
            error!(error = %e, order = %order.id, "Failed to clear cart, withdrawing order");
            let restore = self.orders.replace(id, &previous).inspect_err(|restore| {
                error!(error = %restore, "Failed to restore order history");
            });
            return Err(e.with_rollback(restore).into());
        }

        info!(account = %id, order = %order.id, total = order.total, "Order placed");
        Ok(order)
    }

    /// Orders placed by `owner`, oldest first. Empty for the guest cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub fn orders(&self, owner: &CartOwner) -> Result<Vec<Order>, CartError> {
        match owner {
            CartOwner::Guest => Ok(Vec::new()),
            CartOwner::Account(id) => Ok(self.orders.list(id)?),
        }
    }
}
