//! Cart entry points.

use tracing::info;

use tabcart_core::LineId;

use crate::error::Result;
use crate::models::{NewCartLine, Order};
use crate::services::cart::{CartError, CartService, Gated};
use crate::services::merge::CartMergeEngine;
use crate::services::notify::NotificationSink;
use crate::state::Storefront;
use crate::store::KeyValueStore;
use crate::view::{CartPageView, ViewState};

impl<S: KeyValueStore, N: NotificationSink> Storefront<S, N> {
    fn carts(&self) -> CartService<'_, S> {
        CartService::new(self.store(), &self.config().placeholder_image)
    }

    /// Add a product card to the active cart.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn add_to_cart(&self, item: NewCartLine) -> Result<ViewState> {
        self.run("add_to_cart", || {
            let owner = self.owner()?;
            self.carts().add(&owner, item, Self::now())?;
            self.success("Added to cart");
            self.refresh()
        })
    }

    /// Remove the line at `index` of the active cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` with `CartError::OutOfRange` if the index is
    /// stale; the cart is untouched.
    /// Returns a fatal `AppError` if the store fails.
    pub fn remove_from_cart(&self, index: usize) -> Result<ViewState> {
        self.run("remove_from_cart", || {
            let owner = self.owner()?;
            self.carts().remove_at(&owner, index)?;
            self.success("Item removed");
            self.refresh()
        })
    }

    /// Remove the line with id `line_id` from the active cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` with `CartError::LineNotFound` if the line is
    /// gone.
    /// Returns a fatal `AppError` if the store fails.
    pub fn remove_line(&self, line_id: LineId) -> Result<ViewState> {
        self.run("remove_line", || {
            let owner = self.owner()?;
            self.carts().remove_line(&owner, line_id)?;
            self.success("Item removed");
            self.refresh()
        })
    }

    /// Empty the active cart.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn clear_cart(&self) -> Result<ViewState> {
        self.run("clear_cart", || {
            let owner = self.owner()?;
            self.carts().clear(&owner)?;
            self.success("Cart cleared");
            self.refresh()
        })
    }

    /// Place an order for the signed-in account's cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` with `CartError::SignInRequired` for a guest
    /// or `CartError::EmptyCart` when there is nothing to buy.
    /// Returns a fatal `AppError` if the store fails.
    pub fn checkout(&self) -> Result<ViewState> {
        self.run("checkout", || {
            let owner = self.owner()?;
            let order = self.carts().checkout(&owner, Self::now())?;
            self.success(&format!(
                "Checkout successful, order placed (id: {})",
                order.id
            ));
            self.refresh()
        })
    }

    /// Move the guest cart into the signed-in account's cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` with `CartError::SignInRequired` for a guest.
    /// Returns a fatal `AppError` if the store fails.
    pub fn merge_guest_now(&self) -> Result<ViewState> {
        self.run("merge_guest_now", || {
            let Some(id) = self.identity()? else {
                return Err(CartError::SignInRequired(Gated::MergeGuestItems).into());
            };
            let outcome = CartMergeEngine::new(self.store()).merge_guest_into(&id)?;
            info!(account = %id, moved = outcome.moved(), "Merge requested");
            self.success("Guest items merged to your cart");
            self.refresh()
        })
    }

    /// What the cart page should show.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn cart_page(&self) -> Result<CartPageView> {
        self.run("cart_page", || {
            Ok(CartPageView::load(
                self.store(),
                &self.config().currency_symbol,
            )?)
        })
    }

    /// Orders placed by the signed-in account, oldest first. Empty for a
    /// guest.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn orders(&self) -> Result<Vec<Order>> {
        self.run("orders", || {
            let owner = self.owner()?;
            Ok(self.carts().orders(&owner)?)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use tabcart_core::NoticeKind;

    use crate::config::StorefrontConfig;
    use crate::error::AppError;
    use crate::models::NewCartLine;
    use crate::services::auth::RegisterForm;
    use crate::services::cart::CartError;
    use crate::services::notify::RecordingNotifier;
    use crate::state::Storefront;
    use crate::store::MemoryStore;
    use crate::view::CartPageMode;

    fn shop() -> (Storefront<MemoryStore, RecordingNotifier>, RecordingNotifier) {
        let notices = RecordingNotifier::new();
        let shop = Storefront::new(MemoryStore::new(), notices.clone(), StorefrontConfig::default());
        (shop, notices)
    }

    fn item(title: &str, price: &str) -> NewCartLine {
        NewCartLine {
            title: title.to_owned(),
            price: price.to_owned(),
            image: Some("images/p.jpg".to_owned()),
        }
    }

    fn register(shop: &Storefront<MemoryStore, RecordingNotifier>) {
        shop.register(&RegisterForm {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "a@b.com".to_owned(),
            phone: String::new(),
            password: SecretString::from("secret1".to_owned()),
        })
        .unwrap();
    }

    #[test]
    fn test_guest_cart_flow() {
        let (shop, notices) = shop();

        let view = shop.add_to_cart(item("Shirt", "₦5,000")).unwrap();
        assert_eq!(view.cart_count, 1);
        shop.add_to_cart(item("Cap", "₦1,000")).unwrap();

        let view = shop.remove_from_cart(0).unwrap();
        assert_eq!(view.cart_count, 1);
        let page = shop.cart_page().unwrap();
        assert_eq!(page.lines[0].title, "Cap");
        assert_eq!(page.mode, CartPageMode::Guest);

        let view = shop.clear_cart().unwrap();
        assert_eq!(view.cart_count, 0);
        let messages: Vec<String> = notices.take().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            ["Added to cart", "Added to cart", "Item removed", "Cart cleared"]
        );
    }

    #[test]
    fn test_stale_index_is_reported_and_harmless() {
        let (shop, notices) = shop();
        shop.add_to_cart(item("Shirt", "₦5,000")).unwrap();

        let err = shop.remove_from_cart(4).unwrap_err();

        assert!(matches!(
            err,
            AppError::Cart(CartError::OutOfRange { index: 4, len: 1 })
        ));
        assert_eq!(notices.last().unwrap().kind, NoticeKind::Error);
        assert_eq!(shop.view().unwrap().cart_count, 1);
    }

    #[test]
    fn test_remove_line_by_id() {
        let (shop, _) = shop();
        shop.add_to_cart(item("Shirt", "₦5,000")).unwrap();
        let line = shop.cart_page().unwrap().lines[0].id;

        shop.remove_line(line).unwrap();
        assert!(matches!(
            shop.remove_line(line),
            Err(AppError::Cart(CartError::LineNotFound))
        ));
    }

    #[test]
    fn test_guest_checkout_requires_sign_in() {
        let (shop, notices) = shop();
        shop.add_to_cart(item("Shirt", "₦5,000")).unwrap();

        assert!(shop.checkout().is_err());
        assert_eq!(notices.last().unwrap().message, "Sign in to checkout");
        assert_eq!(shop.view().unwrap().cart_count, 1);
    }

    #[test]
    fn test_checkout() {
        let (shop, notices) = shop();
        register(&shop);
        shop.add_to_cart(item("Shirt", "₦5,000")).unwrap();

        let view = shop.checkout().unwrap();

        assert_eq!(view.cart_count, 0);
        let orders = shop.orders().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, 5000);
        assert_eq!(
            notices.last().unwrap().message,
            format!("Checkout successful, order placed (id: {})", orders[0].id)
        );

        assert!(shop.checkout().is_err());
        assert_eq!(notices.last().unwrap().message, "Cart is empty");
    }

    #[test]
    fn test_merge_guest_now() {
        let (shop, notices) = shop();
        assert!(shop.merge_guest_now().is_err());
        assert_eq!(
            notices.last().unwrap().message,
            "Sign in to merge guest items"
        );

        register(&shop);
        let view = shop.merge_guest_now().unwrap();
        assert_eq!(view.cart_count, 0);
        assert_eq!(
            notices.last().unwrap().message,
            "Guest items merged to your cart"
        );
    }

    #[test]
    fn test_orders_empty_for_guest() {
        let (shop, _) = shop();
        assert!(shop.orders().unwrap().is_empty());
    }
}
