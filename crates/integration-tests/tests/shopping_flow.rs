//! End-to-end shopping flows.
//!
//! A guest fills a cart, registers, and checks out. The same flow runs on
//! a file store to cover persistence between separate processes.

use tabcart_integration_tests::{item, messages, registration, shirt, shop, shop_on};
use tabcart_storefront::db::keys;
use tabcart_storefront::{CartPageMode, JsonFileStore, KeyValueStore};

// =============================================================================
// In-Memory Flow
// =============================================================================

#[test]
fn test_guest_registers_and_checks_out() {
    let (shop, notices) = shop();

    let view = shop.add_to_cart(shirt()).unwrap();
    assert_eq!(view.identity, None);
    assert_eq!(view.label, "Login / Register");
    assert_eq!(view.cart_count, 1);

    let page = shop.cart_page().unwrap();
    assert_eq!(page.mode, CartPageMode::Guest);
    assert_eq!(page.total, 5000);
    assert_eq!(page.total_display, "₦5,000");
    assert!(!page.checkout_enabled);

    let view = shop.register(&registration("ada@example.com")).unwrap();
    assert_eq!(view.label, "Welcome, Ada");
    assert_eq!(view.avatar.unwrap().initials, "AL");
    // The guest shirt moved into the account cart.
    assert_eq!(view.cart_count, 1);

    let page = shop.cart_page().unwrap();
    assert_eq!(page.mode, CartPageMode::Account);
    assert!(page.checkout_enabled);

    let view = shop.checkout().unwrap();
    assert_eq!(view.cart_count, 0);

    let orders = shop.orders().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, 5000);
    assert_eq!(orders[0].items[0].title, "Shirt");

    assert_eq!(
        messages(&notices),
        [
            "Added to cart".to_owned(),
            "Guest items moved to your cart".to_owned(),
            "Account created, signed in".to_owned(),
            format!("Checkout successful, order placed (id: {})", orders[0].id),
        ]
    );
}

#[test]
fn test_order_ids_increase() {
    let (shop, _) = shop();
    shop.register(&registration("ada@example.com")).unwrap();

    for _ in 0..3 {
        shop.add_to_cart(shirt()).unwrap();
        shop.checkout().unwrap();
    }

    let orders = shop.orders().unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_unparseable_prices_count_as_zero() {
    let (shop, _) = shop();
    shop.add_to_cart(item("Gift", "free")).unwrap();
    shop.add_to_cart(item("Cap", "₦1,500")).unwrap();

    let page = shop.cart_page().unwrap();
    assert_eq!(page.total, 1500);
    assert_eq!(page.item_count_label, "2 items");
}

// =============================================================================
// Stored Data
// =============================================================================

#[test]
fn test_remove_line_on_cart_stored_without_ids() {
    let (shop, _) = shop();
    shop.store()
        .set(
            keys::GUEST_CART,
            r#"[{"title":"Old","price":"₦10","image":"x.jpg","added":0},
                {"title":"Older","price":"₦20","image":"x.jpg","added":0}]"#,
        )
        .unwrap();

    let page = shop.cart_page().unwrap();
    assert_eq!(page.total, 30);
    let view = shop.remove_line(page.lines[0].id).unwrap();

    assert_eq!(view.cart_count, 1);
    let page = shop.cart_page().unwrap();
    assert_eq!(page.lines[0].title, "Older");
    // The remaining line kept the id it was shown with.
    shop.remove_line(page.lines[0].id).unwrap();
    assert_eq!(shop.view().unwrap().cart_count, 0);
}

// =============================================================================
// File Store
// =============================================================================

#[test]
fn test_file_store_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let (shop, _) = shop_on(JsonFileStore::new(&path));
        shop.add_to_cart(shirt()).unwrap();
        shop.register(&registration("ada@example.com")).unwrap();
    }

    // A second "process" sees the session and the merged cart.
    let (shop, _) = shop_on(JsonFileStore::new(&path));
    let view = shop.view().unwrap();
    assert_eq!(view.identity.unwrap().as_str(), "ada@example.com");
    assert_eq!(view.cart_count, 1);

    shop.checkout().unwrap();
    let (shop, _) = shop_on(JsonFileStore::new(&path));
    assert_eq!(shop.orders().unwrap().len(), 1);
    assert_eq!(shop.view().unwrap().cart_count, 0);
}

#[test]
fn test_corrupt_file_is_fatal_and_generic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").unwrap();

    let (shop, notices) = shop_on(JsonFileStore::new(&path));
    let err = shop.add_to_cart(shirt()).unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(
        messages(&notices),
        ["Something went wrong, please try again"]
    );
}
