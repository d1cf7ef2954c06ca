//! Several tabs sharing one store.
//!
//! Tabs hold no state of their own; these tests check that they see each
//! other's writes through storage events and never trust a stale session.

use tabcart_integration_tests::{messages, registration, shirt, tab};
use tabcart_storefront::db::keys;
use tabcart_storefront::{KeyValueStore, MemoryBackend};

#[test]
fn test_write_in_one_tab_reaches_the_other() {
    let backend = MemoryBackend::new();
    let (a, _) = tab(&backend);
    let (b, _) = tab(&backend);

    a.add_to_cart(shirt()).unwrap();

    // The writer gets no event for its own write.
    assert_eq!(a.poll_events().unwrap(), None);
    let view = b.poll_events().unwrap().unwrap();
    assert_eq!(view.cart_count, 1);
}

#[test]
fn test_sign_in_in_one_tab_updates_the_other() {
    let backend = MemoryBackend::new();
    let (a, _) = tab(&backend);
    let (b, _) = tab(&backend);

    a.register(&registration("ada@example.com")).unwrap();
    let view = b.poll_events().unwrap().unwrap();
    assert_eq!(view.label, "Welcome, Ada");

    a.logout().unwrap();
    let view = b.poll_events().unwrap().unwrap();
    assert_eq!(view.identity, None);
}

#[test]
fn test_order_writes_do_not_refresh() {
    let backend = MemoryBackend::new();
    let (a, _) = tab(&backend);
    let (b, _) = tab(&backend);

    a.register(&registration("ada@example.com")).unwrap();
    a.add_to_cart(shirt()).unwrap();
    b.poll_events().unwrap();

    b.store().set("orders:ada@example.com", "[]").unwrap();
    assert_eq!(a.poll_events().unwrap(), None);
}

#[test]
fn test_session_for_unknown_account_self_heals() {
    let backend = MemoryBackend::new();
    let (a, notices) = tab(&backend);
    let (b, _) = tab(&backend);

    a.register(&registration("ada@example.com")).unwrap();
    a.add_to_cart(shirt()).unwrap();
    // Another tab wipes the account directory.
    b.store().remove(keys::ACCOUNTS).unwrap();

    let view = a.poll_events().unwrap().unwrap();
    assert_eq!(view.identity, None);
    assert!(!backend.snapshot().unwrap().contains_key(keys::CURRENT_USER));

    // Acting as a guest now: the account cart is out of reach.
    let _ = messages(&notices);
    assert!(a.checkout().is_err());
    assert_eq!(messages(&notices), ["Sign in to checkout"]);
}

#[test]
fn test_clearing_the_store_signs_every_tab_out() {
    let backend = MemoryBackend::new();
    let (a, _) = tab(&backend);
    let (b, _) = tab(&backend);

    a.register(&registration("ada@example.com")).unwrap();
    b.poll_events().unwrap();

    a.store().clear().unwrap();
    let view = b.poll_events().unwrap().unwrap();
    assert_eq!(view.identity, None);
    assert_eq!(view.cart_count, 0);
}
