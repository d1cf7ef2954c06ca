//! Integration tests for tabcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tabcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Guest to checkout, on memory and file stores
//! - `cart_merge` - Guest cart merge on sign-in, including store failures
//! - `multi_tab` - Cross-tab events and session self-heal
//! - `accounts` - Registration, login and password reset rules
//!
//! This crate only holds fixtures; the tests live under `tests/`.

use secrecy::SecretString;

use tabcart_storefront::{
    KeyValueStore, LoginForm, MemoryBackend, MemoryStore, NewCartLine, RecordingNotifier,
    RegisterForm, Storefront, StorefrontConfig,
};

/// Password used by every fixture account.
pub const PASSWORD: &str = "secret1";

/// A tab whose notices are recorded.
pub type TestShop<S = MemoryStore> = Storefront<S, RecordingNotifier>;

/// Open a shop over `store` with default configuration.
pub fn shop_on<S: KeyValueStore>(store: S) -> (TestShop<S>, RecordingNotifier) {
    let notices = RecordingNotifier::new();
    let shop = Storefront::new(store, notices.clone(), StorefrontConfig::default());
    (shop, notices)
}

/// A single tab on a private in-memory store.
#[must_use]
pub fn shop() -> (TestShop, RecordingNotifier) {
    shop_on(MemoryStore::new())
}

/// Open another tab on `backend`.
///
/// # Panics
///
/// Panics if the backend lock is poisoned.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn tab(backend: &MemoryBackend) -> (TestShop, RecordingNotifier) {
    shop_on(backend.open_tab().unwrap())
}

/// Product card with a title and display price.
#[must_use]
pub fn item(title: &str, price: &str) -> NewCartLine {
    NewCartLine {
        title: title.to_owned(),
        price: price.to_owned(),
        image: Some(format!("images/{}.jpg", title.to_lowercase())),
    }
}

/// The shirt every walkthrough buys.
#[must_use]
pub fn shirt() -> NewCartLine {
    item("Shirt", "₦5,000")
}

/// Registration form for Ada with `email`.
#[must_use]
pub fn registration(email: &str) -> RegisterForm {
    RegisterForm {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: email.to_owned(),
        phone: "+234 800 000".to_owned(),
        password: SecretString::from(PASSWORD.to_owned()),
    }
}

/// Login form for `email` with `password`.
#[must_use]
pub fn login(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_owned(),
        password: SecretString::from(password.to_owned()),
    }
}

/// Messages recorded so far, draining the recorder.
#[must_use]
pub fn messages(notices: &RecordingNotifier) -> Vec<String> {
    notices.take().into_iter().map(|n| n.message).collect()
}
