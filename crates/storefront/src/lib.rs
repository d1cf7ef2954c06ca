//! Tabcart storefront engine.
//!
//! Browser-local accounts, carts and orders on top of a shared key-value
//! store. Every tab of one browser profile runs its own [`Storefront`] over
//! the same store; tabs never cache state, and writes from other tabs arrive
//! as [`StorageEvent`]s.
//!
//! ```
//! use tabcart_storefront::{MemoryStore, NewCartLine, Storefront, StorefrontConfig};
//!
//! let shop = Storefront::with_store(MemoryStore::new(), StorefrontConfig::default());
//! let view = shop
//!     .add_to_cart(NewCartLine {
//!         title: "Shirt".to_owned(),
//!         price: "₦5,000".to_owned(),
//!         image: None,
//!     })
//!     .unwrap();
//! assert_eq!(view.cart_count, 1);
//! assert_eq!(shop.cart_page().unwrap().total_display, "₦5,000");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod view;

pub use config::{ConfigError, StorefrontConfig};
pub use error::AppError;
pub use models::{Account, CartLine, NewCartLine, Order};
pub use services::{
    LoginForm, Notice, NotificationSink, RecordingNotifier, RegisterForm, ResetTicket,
    TracingNotifier,
};
pub use state::Storefront;
pub use store::{JsonFileStore, KeyValueStore, MemoryBackend, MemoryStore, StorageEvent, StoreError};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use store::WebStorage;
pub use view::{Avatar, CartPageMode, CartPageView, ViewState};
