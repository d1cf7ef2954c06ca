//! Domain models for the storefront engine.
//!
//! These are the records persisted in the key-value store. Record field
//! names match what the browser pages wrote, so an old cart line or order
//! decodes as-is. Store keys are this engine's own (see [`crate::db`]).

pub mod account;
pub mod cart;
pub mod order;

pub use account::Account;
pub use cart::{CartLine, NewCartLine};
pub use order::Order;
