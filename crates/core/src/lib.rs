//! tabcart core - Shared types library.
//!
//! This crate provides the types used across all tabcart components:
//! - `storefront` - The cart/session engine over a key-value store
//! - `cli` - Command-line driver that acts as one browser tab
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access. This keeps
//! it lightweight and allows it to be used anywhere, including `wasm32`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account ids, secrets, prices, ids and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
