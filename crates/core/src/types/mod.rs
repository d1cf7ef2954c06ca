//! Core types for tabcart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account_id;
pub mod id;
pub mod price;
pub mod secret;
pub mod status;

pub use account_id::{AccountId, AccountIdError};
pub use id::{LineId, OrderId};
pub use price::{PriceText, format_amount, total_amount};
pub use secret::{Secret, SecretError};
pub use status::{MergeOutcome, NoticeKind};
