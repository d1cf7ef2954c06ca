//! Business logic services for the storefront engine.
//!
//! # Services
//!
//! - `auth` - Registration, sign-in, password reset
//! - `cart` - Add, remove, clear, checkout
//! - `merge` - Guest cart to account cart
//! - `notify` - User-facing notices

pub mod auth;
pub mod cart;
pub mod merge;
pub mod notify;

pub use auth::{AuthError, AuthService, LoginForm, RegisterForm, ResetTicket};
pub use cart::{CartError, CartService};
pub use merge::CartMergeEngine;
pub use notify::{Notice, NotificationSink, RecordingNotifier, TracingNotifier};
