//! Unified error handling.
//!
//! Every entry point on [`Storefront`](crate::state::Storefront) returns
//! `Result<T, AppError>`. Business rejections carry a message meant for the
//! user; store failures are fatal for the operation and are shown as a
//! generic message so store internals never reach the page. A failure whose
//! undo also failed gets its own message, since the previous state is not
//! guaranteed.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::{AuthError, Field};
use crate::services::cart::CartError;

/// Message shown for any fatal error.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";

/// Message shown when a failed change could not be undone.
pub const PARTIAL_FAILURE: &str =
    "Something went wrong and your last change may be incomplete, please reload";

/// Application-level error type for the engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Store or decode failure outside a service.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AppError {
    /// Whether the store itself failed, as opposed to the request being
    /// rejected.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.store_failure().is_some()
    }

    const fn store_failure(&self) -> Option<&RepositoryError> {
        match self {
            Self::Repository(err)
            | Self::Auth(AuthError::Repository(err))
            | Self::Cart(CartError::Repository(err)) => Some(err),
            Self::Auth(_) | Self::Cart(_) => None,
        }
    }

    /// Message for the notification sink.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose store details to users
        match self.store_failure() {
            Some(err) if err.is_rollback_failure() => PARTIAL_FAILURE.to_owned(),
            Some(_) => GENERIC_FAILURE.to_owned(),
            None => self.rejection_message(),
        }
    }

    fn rejection_message(&self) -> String {
        match self {
            Self::Auth(err) => err.to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Repository(_) => GENERIC_FAILURE.to_owned(),
        }
    }

    /// Form field the message belongs next to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::Auth(err) => err.field(),
            Self::Cart(_) | Self::Repository(_) => None,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
