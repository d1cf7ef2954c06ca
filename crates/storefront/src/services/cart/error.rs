//! Cart error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Actions that need a signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gated {
    Checkout,
    MergeGuestItems,
}

impl std::fmt::Display for Gated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkout => write!(f, "checkout"),
            Self::MergeGuestItems => write!(f, "merge guest items"),
        }
    }
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The index no longer points at a line, usually because another tab
    /// changed the cart. Nothing was removed.
    #[error("Item no longer in cart")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Cart length at the time of the request.
        len: usize,
    },

    /// No line has the requested id. Nothing was removed.
    #[error("Item no longer in cart")]
    LineNotFound,

    /// Checkout of an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The action is only available to signed-in accounts.
    #[error("Sign in to {0}")]
    SignInRequired(Gated),

    /// Repository/store error.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),
}
