//! Authentication error types.

use thiserror::Error;

use tabcart_core::{AccountIdError, SecretError};

use crate::db::RepositoryError;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    NewPassword,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstName => write!(f, "first_name"),
            Self::LastName => write!(f, "last_name"),
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
            Self::Password => write!(f, "password"),
            Self::NewPassword => write!(f, "new_password"),
        }
    }
}

/// A rejected form field. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Field the message should be shown next to.
    pub field: Field,
    /// Message for the user.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    #[must_use]
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<AccountIdError> for ValidationError {
    fn from(err: AccountIdError) -> Self {
        Self::new(Field::Email, err.to_string())
    }
}

impl From<SecretError> for ValidationError {
    fn from(err: SecretError) -> Self {
        Self::new(Field::Password, err.to_string())
    }
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration with an id that is already taken.
    #[error("Email already registered")]
    AlreadyExists,

    /// Unknown account or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password reset for an unknown account.
    #[error("No account found")]
    NotFound,

    /// Repository/store error.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Form field the error should be shown next to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::Validation(err) => Some(err.field),
            Self::AlreadyExists | Self::InvalidCredentials | Self::NotFound => Some(Field::Email),
            Self::Repository(_) => None,
        }
    }
}
