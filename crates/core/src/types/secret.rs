//! Account secret (password) type.
//!
//! Secrets are stored and compared as-is. There is no hashing here: a stored
//! `Secret` is exactly what the user typed. The `Debug` impl redacts the
//! value so it never ends up in logs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`Secret`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// No password was supplied.
    #[error("Password is required")]
    Empty,
    /// The password is shorter than [`Secret::MIN_LENGTH`].
    #[error("Minimum {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A validated account password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Minimum password length, counted in characters.
    pub const MIN_LENGTH: usize = 6;

    /// Validate a new password.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Empty`] for an empty input and
    /// [`SecretError::TooShort`] when it has fewer than [`Self::MIN_LENGTH`]
    /// characters.
    pub fn new(s: &str) -> Result<Self, SecretError> {
        if s.is_empty() {
            return Err(SecretError::Empty);
        }

        if s.chars().count() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Whether `candidate` equals this secret.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Exposes the raw secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}
