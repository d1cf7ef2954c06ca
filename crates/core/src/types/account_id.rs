//! Account identifier type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Loose `local@domain.tld` shape with no whitespace anywhere.
static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid regex"));

/// Errors that can occur when parsing an [`AccountId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// The input string is empty after trimming.
    #[error("Email is required")]
    Empty,
    /// The input does not look like an email address.
    #[error("Enter a valid email")]
    Malformed,
}

/// An account identifier: an email address, normalized to lowercase.
///
/// Two ids that differ only by case or surrounding whitespace are the same
/// account.
///
/// ## Constraints
///
/// - Must not be empty after trimming
/// - Must match `local@domain.tld` (no whitespace, a dot somewhere after the @)
///
/// ## Examples
///
/// ```
/// use tabcart_core::AccountId;
///
/// let id = AccountId::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(id.as_str(), "ada@example.com");
///
/// assert!(AccountId::parse("").is_err());
/// assert!(AccountId::parse("no-at-symbol").is_err());
/// assert!(AccountId::parse("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parse an `AccountId`, trimming and lowercasing the input.
    ///
    /// # Errors
    ///
    /// Returns [`AccountIdError::Empty`] for blank input and
    /// [`AccountIdError::Malformed`] when the email shape check fails.
    pub fn parse(s: &str) -> Result<Self, AccountIdError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AccountIdError::Empty);
        }

        if !ACCOUNT_ID_RE.is_match(&normalized) {
            return Err(AccountIdError::Malformed);
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the email (before the first @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
