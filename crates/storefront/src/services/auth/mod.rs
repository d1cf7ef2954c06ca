//! Authentication service.
//!
//! Registration, sign-in and the two-step password reset. Session handling
//! and the guest-cart merge that follows a sign-in belong to the caller.

mod error;

pub use error::{AuthError, Field, ValidationError};

use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use tabcart_core::{AccountId, Secret};

use crate::db::{AccountDirectory, RepositoryError};
use crate::models::Account;
use crate::store::KeyValueStore;

/// Optional phone: digits, `+` and spaces, 7 to 15 characters.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+ ]{7,15}$").expect("Invalid regex"));

/// Registration form as submitted.
#[derive(Debug)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Empty when not given.
    pub phone: String,
    pub password: SecretString,
}

/// Sign-in form as submitted.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Proof that a password reset was requested for an existing account.
///
/// Only [`AuthService::find_for_reset`] hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTicket {
    account: AccountId,
}

impl ResetTicket {
    /// Account whose password will be reset.
    #[must_use]
    pub const fn account(&self) -> &AccountId {
        &self.account
    }
}

/// Authentication service.
pub struct AuthService<'a, S: ?Sized> {
    accounts: AccountDirectory<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            accounts: AccountDirectory::new(store),
        }
    }

    /// Register a new account.
    ///
    /// Fields are checked in form order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for a rejected field.
    /// Returns `AuthError::AlreadyExists` if the email is already registered.
    /// Returns `AuthError::Repository` if the store fails.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub fn register(&self, form: &RegisterForm) -> Result<AccountId, AuthError> {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        let phone = form.phone.trim();

        if first_name.is_empty() {
            return Err(ValidationError::new(Field::FirstName, "First name required").into());
        }
        if last_name.is_empty() {
            return Err(ValidationError::new(Field::LastName, "Last name required").into());
        }

        let id = AccountId::parse(&form.email).map_err(ValidationError::from)?;

        if !phone.is_empty() && !PHONE_RE.is_match(phone) {
            return Err(ValidationError::new(Field::Phone, "Enter a valid phone").into());
        }

        let secret =
            Secret::new(form.password.expose_secret()).map_err(ValidationError::from)?;

        let account = Account {
            secret,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            phone: phone.to_owned(),
        };

        self.accounts.insert(&id, account).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::AlreadyExists,
            other => AuthError::Repository(other),
        })?;

        info!(account = %id, "Account registered");
        Ok(id)
    }

    /// Check an email and password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is empty.
    /// Returns `AuthError::InvalidCredentials` if there is no such account or
    /// the password does not match.
    /// Returns `AuthError::Repository` if the store fails.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub fn authenticate(&self, form: &LoginForm) -> Result<AccountId, AuthError> {
        if form.email.trim().is_empty() {
            return Err(ValidationError::new(Field::Email, "Email is required").into());
        }
        if form.password.expose_secret().is_empty() {
            return Err(ValidationError::new(Field::Password, "Password is required").into());
        }

        let Ok(id) = AccountId::parse(&form.email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let account = self
            .accounts
            .lookup(&id)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.secret.matches(form.password.expose_secret()) {
            debug!(account = %id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(id)
    }

    /// First reset step: confirm the account exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the email is empty.
    /// Returns `AuthError::NotFound` if no account has this email.
    /// Returns `AuthError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub fn find_for_reset(&self, email: &str) -> Result<ResetTicket, AuthError> {
        if email.trim().is_empty() {
            return Err(ValidationError::new(Field::Email, "Email required").into());
        }

        let Ok(account) = AccountId::parse(email) else {
            return Err(AuthError::NotFound);
        };

        if !self.accounts.exists(&account)? {
            return Err(AuthError::NotFound);
        }

        Ok(ResetTicket { account })
    }

    /// Second reset step: store the new password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the new password is too short.
    /// Returns `AuthError::NotFound` if the account has disappeared since the
    /// ticket was issued.
    /// Returns `AuthError::Repository` if the store fails.
    #[instrument(skip(self, ticket, new_password), fields(account = %ticket.account))]
    pub fn set_secret(
        &self,
        ticket: &ResetTicket,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        let secret = Secret::new(new_password.expose_secret()).map_err(|_| {
            ValidationError::new(Field::NewPassword, "Password must be at least 6 chars")
        })?;

        self.accounts
            .update_secret(&ticket.account, secret)
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::NotFound,
                other => AuthError::Repository(other),
            })?;

        info!(account = %ticket.account, "Password reset");
        Ok(())
    }
}
