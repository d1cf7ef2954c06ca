//! Auth entry points.

use secrecy::SecretString;
use tracing::{error, info};

use tabcart_core::AccountId;

use crate::db::{AccountDirectory, RepositoryError, SessionRegistry};
use crate::error::Result;
use crate::services::auth::{AuthService, LoginForm, RegisterForm, ResetTicket};
use crate::services::merge::CartMergeEngine;
use crate::services::notify::NotificationSink;
use crate::state::Storefront;
use crate::store::KeyValueStore;
use crate::view::ViewState;

impl<S: KeyValueStore, N: NotificationSink> Storefront<S, N> {
    /// Register, sign in and move the guest cart into the new account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the form is rejected or the email is
    /// taken; nothing is written.
    /// Returns a fatal `AppError` if the store fails; the new account is
    /// removed again so the registration can be retried.
    pub fn register(&self, form: &RegisterForm) -> Result<ViewState> {
        self.run("register", || {
            let id = AuthService::new(self.store()).register(form)?;
            if let Err(e) = self.sign_in(&id) {
                error!(account = %id, error = %e, "Sign-in after registration failed, removing account");
                let restore = AccountDirectory::new(self.store()).remove(&id);
                return Err(e.with_rollback(restore).into());
            }
            self.success("Account created, signed in");
            self.refresh()
        })
    }

    /// Sign in and move the guest cart into the account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` for an empty field or bad credentials.
    /// Returns a fatal `AppError` if the store fails; the previous session
    /// is put back.
    pub fn login(&self, form: &LoginForm) -> Result<ViewState> {
        self.run("login", || {
            let id = AuthService::new(self.store()).authenticate(form)?;
            self.sign_in(&id)?;
            self.success("Signed in");
            self.refresh()
        })
    }

    /// Sign out. The account cart stays in the store for next time.
    ///
    /// # Errors
    ///
    /// Returns a fatal `AppError` if the store fails.
    pub fn logout(&self) -> Result<ViewState> {
        self.run("logout", || {
            SessionRegistry::new(self.store()).logout()?;
            info!("Signed out");
            self.success("Signed out");
            self.refresh()
        })
    }

    /// Start a password reset for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the email is empty or unknown.
    /// Returns a fatal `AppError` if the store fails.
    pub fn request_password_reset(&self, email: &str) -> Result<ResetTicket> {
        self.run("request_password_reset", || {
            Ok(AuthService::new(self.store()).find_for_reset(email)?)
        })
    }

    /// Finish a password reset. The session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the new password is too short.
    /// Returns a fatal `AppError` if the store fails.
    pub fn set_new_password(
        &self,
        ticket: &ResetTicket,
        new_password: &SecretString,
    ) -> Result<ViewState> {
        self.run("set_new_password", || {
            AuthService::new(self.store()).set_secret(ticket, new_password)?;
            self.success("Password updated, please sign in");
            self.refresh()
        })
    }

    /// Set the session and merge the guest cart. If the merge fails the
    /// previous session is restored.
    fn sign_in(&self, id: &AccountId) -> std::result::Result<(), RepositoryError> {
        let sessions = SessionRegistry::new(self.store());
        let previous = sessions.current_identity()?;
        sessions.set_current_identity(Some(id))?;

        let outcome = match CartMergeEngine::new(self.store()).merge_guest_into(id) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(account = %id, error = %e, "Guest cart merge failed, restoring session");
                let restore = sessions.set_current_identity(previous.as_ref());
                return Err(e.with_rollback(restore));
            }
        };

        info!(account = %id, "Signed in");
        if outcome.moved() > 0 {
            self.success("Guest items moved to your cart");
        }
        Ok(())
    }
}
