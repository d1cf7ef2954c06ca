//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! tabcart register --first-name Ada --last-name Lovelace -e ada@example.com -p secret1
//! tabcart login -e ada@example.com -p secret1
//! tabcart whoami
//! tabcart reset-password -e ada@example.com -n newsecret
//! tabcart logout
//! ```

use secrecy::SecretString;

use tabcart_storefront::{LoginForm, RegisterForm};

use super::{CliError, Shop};
use crate::output;

/// Create an account and sign in. Guest items move into the new account.
pub fn register(shop: &Shop, form: &RegisterForm) -> Result<(), CliError> {
    let view = shop.register(form)?;
    output::header(&view);
    Ok(())
}

/// Sign in. Guest items move into the account.
pub fn login(shop: &Shop, form: &LoginForm) -> Result<(), CliError> {
    let view = shop.login(form)?;
    output::header(&view);
    Ok(())
}

pub fn logout(shop: &Shop) -> Result<(), CliError> {
    let view = shop.logout()?;
    output::header(&view);
    Ok(())
}

pub fn whoami(shop: &Shop) -> Result<(), CliError> {
    let view = shop.view()?;
    output::header(&view);
    Ok(())
}

/// Both reset steps in one go: look the account up, then set the secret.
///
/// Does not sign in; the user logs in with the new password afterwards.
pub fn reset_password(shop: &Shop, email: &str, new_password: &SecretString) -> Result<(), CliError> {
    let ticket = shop.request_password_reset(email)?;
    tracing::info!("Resetting password for {}", ticket.account());
    let view = shop.set_new_password(&ticket, new_password)?;
    output::header(&view);
    Ok(())
}
