//! Subcommand implementations.
//!
//! Each function performs one engine action and prints what a tab would
//! show afterwards. Notices are printed by `main` once the command returns,
//! so failures are reported to the user as well as logged.

pub mod account;
pub mod cart;

use thiserror::Error;

use tabcart_storefront::{AppError, ConfigError, JsonFileStore, RecordingNotifier, Storefront};

/// The engine as the CLI runs it.
pub type Shop = Storefront<JsonFileStore, RecordingNotifier>;

/// Errors that can end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The engine rejected or failed the action.
    #[error(transparent)]
    App(#[from] AppError),
}
