//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TABCART_STORE_PATH` - JSON file backing the store for file-based hosts
//!   (default: `tabcart-store.json`)
//! - `TABCART_CURRENCY_SYMBOL` - Symbol prefixed to formatted totals
//!   (default: `₦`)
//! - `TABCART_PLACEHOLDER_IMAGE` - Image used for products without one
//!   (default: `images/placeholder1.jpg`)

use std::path::PathBuf;

use thiserror::Error;

/// Default JSON store file.
pub const DEFAULT_STORE_PATH: &str = "tabcart-store.json";
/// Default currency symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
/// Default product image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/placeholder1.jpg";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Backing file for [`JsonFileStore`](crate::store::JsonFileStore)
    pub store_path: PathBuf,
    /// Prefix for formatted totals
    pub currency_symbol: String,
    /// Image for product cards without one
    pub placeholder_image: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            let value = lookup(key).unwrap_or_else(|| default.to_owned());
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(value)
        };

        let store_path = PathBuf::from(get("TABCART_STORE_PATH", DEFAULT_STORE_PATH)?);
        let currency_symbol = get("TABCART_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL)?;
        let placeholder_image = get("TABCART_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE)?;

        // Digits in the symbol would be counted into every total.
        if currency_symbol.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "TABCART_CURRENCY_SYMBOL".to_owned(),
                "must not contain digits".to_owned(),
            ));
        }

        Ok(Self {
            store_path,
            currency_symbol,
            placeholder_image,
        })
    }
}
