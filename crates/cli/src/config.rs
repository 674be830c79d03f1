//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TABLESIDE_DATA_DIR` - Directory holding the saved cart (default: `.tableside`)
//! - `TABLESIDE_CART_KEY` - Storage key of the cart (default: `restaurant_cart`)
//! - `TABLESIDE_CURRENCY` - Currency used to display prices (default: `INR`)
//! - `TABLESIDE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Log filter (default: `tableside_cli=info,tableside_cart=info`)

use std::path::PathBuf;

use tableside_cart::{DEFAULT_STORAGE_KEY, FileStorage};
use tableside_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".tableside";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the file storage writes to
    pub data_dir: PathBuf,
    /// Storage key the cart session is saved under
    pub cart_key: String,
    /// Currency for price display
    pub currency: CurrencyCode,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let data_dir = PathBuf::from(get_or_default("TABLESIDE_DATA_DIR", DEFAULT_DATA_DIR));

        let cart_key = get_or_default("TABLESIDE_CART_KEY", DEFAULT_STORAGE_KEY);
        FileStorage::new(&data_dir)
            .path_for(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("TABLESIDE_CART_KEY".to_string(), e.to_string()))?;

        let currency = get_or_default("TABLESIDE_CURRENCY", CurrencyCode::INR.code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("TABLESIDE_CURRENCY".to_string(), e))?;

        let log_format = match get_or_default("TABLESIDE_LOG_FORMAT", "pretty")
            .to_ascii_lowercase()
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "TABLESIDE_LOG_FORMAT".to_string(),
                    format!("expected 'pretty' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            data_dir,
            cart_key,
            currency,
            log_format,
        })
    }

    /// The storage backend for this configuration.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}
