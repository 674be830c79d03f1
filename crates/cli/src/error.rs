//! Error type for CLI commands.

use tableside_cart::{CheckoutError, SessionError};
use tableside_core::PriceError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A menu item or output document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `--price` argument is not a valid price.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// The menu item cannot be held in a cart.
    #[error("Invalid menu item: {0}")]
    Item(#[from] SessionError),

    /// The cart cannot be checked out yet.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// A required argument was not supplied.
    #[error("Missing argument: --{0}")]
    MissingArgument(&'static str),
}
