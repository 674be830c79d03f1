//! Checkout command.
//!
//! Prints the order submission for the backend's order-creation endpoint.
//! Once the order has been accepted, run again with `--submitted` (or run
//! `tableside clear`) to empty the cart.
//!
//! # Usage
//!
//! ```bash
//! tableside checkout --phone "+91 98765 43210" --name Asha
//! tableside checkout --phone "+91 98765 43210" --table 12 --submitted
//! ```

use tableside_cart::{CartStore, CheckoutForm};

use crate::error::CliError;

/// Arguments for the checkout command.
#[derive(Debug, Default)]
pub struct CheckoutArgs {
    pub phone: String,
    pub name: Option<String>,
    pub table: Option<String>,
    /// The order was accepted by the backend; clear the cart.
    pub submitted: bool,
}

/// Build the order submission and optionally clear the cart.
///
/// # Errors
///
/// Returns [`CliError::Checkout`] if the cart or customer details are
/// incomplete, and [`CliError::Json`] if serialization fails.
pub fn run(store: &mut CartStore, args: CheckoutArgs) -> Result<String, CliError> {
    let form = CheckoutForm {
        phone: args.phone,
        name: args.name,
        table: args.table,
    };
    let submission = form.prepare(store.session())?;
    let json = serde_json::to_string_pretty(&submission)?;

    tracing::info!(
        restaurant_id = %submission.restaurant_id,
        table = %submission.request.table_number,
        lines = submission.request.items.len(),
        "Prepared order submission"
    );

    if args.submitted {
        store.clear_cart();
        tracing::info!("Order submitted, cart cleared");
    }

    Ok(json)
}
