//! Cart display.
//!
//! # Usage
//!
//! ```bash
//! tableside show
//! tableside show --json
//! ```

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::Serialize;
use tableside_cart::{CartSession, CartStore};
use tableside_core::{CurrencyCode, Price};

use crate::error::CliError;

/// Machine-readable cart summary.
#[derive(Debug, Serialize)]
pub struct CartSummary<'a> {
    pub session: &'a CartSession,
    pub total_items: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub currency: &'static str,
}

/// Render the cart as JSON.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn json(store: &CartStore, currency: CurrencyCode) -> Result<String, CliError> {
    let summary = CartSummary {
        session: store.session(),
        total_items: store.total_items(),
        total_amount: store.total_amount(),
        currency: currency.code(),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

/// Render the cart as a human-readable table.
#[must_use]
pub fn text(store: &CartStore, currency: CurrencyCode) -> String {
    let mut out = String::new();
    let restaurant = store.restaurant_id().map_or("-", |id| id.as_str());
    let table = store.table_id().map_or("-", |id| id.as_str());
    let _ = writeln!(out, "Restaurant: {restaurant}  Table: {table}");

    if store.entries().is_empty() {
        out.push_str("Your cart is empty\n");
        return out;
    }

    for entry in store.entries() {
        let item = &entry.menu_item;
        let line_total = Price::new(entry.line_total(), currency);
        let _ = writeln!(
            out,
            "  {:>3} x {}{}  {line_total}",
            entry.quantity,
            item.name,
            dietary_tags(item.is_veg, item.is_jain, item.is_chefs_special),
        );
        if let Some(note) = entry
            .special_instructions
            .as_deref()
            .filter(|n| !n.trim().is_empty())
        {
            let _ = writeln!(out, "        note: {note}");
        }
    }

    let total = Price::new(store.total_amount(), currency);
    let _ = writeln!(out, "Items: {}  Total: {total}", store.total_items());
    out
}

fn dietary_tags(veg: bool, jain: bool, chefs_special: bool) -> String {
    let tags: Vec<&str> = [(veg, "veg"), (jain, "jain"), (chefs_special, "chef's special")]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
        .collect();
    if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    }
}
