//! Restaurant and table context commands.
//!
//! # Usage
//!
//! ```bash
//! # Scanned the QR code at table 7 of restaurant r1
//! tableside restaurant r1
//! tableside table 7
//! ```

use tableside_cart::CartStore;

/// Switch the active restaurant. Items from a different restaurant are
/// dropped.
#[must_use]
pub fn restaurant(store: &mut CartStore, restaurant_id: &str) -> String {
    let before = store.entries().len();
    store.set_restaurant(restaurant_id);
    let dropped = before.saturating_sub(store.entries().len());

    if dropped > 0 {
        tracing::info!(restaurant_id, dropped, "Switched restaurant, cart cleared");
        format!("Restaurant set to {restaurant_id} ({dropped} item(s) from the previous restaurant removed)")
    } else {
        format!("Restaurant set to {restaurant_id}")
    }
}

/// Record the customer's table.
#[must_use]
pub fn table(store: &mut CartStore, table_id: &str) -> String {
    store.set_table(table_id);
    format!("Table set to {table_id}")
}
