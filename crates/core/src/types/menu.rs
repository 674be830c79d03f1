//! Menu item snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, MenuItemId, RestaurantId};
use super::price::{CurrencyCode, Price};

/// A purchasable menu item as it looked when the customer added it.
///
/// This is a copy of the backend catalog entry, not a live reference: later
/// price changes in the catalog never alter an item already in a cart.
///
/// Serialized field names match the backend menu endpoint, so a value fetched
/// from the menu API can be handed straight to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemRef {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in the currency's standard unit. Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub is_jain: bool,
    #[serde(default)]
    pub is_chefs_special: bool,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

const fn default_available() -> bool {
    true
}

impl MenuItemRef {
    /// Create a snapshot with the required fields and no dietary flags.
    #[must_use]
    pub fn new(id: impl Into<MenuItemId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            image: None,
            category_id: None,
            restaurant_id: None,
            is_veg: false,
            is_jain: false,
            is_chefs_special: false,
            is_available: true,
        }
    }

    /// Mark the item as vegetarian.
    #[must_use]
    pub const fn veg(mut self) -> Self {
        self.is_veg = true;
        self
    }

    /// Mark the item as Jain-compatible.
    #[must_use]
    pub const fn jain(mut self) -> Self {
        self.is_jain = true;
        self
    }

    /// Mark the item as a chef's special.
    #[must_use]
    pub const fn chefs_special(mut self) -> Self {
        self.is_chefs_special = true;
        self
    }

    /// Attach the owning restaurant.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant_id: impl Into<RestaurantId>) -> Self {
        self.restaurant_id = Some(restaurant_id.into());
        self
    }

    /// Unit price in the given currency.
    #[must_use]
    pub const fn unit_price(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }
}
