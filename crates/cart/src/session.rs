//! Cart session state and the transition function.
//!
//! A [`CartSession`] is the whole of what the customer intends to order: one
//! [`LineEntry`] per distinct menu item, in the order items were first added,
//! plus the restaurant and table the cart belongs to.
//!
//! # Invariants
//!
//! - At most one entry per item id
//! - Every entry has a quantity of at least 1
//! - Entries never mix restaurants: switching restaurant clears them
//!
//! The serialized form is the persisted layout:
//!
//! ```json
//! {
//!   "entries": [{ "menu_item": { "id": "a", "name": "Chai", "price": 30 }, "quantity": 2 }],
//!   "restaurantId": "r1",
//!   "tableId": null
//! }
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tableside_core::{MenuItemId, MenuItemRef, PriceError, RestaurantId, TableId, check_amount};

use crate::action::CartAction;

/// One menu item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    pub menu_item: MenuItemRef,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl LineEntry {
    /// A fresh entry with quantity 1 and no instructions.
    #[must_use]
    pub const fn new(menu_item: MenuItemRef) -> Self {
        Self {
            menu_item,
            quantity: 1,
            special_instructions: None,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.menu_item
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Aggregates derived from the entries of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities across all entries.
    pub items: u64,
    /// Sum of `price * quantity` across all entries.
    pub amount: Decimal,
}

/// Reasons a deserialized session cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("entry has an empty item id")]
    BlankItemId,
    #[error("duplicate entry for item {0}")]
    DuplicateItem(MenuItemId),
    #[error("entry for item {0} has quantity 0")]
    ZeroQuantity(MenuItemId),
    #[error("item {0} has a negative price")]
    NegativePrice(MenuItemId),
    #[error("item {0} has a price that cannot be stored exactly")]
    UnstorablePrice(MenuItemId),
}

/// The full cart state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSession {
    #[serde(default)]
    entries: Vec<LineEntry>,
    #[serde(default)]
    restaurant_id: Option<RestaurantId>,
    #[serde(default)]
    table_id: Option<TableId>,
}

impl CartSession {
    /// An empty session with no restaurant or table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    /// The entry for `item_id`, if present.
    #[must_use]
    pub fn entry(&self, item_id: &MenuItemId) -> Option<&LineEntry> {
        self.entries.iter().find(|e| &e.menu_item.id == item_id)
    }

    #[must_use]
    pub const fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.restaurant_id.as_ref()
    }

    #[must_use]
    pub const fn table_id(&self) -> Option<&TableId> {
        self.table_id.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Recompute item count and amount from the entries.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.entries
            .iter()
            .fold(CartTotals::default(), |acc, entry| CartTotals {
                items: acc.items + u64::from(entry.quantity),
                amount: acc.amount.saturating_add(entry.line_total()),
            })
    }

    /// Check the invariants that deserialization alone cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns the first [`SessionError`] found, scanning entries in order.
    pub fn validate(&self) -> Result<(), SessionError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            Self::check_item(&entry.menu_item)?;
            let id = &entry.menu_item.id;
            if !seen.insert(id) {
                return Err(SessionError::DuplicateItem(id.clone()));
            }
            if entry.quantity == 0 {
                return Err(SessionError::ZeroQuantity(id.clone()));
            }
        }
        Ok(())
    }

    /// Check that `item` can be held in a cart.
    ///
    /// [`CartAction::AddItem`] with an item failing this check leaves the
    /// session unchanged, so every session built through [`apply`](Self::apply)
    /// passes [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for a blank id, a negative price or a price
    /// with more digits than the persisted layout keeps.
    pub fn check_item(item: &MenuItemRef) -> Result<(), SessionError> {
        if item.id.is_blank() {
            return Err(SessionError::BlankItemId);
        }
        check_amount(item.price).map_err(|e| match e {
            PriceError::Negative => SessionError::NegativePrice(item.id.clone()),
            PriceError::Invalid(_) | PriceError::TooPrecise(_) => {
                SessionError::UnstorablePrice(item.id.clone())
            }
        })
    }

    /// Apply one action and return the resulting session.
    ///
    /// This is the only place cart state changes. It performs no I/O.
    #[must_use]
    pub fn apply(mut self, action: &CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => {
                if Self::check_item(item).is_err() {
                    return self;
                }
                if let Some(entry) = self.entry_mut(&item.id) {
                    entry.quantity = entry.quantity.saturating_add(1);
                } else {
                    self.entries.push(LineEntry::new(item.clone()));
                }
            }
            CartAction::RemoveItem(item_id) => self.remove(item_id),
            CartAction::SetQuantity { item_id, quantity } => {
                if *quantity <= 0 {
                    self.remove(item_id);
                } else if let Some(entry) = self.entry_mut(item_id) {
                    entry.quantity = u32::try_from(*quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::SetInstructions {
                item_id,
                instructions,
            } => {
                if let Some(entry) = self.entry_mut(item_id) {
                    entry.special_instructions = Some(instructions.clone());
                }
            }
            CartAction::ClearCart => self.entries.clear(),
            CartAction::SetRestaurant(restaurant_id) => {
                if self
                    .restaurant_id
                    .as_ref()
                    .is_some_and(|current| current != restaurant_id)
                {
                    self.entries.clear();
                }
                self.restaurant_id = Some(restaurant_id.clone());
            }
            CartAction::SetTable(table_id) => self.table_id = Some(table_id.clone()),
        }
        self
    }

    fn entry_mut(&mut self, item_id: &MenuItemId) -> Option<&mut LineEntry> {
        self.entries.iter_mut().find(|e| &e.menu_item.id == item_id)
    }

    fn remove(&mut self, item_id: &MenuItemId) {
        self.entries.retain(|e| &e.menu_item.id != item_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> MenuItemRef {
        MenuItemRef::new(id, format!("Item {id}"), Decimal::from(price))
    }

    fn run(actions: &[CartAction]) -> CartSession {
        actions
            .iter()
            .fold(CartSession::new(), |session, action| session.apply(action))
    }

    #[test]
    fn test_add_item_creates_entry() {
        let session = run(&[CartAction::AddItem(item("a", 100))]);
        let entry = session.entry(&MenuItemId::new("a")).unwrap();
        assert_eq!(entry.quantity, 1);
        assert!(entry.special_instructions.is_none());
    }

    #[test]
    fn test_add_item_increments_existing() {
        let mut session = CartSession::new();
        for expected in 1..=5 {
            session = session.apply(&CartAction::AddItem(item("a", 100)));
            assert_eq!(session.len(), 1);
            assert_eq!(session.entries()[0].quantity, expected);
        }
    }

    #[test]
    fn test_add_item_keeps_first_snapshot() {
        let session = run(&[
            CartAction::AddItem(item("a", 100)),
            CartAction::AddItem(item("a", 120)),
        ]);
        let entry = session.entry(&MenuItemId::new("a")).unwrap();
        assert_eq!(entry.menu_item.price, Decimal::from(100));
        assert_eq!(entry.quantity, 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let session = run(&[
            CartAction::AddItem(item("b", 1)),
            CartAction::AddItem(item("a", 1)),
            CartAction::AddItem(item("c", 1)),
            CartAction::AddItem(item("a", 1)),
        ]);
        let ids: Vec<&str> = session
            .entries()
            .iter()
            .map(|e| e.menu_item.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let before = run(&[CartAction::AddItem(item("a", 100))]);
        let after = before
            .clone()
            .apply(&CartAction::RemoveItem(MenuItemId::new("zzz")));
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let base = run(&[
            CartAction::AddItem(item("a", 100)),
            CartAction::AddItem(item("b", 50)),
        ]);
        let removed = base
            .clone()
            .apply(&CartAction::RemoveItem(MenuItemId::new("a")));
        let zeroed = base.clone().apply(&CartAction::SetQuantity {
            item_id: MenuItemId::new("a"),
            quantity: 0,
        });
        let negative = base.apply(&CartAction::SetQuantity {
            item_id: MenuItemId::new("a"),
            quantity: -3,
        });
        assert_eq!(removed, zeroed);
        assert_eq!(removed, negative);
        assert_eq!(zeroed.totals().amount, Decimal::from(50));
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let session = run(&[
            CartAction::AddItem(item("a", 10)),
            CartAction::AddItem(item("a", 10)),
            CartAction::SetQuantity {
                item_id: MenuItemId::new("a"),
                quantity: 7,
            },
        ]);
        assert_eq!(session.entries()[0].quantity, 7);
    }

    #[test]
    fn test_set_quantity_absent_does_not_fabricate_entry() {
        let session = run(&[CartAction::SetQuantity {
            item_id: MenuItemId::new("ghost"),
            quantity: 3,
        }]);
        assert!(session.is_empty());
    }

    #[test]
    fn test_set_quantity_saturates() {
        let session = run(&[
            CartAction::AddItem(item("a", 0)),
            CartAction::SetQuantity {
                item_id: MenuItemId::new("a"),
                quantity: i64::MAX,
            },
        ]);
        assert_eq!(session.entries()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_instructions() {
        let session = run(&[
            CartAction::AddItem(item("a", 10)),
            CartAction::SetInstructions {
                item_id: MenuItemId::new("a"),
                instructions: "extra spicy".to_string(),
            },
        ]);
        assert_eq!(
            session.entries()[0].special_instructions.as_deref(),
            Some("extra spicy")
        );
    }

    #[test]
    fn test_set_instructions_absent_is_noop() {
        let session = run(&[CartAction::SetInstructions {
            item_id: MenuItemId::new("ghost"),
            instructions: "none".to_string(),
        }]);
        assert!(session.is_empty());
    }

    #[test]
    fn test_clear_cart_keeps_context() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::SetTable(TableId::new("4")),
            CartAction::AddItem(item("a", 10)),
            CartAction::ClearCart,
        ]);
        assert!(session.is_empty());
        assert_eq!(session.restaurant_id(), Some(&RestaurantId::new("r1")));
        assert_eq!(session.table_id(), Some(&TableId::new("4")));
    }

    #[test]
    fn test_set_restaurant_switch_clears_entries() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::SetTable(TableId::new("4")),
            CartAction::AddItem(item("a", 10)),
            CartAction::SetRestaurant(RestaurantId::new("r2")),
        ]);
        assert!(session.is_empty());
        assert_eq!(session.restaurant_id(), Some(&RestaurantId::new("r2")));
        assert_eq!(session.table_id(), Some(&TableId::new("4")));
    }

    #[test]
    fn test_set_same_restaurant_keeps_entries() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::AddItem(item("a", 10)),
            CartAction::SetRestaurant(RestaurantId::new("r1")),
        ]);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_set_restaurant_on_empty_cart_records_id() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::SetRestaurant(RestaurantId::new("r2")),
        ]);
        assert!(session.is_empty());
        assert_eq!(session.restaurant_id(), Some(&RestaurantId::new("r2")));
    }

    #[test]
    fn test_first_restaurant_keeps_entries() {
        let session = run(&[
            CartAction::AddItem(item("a", 10)),
            CartAction::SetRestaurant(RestaurantId::new("r1")),
        ]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.restaurant_id(), Some(&RestaurantId::new("r1")));

        let switched = session.apply(&CartAction::SetRestaurant(RestaurantId::new("r2")));
        assert!(switched.is_empty());
    }

    #[test]
    fn test_add_invalid_item_is_noop() {
        let before = run(&[CartAction::AddItem(item("a", 10))]);
        let blank = MenuItemRef::new("  ", "Nameless", Decimal::from(10));
        let negative = item("b", -20);
        let too_precise = MenuItemRef::new(
            "c",
            "Gold Leaf Thali",
            "12345678901234567.89".parse().unwrap(),
        );

        for bad in [blank, negative, too_precise] {
            let after = before.clone().apply(&CartAction::AddItem(bad));
            assert_eq!(after, before);
            assert!(after.validate().is_ok());
        }
    }

    #[test]
    fn test_check_item() {
        assert!(CartSession::check_item(&item("a", 0)).is_ok());
        assert_eq!(
            CartSession::check_item(&item("", 1)),
            Err(SessionError::BlankItemId)
        );
        assert_eq!(
            CartSession::check_item(&item("a", -1)),
            Err(SessionError::NegativePrice(MenuItemId::new("a")))
        );
    }

    #[test]
    fn test_set_table_never_clears() {
        let session = run(&[
            CartAction::AddItem(item("a", 10)),
            CartAction::SetTable(TableId::new("1")),
            CartAction::SetTable(TableId::new("2")),
        ]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.table_id(), Some(&TableId::new("2")));
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let actions = [
            CartAction::AddItem(item("a", 100)),
            CartAction::AddItem(item("b", 50)),
            CartAction::AddItem(item("a", 100)),
            CartAction::SetQuantity {
                item_id: MenuItemId::new("b"),
                quantity: 4,
            },
            CartAction::RemoveItem(MenuItemId::new("a")),
            CartAction::AddItem(item("c", 35)),
        ];
        let mut session = CartSession::new();
        for action in &actions {
            session = session.apply(action);
            let expected: Decimal = session
                .entries()
                .iter()
                .map(|e| e.menu_item.price * Decimal::from(e.quantity))
                .sum();
            let items: u64 = session.entries().iter().map(|e| u64::from(e.quantity)).sum();
            assert_eq!(session.totals().amount, expected);
            assert_eq!(session.totals().items, items);
        }
        assert_eq!(session.totals().amount, Decimal::from(235));
    }

    #[test]
    fn test_totals_with_fractional_prices() {
        let session = run(&[
            CartAction::AddItem(MenuItemRef::new("a", "Tea", Decimal::new(1999, 2))),
            CartAction::AddItem(MenuItemRef::new("a", "Tea", Decimal::new(1999, 2))),
            CartAction::AddItem(MenuItemRef::new("b", "Bun", Decimal::new(10, 1))),
        ]);
        assert_eq!(session.totals().amount, Decimal::new(4098, 2));
        assert_eq!(session.totals().items, 3);
    }

    #[test]
    fn test_serialized_layout() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::AddItem(item("a", 100)),
            CartAction::SetInstructions {
                item_id: MenuItemId::new("a"),
                instructions: "no onion".to_string(),
            },
            CartAction::AddItem(item("b", 50)),
        ]);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value.get("restaurantId").unwrap(), "r1");
        assert!(value.get("tableId").unwrap().is_null());

        let entries = value.get("entries").unwrap().as_array().unwrap();
        assert_eq!(entries.len(), 2);
        let first = entries.first().unwrap();
        assert_eq!(first.get("quantity").unwrap(), 1);
        assert_eq!(first.get("special_instructions").unwrap(), "no onion");
        assert_eq!(
            first.get("menu_item").unwrap().get("id").unwrap(),
            "a"
        );
        assert!(entries.get(1).unwrap().get("special_instructions").is_none());
    }

    #[test]
    fn test_round_trip() {
        let session = run(&[
            CartAction::SetRestaurant(RestaurantId::new("r1")),
            CartAction::SetTable(TableId::new("12")),
            CartAction::AddItem(item("b", 50).veg()),
            CartAction::AddItem(MenuItemRef::new("a", "Lassi", Decimal::new(8950, 2))),
            CartAction::AddItem(item("b", 50).veg()),
            CartAction::SetInstructions {
                item_id: MenuItemId::new("a"),
                instructions: "less sugar".to_string(),
            },
        ]);
        let json = serde_json::to_string(&session).unwrap();
        let restored: CartSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.totals(), session.totals());
    }

    #[test]
    fn test_validate_accepts_reachable_sessions() {
        let session = run(&[
            CartAction::AddItem(item("a", 0)),
            CartAction::AddItem(item("b", 10)),
        ]);
        assert_eq!(session.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let session: CartSession = serde_json::from_str(
            r#"{"entries":[{"menu_item":{"id":"a","name":"A","price":1},"quantity":0}],"restaurantId":null,"tableId":null}"#,
        )
        .unwrap();
        assert_eq!(
            session.validate(),
            Err(SessionError::ZeroQuantity(MenuItemId::new("a")))
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let session: CartSession = serde_json::from_str(
            r#"{"entries":[
                {"menu_item":{"id":"a","name":"A","price":1},"quantity":1},
                {"menu_item":{"id":"a","name":"A","price":1},"quantity":2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            session.validate(),
            Err(SessionError::DuplicateItem(MenuItemId::new("a")))
        );
    }

    #[test]
    fn test_validate_rejects_negative_price_and_blank_id() {
        let negative: CartSession = serde_json::from_str(
            r#"{"entries":[{"menu_item":{"id":"a","name":"A","price":-5},"quantity":1}]}"#,
        )
        .unwrap();
        assert_eq!(
            negative.validate(),
            Err(SessionError::NegativePrice(MenuItemId::new("a")))
        );

        let blank: CartSession = serde_json::from_str(
            r#"{"entries":[{"menu_item":{"id":" ","name":"A","price":5},"quantity":1}]}"#,
        )
        .unwrap();
        assert_eq!(blank.validate(), Err(SessionError::BlankItemId));
    }
}
