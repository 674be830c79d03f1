//! Cart item commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a menu item by fields
//! tableside add --id 7 --name "Dal Makhani" --price 280 --veg
//!
//! # Add a menu item as returned by the menu endpoint
//! tableside add --json '{"id":"7","name":"Dal Makhani","price":280,"is_veg":true}'
//!
//! # Change quantity (0 removes), add instructions, remove, clear
//! tableside quantity 7 3
//! tableside note 7 "less oil"
//! tableside remove 7
//! tableside clear
//! ```

use tableside_cart::{CartSession, CartStore};
use tableside_core::{MenuItemId, MenuItemRef, parse_amount};

use crate::error::CliError;

/// Fields for building a menu item on the command line.
#[derive(Debug, Default)]
pub struct NewItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub restaurant: Option<String>,
    pub veg: bool,
    pub jain: bool,
    pub chefs_special: bool,
    /// Full `MenuItemRef` JSON; takes precedence over the fields above.
    pub json: Option<String>,
}

impl NewItem {
    /// Build the menu item snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if the JSON is malformed, a required field is
    /// missing, the price is invalid, or the item could not be held in a cart.
    pub fn into_menu_item(self) -> Result<MenuItemRef, CliError> {
        if let Some(json) = self.json {
            let item: MenuItemRef = serde_json::from_str(&json)?;
            CartSession::check_item(&item)?;
            return Ok(item);
        }

        let id = self.id.ok_or(CliError::MissingArgument("id"))?;
        let name = self.name.ok_or(CliError::MissingArgument("name"))?;
        let price = parse_amount(&self.price.ok_or(CliError::MissingArgument("price"))?)?;

        let mut item = MenuItemRef::new(id, name, price);
        item.is_veg = self.veg;
        item.is_jain = self.jain;
        item.is_chefs_special = self.chefs_special;
        if let Some(restaurant) = self.restaurant {
            item = item.with_restaurant(restaurant);
        }
        CartSession::check_item(&item)?;
        Ok(item)
    }
}

/// Add one unit of an item.
///
/// # Errors
///
/// Returns [`CliError`] if the item cannot be built.
pub fn add(store: &mut CartStore, new_item: NewItem) -> Result<String, CliError> {
    let item = new_item.into_menu_item()?;
    let id = item.id.clone();
    let name = item.name.clone();

    store.add_item(item);

    let quantity = store.session().entry(&id).map_or(0, |e| e.quantity);
    tracing::info!(item_id = %id, quantity, "Added item to cart");
    Ok(format!("Added {name} (now x{quantity})"))
}

/// Remove an item.
#[must_use]
pub fn remove(store: &mut CartStore, item_id: &str) -> String {
    let id = MenuItemId::new(item_id);
    let Some(name) = entry_name(store, &id) else {
        return format!("Item {item_id} is not in the cart");
    };

    store.remove_item(id);
    format!("Removed {name}")
}

/// Set an item's quantity. Zero or below removes it.
#[must_use]
pub fn quantity(store: &mut CartStore, item_id: &str, quantity: i64) -> String {
    let id = MenuItemId::new(item_id);
    let Some(name) = entry_name(store, &id) else {
        return format!("Item {item_id} is not in the cart");
    };

    store.update_quantity(id, quantity);
    if quantity <= 0 {
        format!("Removed {name}")
    } else {
        format!("{name} quantity set to {quantity}")
    }
}

/// Set preparation instructions on an item.
#[must_use]
pub fn note(store: &mut CartStore, item_id: &str, text: &str) -> String {
    let id = MenuItemId::new(item_id);
    let Some(name) = entry_name(store, &id) else {
        return format!("Item {item_id} is not in the cart");
    };

    store.update_instructions(id, text);
    format!("Updated instructions for {name}")
}

/// Remove every item.
#[must_use]
pub fn clear(store: &mut CartStore) -> String {
    let removed = store.entries().len();
    store.clear_cart();
    format!("Cleared {removed} item(s)")
}

fn entry_name(store: &CartStore, id: &MenuItemId) -> Option<String> {
    store
        .session()
        .entry(id)
        .map(|entry| entry.menu_item.name.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tableside_cart::SessionError;

    use super::*;

    fn dosa() -> NewItem {
        NewItem {
            id: Some("d1".to_string()),
            name: Some("Masala Dosa".to_string()),
            price: Some("120".to_string()),
            veg: true,
            ..NewItem::default()
        }
    }

    #[test]
    fn test_add_from_fields() {
        let mut store = CartStore::new();
        assert_eq!(add(&mut store, dosa()).unwrap(), "Added Masala Dosa (now x1)");
        assert_eq!(add(&mut store, dosa()).unwrap(), "Added Masala Dosa (now x2)");

        let entry = store.entries().first().unwrap();
        assert!(entry.menu_item.is_veg);
        assert_eq!(store.total_amount(), Decimal::from(240));
    }

    #[test]
    fn test_add_from_json() {
        let mut store = CartStore::new();
        let item = NewItem {
            json: Some(r#"{"id":"7","name":"Lassi","price":89.5,"is_jain":true}"#.to_string()),
            ..NewItem::default()
        };
        add(&mut store, item).unwrap();
        let entry = store.entries().first().unwrap();
        assert!(entry.menu_item.is_jain);
        assert_eq!(entry.menu_item.price, Decimal::new(895, 1));
    }

    #[test]
    fn test_add_rejects_negative_json_price() {
        let mut store = CartStore::new();
        let item = NewItem {
            json: Some(r#"{"id":"7","name":"Lassi","price":-1}"#.to_string()),
            ..NewItem::default()
        };
        assert!(matches!(
            add(&mut store, item),
            Err(CliError::Item(SessionError::NegativePrice(_)))
        ));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_add_rejects_blank_id() {
        let mut store = CartStore::new();
        add(&mut store, dosa()).unwrap();

        let blank = NewItem {
            id: Some(" ".to_string()),
            ..dosa()
        };
        assert!(matches!(
            add(&mut store, blank),
            Err(CliError::Item(SessionError::BlankItemId))
        ));

        let blank_json = NewItem {
            json: Some(r#"{"id":"","name":"Lassi","price":40}"#.to_string()),
            ..NewItem::default()
        };
        assert!(add(&mut store, blank_json).is_err());
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_add_missing_field() {
        let mut store = CartStore::new();
        let item = NewItem {
            price: None,
            ..dosa()
        };
        assert!(matches!(
            add(&mut store, item),
            Err(CliError::MissingArgument("price"))
        ));
    }

    #[test]
    fn test_add_invalid_price() {
        let mut store = CartStore::new();
        let item = NewItem {
            price: Some("free".to_string()),
            ..dosa()
        };
        assert!(matches!(add(&mut store, item), Err(CliError::Price(_))));
    }

    #[test]
    fn test_quantity_note_remove() {
        let mut store = CartStore::new();
        add(&mut store, dosa()).unwrap();

        assert_eq!(quantity(&mut store, "d1", 4), "Masala Dosa quantity set to 4");
        assert_eq!(store.total_items(), 4);

        assert_eq!(note(&mut store, "d1", "crispy"), "Updated instructions for Masala Dosa");
        assert_eq!(
            store.entries().first().unwrap().special_instructions.as_deref(),
            Some("crispy")
        );

        assert_eq!(remove(&mut store, "d1"), "Removed Masala Dosa");
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_quantity_zero_removes() {
        let mut store = CartStore::new();
        add(&mut store, dosa()).unwrap();
        assert_eq!(quantity(&mut store, "d1", 0), "Removed Masala Dosa");
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_absent_item_messages() {
        let mut store = CartStore::new();
        assert_eq!(remove(&mut store, "x"), "Item x is not in the cart");
        assert_eq!(quantity(&mut store, "x", 2), "Item x is not in the cart");
        assert_eq!(note(&mut store, "x", "hi"), "Item x is not in the cart");
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = CartStore::new();
        add(&mut store, dosa()).unwrap();
        assert_eq!(clear(&mut store), "Cleared 1 item(s)");
        assert_eq!(store.total_items(), 0);
    }
}
