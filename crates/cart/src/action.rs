//! Cart mutations as a closed set of commands.

use tableside_core::{MenuItemId, MenuItemRef, RestaurantId, TableId};

/// A single cart mutation.
///
/// Every change to a [`CartSession`](crate::CartSession) is expressed as one
/// of these variants and applied by
/// [`CartSession::apply`](crate::CartSession::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of an item, creating its entry if needed.
    AddItem(MenuItemRef),
    /// Drop the entry for an item.
    RemoveItem(MenuItemId),
    /// Set an entry's quantity to an absolute value. Zero or below removes it.
    SetQuantity {
        item_id: MenuItemId,
        quantity: i64,
    },
    /// Set free-text preparation instructions on an entry.
    SetInstructions {
        item_id: MenuItemId,
        instructions: String,
    },
    /// Drop every entry, keeping restaurant and table context.
    ClearCart,
    /// Switch the active restaurant, clearing entries on a change.
    SetRestaurant(RestaurantId),
    /// Record the table the customer is sitting at.
    SetTable(TableId),
}

impl CartAction {
    /// Short name used in log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::SetQuantity { .. } => "set_quantity",
            Self::SetInstructions { .. } => "set_instructions",
            Self::ClearCart => "clear_cart",
            Self::SetRestaurant(_) => "set_restaurant",
            Self::SetTable(_) => "set_table",
        }
    }

    /// The item this action targets, if any.
    #[must_use]
    pub const fn item_id(&self) -> Option<&MenuItemId> {
        match self {
            Self::AddItem(item) => Some(&item.id),
            Self::RemoveItem(item_id)
            | Self::SetQuantity { item_id, .. }
            | Self::SetInstructions { item_id, .. } => Some(item_id),
            Self::ClearCart | Self::SetRestaurant(_) | Self::SetTable(_) => None,
        }
    }
}
