//! The cart store.
//!
//! [`CartStore`] owns the current [`CartSession`], runs every mutation through
//! [`CartSession::apply`], recomputes the totals and then tells each
//! subscriber what happened. The application root constructs one store and
//! passes it by reference to whatever needs it.
//!
//! ```
//! use rust_decimal::Decimal;
//! use tableside_cart::{CartStore, MemoryStorage};
//! use tableside_core::MenuItemRef;
//!
//! let storage = MemoryStorage::new();
//! let mut cart = CartStore::open(storage, "restaurant_cart");
//!
//! cart.set_restaurant("r1");
//! cart.add_item(MenuItemRef::new("a", "Masala Dosa", Decimal::from(120)));
//! cart.add_item(MenuItemRef::new("a", "Masala Dosa", Decimal::from(120)));
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_amount(), Decimal::from(240));
//! ```

use rust_decimal::Decimal;
use tableside_core::{MenuItemId, MenuItemRef, RestaurantId, TableId};

use crate::action::CartAction;
use crate::persist::{PersistOnChange, restore_session};
use crate::session::{CartSession, CartTotals, LineEntry};
use crate::storage::KeyValueStorage;

/// What a subscriber sees after each dispatch.
#[derive(Debug, Clone, Copy)]
pub struct CartChange<'a> {
    /// The action that was applied.
    pub action: &'a CartAction,
    /// The session after the action.
    pub session: &'a CartSession,
    /// Totals of `session`.
    pub totals: CartTotals,
    /// `false` if the action left the session unchanged.
    pub changed: bool,
}

/// Observer notified after every dispatched action.
pub trait CartSubscriber {
    fn on_change(&mut self, change: &CartChange<'_>);
}

impl<F> CartSubscriber for F
where
    F: FnMut(&CartChange<'_>),
{
    fn on_change(&mut self, change: &CartChange<'_>) {
        self(change);
    }
}

/// Single source of truth for what the current customer intends to order.
pub struct CartStore {
    session: CartSession,
    totals: CartTotals,
    subscribers: Vec<Box<dyn CartSubscriber>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("session", &self.session)
            .field("totals", &self.totals)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// An empty store with no subscribers and no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(CartSession::new())
    }

    /// A store starting from an existing session.
    #[must_use]
    pub fn with_session(session: CartSession) -> Self {
        let totals = session.totals();
        Self {
            session,
            totals,
            subscribers: Vec::new(),
        }
    }

    /// Restore the session saved under `key` and persist every later change
    /// back to it.
    ///
    /// Missing, unreadable or malformed data starts an empty session; this
    /// never fails.
    #[must_use]
    pub fn open<S>(storage: S, key: impl Into<String>) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        let key = key.into();
        let session = restore_session(&storage, &key);
        let mut store = Self::with_session(session);
        store.subscribe(PersistOnChange::new(storage, key));
        store
    }

    /// Register a subscriber. Subscribers run in registration order.
    pub fn subscribe(&mut self, subscriber: impl CartSubscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply an action, refresh totals and notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) {
        if let CartAction::AddItem(item) = &action
            && let Err(e) = CartSession::check_item(item)
        {
            tracing::warn!(item_id = %item.id, error = %e, "Rejected menu item");
        }

        let next = self.session.clone().apply(&action);
        let changed = next != self.session;
        if !changed {
            tracing::debug!(
                action = action.kind(),
                item_id = action.item_id().map(MenuItemId::as_str),
                "Cart action had no effect"
            );
        }

        self.session = next;
        self.totals = self.session.totals();

        let change = CartChange {
            action: &action,
            session: &self.session,
            totals: self.totals,
            changed,
        };
        for subscriber in &mut self.subscribers {
            subscriber.on_change(&change);
        }
    }

    /// Add one unit of `item`.
    pub fn add_item(&mut self, item: MenuItemRef) {
        self.dispatch(CartAction::AddItem(item));
    }

    /// Remove the entry for `item_id`, if any.
    pub fn remove_item(&mut self, item_id: impl Into<MenuItemId>) {
        self.dispatch(CartAction::RemoveItem(item_id.into()));
    }

    /// Set the quantity of an existing entry; zero or below removes it.
    pub fn update_quantity(&mut self, item_id: impl Into<MenuItemId>, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            item_id: item_id.into(),
            quantity,
        });
    }

    /// Set preparation instructions on an existing entry.
    pub fn update_instructions(&mut self, item_id: impl Into<MenuItemId>, text: impl Into<String>) {
        self.dispatch(CartAction::SetInstructions {
            item_id: item_id.into(),
            instructions: text.into(),
        });
    }

    /// Drop all entries, keeping restaurant and table.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Switch restaurant. Entries are cleared if the restaurant changes.
    pub fn set_restaurant(&mut self, restaurant_id: impl Into<RestaurantId>) {
        self.dispatch(CartAction::SetRestaurant(restaurant_id.into()));
    }

    /// Record the customer's table.
    pub fn set_table(&mut self, table_id: impl Into<TableId>) {
        self.dispatch(CartAction::SetTable(table_id.into()));
    }

    #[must_use]
    pub const fn session(&self) -> &CartSession {
        &self.session
    }

    #[must_use]
    pub fn entries(&self) -> &[LineEntry] {
        self.session.entries()
    }

    #[must_use]
    pub const fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.session.restaurant_id()
    }

    #[must_use]
    pub const fn table_id(&self) -> Option<&TableId> {
        self.session.table_id()
    }

    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.totals.items
    }

    /// Sum of `price * quantity` across all entries.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.totals.amount
    }
}
