//! Turning a cart into an order submission.
//!
//! The cart does not talk to the backend. [`CheckoutForm::prepare`] checks the
//! customer details against the session and produces the payload for the
//! order-creation endpoint (`POST /restaurants/{restaurant_id}/orders`). The
//! caller sends it and, once the backend accepts it, calls
//! [`CartStore::clear_cart`](crate::CartStore::clear_cart).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tableside_core::{MenuItemId, PhoneNumber, PhoneNumberError, RestaurantId};
use thiserror::Error;

use crate::session::CartSession;

/// Reasons a cart cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("no restaurant selected")]
    MissingRestaurant,
    #[error("please enter a valid phone number: {0}")]
    InvalidPhone(#[from] PhoneNumberError),
    #[error("please enter your table number")]
    MissingTable,
    #[error("your cart is empty")]
    EmptyCart,
}

/// One line of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Body of the order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub table_number: String,
    pub customer_phone: PhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Everything the caller needs to place the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub restaurant_id: RestaurantId,
    pub request: PlaceOrderRequest,
    /// Cart total at submission time. The backend computes the charged amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_total: Decimal,
}

/// Customer details collected on the cart page.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub phone: String,
    pub name: Option<String>,
    /// Overrides the table recorded in the session when set.
    pub table: Option<String>,
}

impl CheckoutForm {
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Validate the form against `session` and build the submission.
    ///
    /// Checks run in this order: restaurant, phone, table, non-empty cart.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`CheckoutError`].
    pub fn prepare(&self, session: &CartSession) -> Result<OrderSubmission, CheckoutError> {
        let restaurant_id = session
            .restaurant_id()
            .filter(|id| !id.is_blank())
            .cloned()
            .ok_or(CheckoutError::MissingRestaurant)?;

        let customer_phone = PhoneNumber::parse(&self.phone)?;

        let table_number = self
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| session.table_id().map(|t| t.as_str().trim()))
            .filter(|t| !t.is_empty())
            .ok_or(CheckoutError::MissingTable)?
            .to_owned();

        if session.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items = session
            .entries()
            .iter()
            .map(|entry| OrderLineInput {
                menu_item_id: entry.menu_item.id.clone(),
                quantity: entry.quantity,
                special_instructions: non_blank(entry.special_instructions.as_deref()),
            })
            .collect();

        Ok(OrderSubmission {
            restaurant_id,
            request: PlaceOrderRequest {
                table_number,
                customer_phone,
                customer_name: non_blank(self.name.as_deref()),
                items,
            },
            expected_total: session.totals().amount,
        })
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}
