//! Core types for Tableside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod menu;
pub mod phone;
pub mod price;

pub use id::*;
pub use menu::MenuItemRef;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use price::{CurrencyCode, MAX_PRICE_DIGITS, Price, PriceError, check_amount, parse_amount};
