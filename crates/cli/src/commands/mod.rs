//! Command implementations.
//!
//! Each command mutates or reads the [`CartStore`](tableside_cart::CartStore)
//! it is given and returns the text to print. Persistence happens through the
//! store's subscriber, so commands never touch storage directly.

pub mod checkout;
pub mod context;
pub mod items;
pub mod show;
