//! Tableside Cart - client-side cart store for QR table ordering.
//!
//! A customer scans the QR code on their table, browses the restaurant's
//! menu and builds a cart. This crate holds that cart:
//!
//! - [`CartAction`] - every mutation as a tagged command
//! - [`CartSession`] - entries plus restaurant/table context, and the pure
//!   transition function [`CartSession::apply`]
//! - [`CartStore`] - owns a session, recomputes totals after every action
//!   and notifies [`CartSubscriber`]s
//! - [`storage`] - durable key-value backends and [`persist`] glue that saves
//!   the session after every change and restores it on open
//! - [`checkout`] - validates customer details and builds the order payload
//!   handed to the backend
//!
//! # Architecture
//!
//! The transition function performs no I/O. Persistence is a subscriber
//! attached to the store; a corrupt or missing saved cart restores as an empty
//! one. Nothing in this crate talks to the network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod checkout;
pub mod persist;
pub mod session;
pub mod storage;
pub mod store;

pub use action::CartAction;
pub use checkout::{CheckoutError, CheckoutForm, OrderLineInput, OrderSubmission, PlaceOrderRequest};
pub use persist::{DEFAULT_STORAGE_KEY, PersistError, PersistOnChange, restore_session, save_session};
pub use session::{CartSession, CartTotals, LineEntry, SessionError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartChange, CartStore, CartSubscriber};
