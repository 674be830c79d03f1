//! Tableside Core - Shared types library.
//!
//! This crate provides common types used across all Tableside components:
//! - `cart` - Client-side cart store for the QR ordering flow
//! - `cli` - Command-line front end driving a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, phone numbers,
//!   and menu item snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
