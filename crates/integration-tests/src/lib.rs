//! Integration tests for Tableside.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tableside-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenario` - Store behavior across a full ordering session
//! - `file_persistence` - Saving and restoring carts on disk
//! - `checkout_flow` - Building order submissions from a stored cart
//!
//! Shared fixtures live in this crate so every test file builds menus and
//! scratch directories the same way.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tableside_core::MenuItemRef;

/// A menu item priced in whole rupees.
#[must_use]
pub fn menu_item(id: &str, name: &str, price: i64) -> MenuItemRef {
    MenuItemRef::new(id, name, Decimal::from(price))
}

/// A small menu for restaurant `r1`.
#[must_use]
pub fn sample_menu() -> Vec<MenuItemRef> {
    vec![
        menu_item("m1", "Paneer Butter Masala", 260).veg().with_restaurant("r1"),
        menu_item("m2", "Butter Naan", 45).veg().with_restaurant("r1"),
        menu_item("m3", "Chicken Biryani", 320)
            .chefs_special()
            .with_restaurant("r1"),
    ]
}

/// Scratch directory removed on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Reserve a fresh directory path under the system temp dir.
    ///
    /// The directory itself is created lazily by whoever writes to it.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
