//! # Cart
//!
//! The products a cashier has picked for the current checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  Cashier Action           Cart Method             Cart State Change     │
//! │  ──────────────           ───────────             ─────────────────     │
//! │                                                                         │
//! │  Add product ────────────► add_item() ──────────► push, total += final  │
//! │                                                                         │
//! │  Remove product ─────────► remove_item() ───────► first match removed,  │
//! │                                                    total -= final       │
//! │                                                                         │
//! │  Generate invoice ───────► clear() ─────────────► empty, total = 0      │
//! │                                                                         │
//! │  NOTE: The cart never touches inventory stock. Keeping the two in       │
//! │        step is the job of till-store's register operations.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::Product;

/// The shopping cart.
///
/// ## Invariants
/// - `total` always equals the sum of `final_price()` over `items`
/// - Items keep the order they were added in; the same barcode may appear
///   more than once (one entry per unit)
/// - Items are snapshots: later inventory edits do not reach them
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<Product>,
    total: Money,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    /// Appends a product snapshot and adds its final price to the total.
    pub fn add_item(&mut self, product: Product) {
        self.total += product.final_price();
        self.items.push(product);
    }

    /// Removes the first item with this barcode and subtracts its final
    /// price from the total.
    ///
    /// ## Returns
    /// - `Some(product)` with the removed snapshot
    /// - `None` if no item has this barcode (cart unchanged)
    pub fn remove_item(&mut self, barcode: &str) -> Option<Product> {
        let index = self.items.iter().position(|p| p.barcode == barcode)?;
        let removed = self.items.remove(index);
        self.total -= removed.final_price();
        Some(removed)
    }

    /// Returns the cached running total.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the items in the order they were added.
    #[inline]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Clears all items and resets the total.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }

    /// Returns the number of items in the cart.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
