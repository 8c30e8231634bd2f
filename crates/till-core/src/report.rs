//! # Report Tables
//!
//! Fixed-width text tables for the inventory, the cart and the invoice.
//!
//! ## Layout
//! ```text
//! Name                                    Price  Discount    Final Price
//! ----------------------------------------------------------------------
//! Widget                                  10.00        10%          9.00
//! ```
//!
//! Tables are `Display` values, so they can be written straight to the
//! terminal or collected with `to_string()` in tests.

use std::fmt;

use crate::cart::Cart;
use crate::types::Product;

const NAME_WIDTH: usize = 30;
const PRICE_WIDTH: usize = 15;
const DISCOUNT_WIDTH: usize = 10;
const STOCK_WIDTH: usize = 10;
const FINAL_PRICE_WIDTH: usize = 15;
const RULE_WIDTH: usize = 70;

pub(crate) fn write_rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

/// Header and rows for priced line items (cart and invoice).
pub(crate) fn write_line_items(f: &mut fmt::Formatter<'_>, items: &[Product]) -> fmt::Result {
    writeln!(
        f,
        "{:<NAME_WIDTH$}{:>PRICE_WIDTH$}{:>DISCOUNT_WIDTH$}{:>FINAL_PRICE_WIDTH$}",
        "Name", "Price", "Discount", "Final Price"
    )?;
    write_rule(f)?;
    for item in items {
        writeln!(
            f,
            "{:<NAME_WIDTH$}{:>PRICE_WIDTH$}{:>DISCOUNT_WIDTH$}%{:>FINAL_PRICE_WIDTH$}",
            item.name,
            item.price.to_decimal_string(),
            item.discount.percent(),
            item.final_price().to_decimal_string()
        )?;
    }
    write_rule(f)
}

// =============================================================================
// Inventory Table
// =============================================================================

/// The inventory listing shown to admins and cashiers.
#[derive(Debug, Clone, Copy)]
pub struct InventoryTable<'a>(pub &'a [Product]);

impl fmt::Display for InventoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============= Current Inventory =============")?;
        writeln!(
            f,
            "{:<NAME_WIDTH$}{:>PRICE_WIDTH$}{:>DISCOUNT_WIDTH$}{:>STOCK_WIDTH$}",
            "Name", "Price", "Discount", "Stock"
        )?;
        write_rule(f)?;
        for product in self.0 {
            writeln!(
                f,
                "{:<NAME_WIDTH$}{:>PRICE_WIDTH$}{:>DISCOUNT_WIDTH$}%{:>STOCK_WIDTH$}",
                product.name,
                product.price.to_decimal_string(),
                product.discount.percent(),
                product.stock
            )?;
        }
        write_rule(f)
    }
}

// =============================================================================
// Cart Table
// =============================================================================

/// The current cart with its running total.
#[derive(Debug, Clone, Copy)]
pub struct CartTable<'a>(pub &'a Cart);

impl fmt::Display for CartTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============= Current Cart =============")?;
        write_line_items(f, self.0.items())?;
        writeln!(f, "Total: {}", self.0.total())
    }
}
