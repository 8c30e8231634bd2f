//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Discount     │   │   Operators     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  percent (u8)   │   │  AdminAccount   │       │
//! │  │  barcode (key)  │   │  10 = 10% off   │   │  CashierAccount │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  │  discount       │                                                    │
//! │  │  stock (u32)    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Barcode Identity
//! The barcode is the only key a product has. Nothing enforces uniqueness:
//! lookups always resolve to the first product with a matching barcode.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::MAX_DISCOUNT_PERCENT;

// =============================================================================
// Discount
// =============================================================================

/// A whole-percent discount between 0 and 100.
///
/// ## Why a newtype?
/// The catalog stores discounts as whole percentages, while [`Money`] applies
/// discounts in basis points. The newtype keeps the two scales apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount(u8);

impl Discount {
    /// Creates a discount from a whole percentage.
    ///
    /// Values above 100 are clamped to 100. Callers that take user input run
    /// [`crate::validation::validate_discount_percent`] first.
    #[inline]
    pub const fn from_percent(percent: u8) -> Self {
        if percent > MAX_DISCOUNT_PERCENT {
            Discount(MAX_DISCOUNT_PERCENT)
        } else {
            Discount(percent)
        }
    }

    /// Returns the discount as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Returns the discount in basis points (10% = 1000 bps).
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0 as u32 * 100
    }

    /// No discount.
    #[inline]
    pub const fn none() -> Self {
        Discount(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry: one product the store sells.
///
/// Carts and invoices hold copies of this struct, so a product changed in the
/// inventory after being added to a cart keeps its old price in that cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name shown in tables and on the invoice.
    pub name: String,

    /// Barcode - the lookup key.
    pub barcode: String,

    /// Price before discount.
    pub price: Money,

    /// Discount applied to `price`.
    pub discount: Discount,

    /// Units on hand.
    pub stock: u32,
}

impl Product {
    /// Creates a product.
    pub fn new(
        name: impl Into<String>,
        barcode: impl Into<String>,
        price: Money,
        discount: Discount,
        stock: u32,
    ) -> Self {
        Product {
            name: name.into(),
            barcode: barcode.into(),
            price,
            discount,
            stock,
        }
    }

    /// Price after the discount is applied.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Discount, Money, Product};
    ///
    /// let p = Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2);
    /// assert_eq!(p.final_price(), Money::from_cents(900));
    /// ```
    #[inline]
    pub fn final_price(&self) -> Money {
        self.price.apply_discount(self.discount)
    }

    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Takes one unit out of stock. Returns false (and changes nothing) when
    /// the stock is already zero.
    pub fn take_one(&mut self) -> bool {
        if self.stock == 0 {
            return false;
        }
        self.stock -= 1;
        true
    }

    /// Puts one unit back into stock.
    pub fn restock_one(&mut self) {
        self.stock = self.stock.saturating_add(1);
    }
}

// =============================================================================
// Operator Accounts
// =============================================================================

/// The administrator who maintains the catalog.
///
/// Credentials are compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

impl AdminAccount {
    /// Checks an email/password pair by plain equality.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl Default for AdminAccount {
    fn default() -> Self {
        AdminAccount {
            email: "admin@store.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// A cashier who may build carts and print invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashierAccount {
    pub name: String,
    pub pin: u32,
}

impl CashierAccount {
    /// Creates a cashier account.
    pub fn new(name: impl Into<String>, pin: u32) -> Self {
        CashierAccount {
            name: name.into(),
            pin,
        }
    }

    /// Checks a PIN. The name a cashier types at login is not part of the
    /// check; the account's own name goes on the invoice.
    pub fn verify_pin(&self, pin: u32) -> bool {
        self.pin == pin
    }
}

impl Default for CashierAccount {
    fn default() -> Self {
        CashierAccount::new("demo_cashier", 1234)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2)
    }

    #[test]
    fn test_discount_scales() {
        let discount = Discount::from_percent(15);
        assert_eq!(discount.percent(), 15);
        assert_eq!(discount.bps(), 1500);
        assert!(Discount::none().is_none());
    }

    #[test]
    fn test_discount_clamps_above_hundred() {
        assert_eq!(Discount::from_percent(250).percent(), 100);
    }

    #[test]
    fn test_final_price() {
        assert_eq!(widget().final_price().cents(), 900);

        let free = Product::new("Sample", "S1", Money::from_cents(499), Discount::from_percent(100), 1);
        assert!(free.final_price().is_zero());

        let full = Product::new("Full", "F1", Money::from_cents(2000), Discount::none(), 1);
        assert_eq!(full.final_price().cents(), 2000);
    }

    #[test]
    fn test_stock_adjustments() {
        let mut product = widget();
        assert!(product.take_one());
        assert!(product.take_one());
        assert_eq!(product.stock, 0);
        assert!(!product.is_in_stock());

        assert!(!product.take_one());
        assert_eq!(product.stock, 0);

        product.restock_one();
        assert_eq!(product.stock, 1);
    }

    #[test]
    fn test_admin_verify() {
        let admin = AdminAccount::default();
        assert!(admin.verify("admin@store.com", "admin123"));
        assert!(!admin.verify("admin@store.com", "wrong"));
        assert!(!admin.verify("someone@store.com", "admin123"));
    }

    #[test]
    fn test_cashier_verify() {
        let cashier = CashierAccount::default();
        assert!(cashier.verify_pin(1234));
        assert!(!cashier.verify_pin(4321));
        assert!(!cashier.verify_pin(0));
    }
}
