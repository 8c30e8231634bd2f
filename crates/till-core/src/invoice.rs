//! # Invoice
//!
//! A point-in-time copy of a cart, signed with the cashier's name.
//!
//! ## Lifecycle
//! ```text
//! Cart (non-empty) ──► Invoice::new(&cart, &cashier) ──► render() ──► terminal
//!                              │
//!                              └── captures items, total and the clock once
//! ```
//!
//! The invoice owns its own copy of the line items, so clearing the cart
//! afterwards does not change what it prints.

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::report::write_line_items;
use crate::types::{CashierAccount, Product};

/// An immutable invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    items: Vec<Product>,
    total: Money,
    cashier: String,
    store_name: Option<String>,
    issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Builds an invoice from the cart, stamped with the current time.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` if the cart has no items.
    pub fn new(cart: &Cart, cashier: &CashierAccount) -> CoreResult<Self> {
        Self::issued_at(cart, cashier, Utc::now())
    }

    /// Builds an invoice with an explicit timestamp.
    pub fn issued_at(
        cart: &Cart,
        cashier: &CashierAccount,
        issued_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Invoice {
            items: cart.items().to_vec(),
            total: cart.total(),
            cashier: cashier.name.clone(),
            store_name: None,
            issued_at,
        })
    }

    /// Prints the store name under the invoice banner.
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = Some(name.into());
        self
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn cashier(&self) -> &str {
        &self.cashier
    }

    pub fn issued_at_time(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Renders the invoice as text. Repeated calls return identical output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=================== INVOICE ===================")?;
        if let Some(store) = &self.store_name {
            writeln!(f, "{}", store)?;
        }
        writeln!(
            f,
            "Date: {}",
            self.issued_at
                .with_timezone(&Local)
                .format("%a %b %e %H:%M:%S %Y")
        )?;
        writeln!(f, "Cashier: {}", self.cashier)?;
        writeln!(f)?;
        writeln!(f, "Products:")?;
        write_line_items(f, &self.items)?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "=============================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Discount;
    use chrono::TimeZone;

    fn widget() -> Product {
        Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2)
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let cart = Cart::new();
        let result = Invoice::new(&cart, &CashierAccount::default());
        assert_eq!(result, Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_invoice_copies_cart() {
        let mut cart = Cart::new();
        cart.add_item(widget());
        cart.add_item(widget());

        let invoice = Invoice::issued_at(&cart, &CashierAccount::default(), fixed_time()).unwrap();
        cart.clear();

        assert_eq!(invoice.items().len(), 2);
        assert_eq!(invoice.total().cents(), 1800);
        assert_eq!(invoice.cashier(), "demo_cashier");
        assert_eq!(invoice.issued_at_time(), fixed_time());
    }

    #[test]
    fn test_render_contents() {
        let mut cart = Cart::new();
        cart.add_item(widget());

        let invoice = Invoice::issued_at(&cart, &CashierAccount::new("Dana", 1), fixed_time())
            .unwrap()
            .with_store_name("Corner Shop");
        let text = invoice.render();

        let expected_date = fixed_time()
            .with_timezone(&Local)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string();

        assert!(text.starts_with("=================== INVOICE ==================="));
        assert!(text.contains("Corner Shop\n"));
        assert!(text.contains(&format!("Date: {}\n", expected_date)));
        assert!(text.contains("Cashier: Dana\n"));
        assert!(text.contains("Widget"));
        assert!(text.contains("Total: $9.00\n"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut cart = Cart::new();
        cart.add_item(widget());
        let invoice = Invoice::new(&cart, &CashierAccount::default()).unwrap();

        assert_eq!(invoice.render(), invoice.render());
    }
}
