//! # till-core: Pure Checkout Logic for Till
//!
//! This crate holds everything about the store that can be decided without
//! touching the disk or the terminal: prices, discounts, carts and invoices.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Till Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 till-cli (terminal session)                     │   │
//! │  │   Main menu ──► Admin menu / Cashier menu ──► Invoice print     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               till-store (catalog file, Inventory)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  invoice  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Invoice  │  │   │
//! │  │   │  Discount │  │  parsing  │  │  totals   │  │  render   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Discount, operator accounts)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart with a cached running total
//! - [`invoice`] - Immutable invoice snapshot and its rendering
//! - [`report`] - Fixed-width tables shared by inventory, cart and invoice views
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for catalog fields
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, Discount, Money, Product};
//!
//! let widget = Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2);
//! assert_eq!(widget.final_price(), Money::from_cents(900));
//!
//! let mut cart = Cart::new();
//! cart.add_item(widget);
//! assert_eq!(cart.total().to_string(), "$9.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod invoice;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::Invoice;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest discount a product can carry, in whole percent.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

/// Highest price a product can carry, in cents ($10,000,000.00).
///
/// A cart can hold at most `u32::MAX` units, so its total stays well inside
/// `i64` at this ceiling.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Separator between fields of a catalog line.
///
/// The format has no escaping. Lines are split from the right, so names may
/// contain it but barcodes may not.
pub const FIELD_SEPARATOR: char = ',';
