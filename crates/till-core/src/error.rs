//! # Error Types
//!
//! What can go wrong before anything touches the disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Where errors live                                 │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Checkout rule violations                       │
//! │  └── ValidationError  - A typed field was unusable                     │
//! │                                                                         │
//! │  till-store errors (separate crate)                                    │
//! │  └── StoreError       - Catalog file failures                          │
//! │                                                                         │
//! │  Both end up as a one-line message on the terminal.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries the barcode or field it is about, so the terminal
//! can print it as-is.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout rule violations.
///
/// None of these are fatal: the session reports them and returns to its menu.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No product with this barcode exists in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product exists but has no stock left to put in a cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (barcode: W1)
    ///      │
    ///      ▼
    /// Check stock: 0
    ///      │
    ///      ▼
    /// OutOfStock { barcode: "W1" }  → cart and stock untouched
    /// ```
    #[error("Product out of stock: {barcode}")]
    OutOfStock { barcode: String },

    /// The cart holds no item with this barcode.
    #[error("Product not in cart: {0}")]
    NotInCart(String),

    /// An invoice was requested for a cart with nothing in it.
    #[error("Cart is empty")]
    EmptyCart,

    /// Text could not be read as a money amount.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidMoney { input: String, reason: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field the admin typed that cannot be stored.
///
/// Raised before a value reaches the inventory, so that everything stored can
/// be written to and read back from the catalog file unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A character the catalog file cannot hold, such as a comma in a barcode.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
