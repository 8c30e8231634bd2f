//! # till-store: Catalog Persistence for Till
//!
//! Keeps the product catalog in memory and on disk in step.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          till-store                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  register   add_to_cart / remove_from_cart / release_cart        │  │
//! │  └───────────────────────────────┬──────────────────────────────────┘  │
//! │                                  │ take_one / restock_one              │
//! │  ┌───────────────────────────────▼──────────────────────────────────┐  │
//! │  │  Inventory   Vec<Product>, flushed after every mutation          │  │
//! │  └───────────────────────────────┬──────────────────────────────────┘  │
//! │                                  │ CatalogBackend                      │
//! │  ┌───────────────────────────────▼──────────────────────────────────┐  │
//! │  │  FlatFileBackend   codec: name,barcode,price,discount,stock      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use till_core::Cart;
//! use till_store::{register, Inventory, WriteMode};
//!
//! let mut inventory = Inventory::open_file("inventory.txt", WriteMode::Atomic);
//! let mut cart = Cart::new();
//! register::add_to_cart(&mut inventory, &mut cart, "W1")?;
//! # Ok::<(), till_core::CoreError>(())
//! ```

pub mod backend;
pub mod codec;
pub mod error;
pub mod inventory;
pub mod register;

pub use backend::{CatalogBackend, FlatFileBackend, WriteMode};
pub use error::{StoreError, StoreResult};
pub use inventory::Inventory;

/// Default catalog file name, relative to the working directory.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";
