//! # Inventory
//!
//! The authoritative, in-memory product catalog.
//!
//! ## Key Operations
//! - `add` / `remove` / `modify` for the admin menu
//! - `find` / `list` for lookups and tables
//! - `take_one` / `restock_one` for stock moving in and out of carts
//!
//! ## Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory and its backend                            │
//! │                                                                         │
//! │  open() ──► backend.load() ──┬── Ok  ──► products                      │
//! │                              └── Err ──► warn!, start empty            │
//! │                                                                         │
//! │  any mutation ──► products changed in memory                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  backend.save(all) ──┬── Ok  ──► stale = false         │
//! │                                      └── Err ──► error!, stale = true  │
//! │                                                                         │
//! │  Memory is always right. The file may lag behind it after a failed     │
//! │  save, until the next save succeeds.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Barcodes
//! `add` does not check for duplicates. `find`, `remove`, `modify`,
//! `take_one` and `restock_one` all act on the first match in insertion order.

use std::fmt;
use std::path::PathBuf;

use till_core::{CoreError, CoreResult, Product};
use tracing::{debug, error, info, warn};

use crate::backend::{CatalogBackend, FlatFileBackend, WriteMode};
use crate::error::StoreResult;

/// The product catalog.
pub struct Inventory {
    products: Vec<Product>,
    backend: Box<dyn CatalogBackend>,
    stale: bool,
}

impl Inventory {
    /// Opens the inventory, starting empty if the backend cannot be read.
    pub fn open(backend: impl CatalogBackend + 'static) -> Self {
        let location = backend.location();
        let products = match backend.load() {
            Ok(products) => {
                info!(location = %location, count = products.len(), "Inventory loaded");
                products
            }
            Err(e) if e.is_not_found() => {
                info!(location = %location, "No inventory file yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(location = %location, error = %e, "Unable to load inventory, starting empty");
                Vec::new()
            }
        };

        Inventory {
            products,
            backend: Box::new(backend),
            stale: false,
        }
    }

    /// Opens a catalog file.
    pub fn open_file(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self::open(FlatFileBackend::new(path).with_mode(mode))
    }

    /// Opens the inventory, failing if the backend cannot be read.
    pub fn load(backend: impl CatalogBackend + 'static) -> StoreResult<Self> {
        let products = backend.load()?;
        Ok(Inventory {
            products,
            backend: Box::new(backend),
            stale: false,
        })
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    /// Appends a product and saves.
    pub fn add(&mut self, product: Product) {
        debug!(barcode = %product.barcode, name = %product.name, "Adding product");
        self.products.push(product);
        self.flush();
    }

    /// Removes the first product with this barcode and saves.
    ///
    /// Saves even when nothing matched.
    ///
    /// ## Returns
    /// The removed product, or `None` if the barcode is unknown.
    pub fn remove(&mut self, barcode: &str) -> Option<Product> {
        let removed = self
            .position(barcode)
            .map(|index| self.products.remove(index));
        debug!(barcode = %barcode, removed = removed.is_some(), "Removing product");
        self.flush();
        removed
    }

    /// Replaces every field of the first product with this barcode and saves.
    ///
    /// Saves even when nothing matched.
    ///
    /// ## Returns
    /// `true` if a product was replaced.
    pub fn modify(&mut self, barcode: &str, product: Product) -> bool {
        let replaced = match self.position(barcode) {
            Some(index) => {
                self.products[index] = product;
                true
            }
            None => false,
        };
        debug!(barcode = %barcode, replaced, "Modifying product");
        self.flush();
        replaced
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// First product with this barcode.
    pub fn find(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, barcode: &str) -> Option<usize> {
        self.products.iter().position(|p| p.barcode == barcode)
    }

    // =========================================================================
    // Stock Moves
    // =========================================================================

    /// Takes one unit of the first matching product out of stock and saves.
    ///
    /// ## Returns
    /// A snapshot of the product as it was before the unit was taken.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no product has this barcode
    /// - `OutOfStock` if its stock is zero (nothing changes, nothing is saved)
    pub fn take_one(&mut self, barcode: &str) -> CoreResult<Product> {
        let index = self
            .position(barcode)
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

        let product = &mut self.products[index];
        let snapshot = product.clone();
        if !product.take_one() {
            return Err(CoreError::OutOfStock {
                barcode: barcode.to_string(),
            });
        }

        debug!(barcode = %barcode, stock = product.stock, "Stock taken");
        self.flush();
        Ok(snapshot)
    }

    /// Puts one unit of the first matching product back into stock and saves.
    ///
    /// ## Errors
    /// `ProductNotFound` if no product has this barcode.
    pub fn restock_one(&mut self, barcode: &str) -> CoreResult<()> {
        let index = self
            .position(barcode)
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

        let product = &mut self.products[index];
        product.restock_one();
        debug!(barcode = %barcode, stock = product.stock, "Stock returned");
        self.flush();
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the full catalog to the backend.
    pub fn save(&self) -> StoreResult<()> {
        self.backend.save(&self.products)
    }

    /// True while the backend holds an older catalog than memory does.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Saves, logging instead of returning a failure.
    fn flush(&mut self) {
        match self.save() {
            Ok(()) => self.stale = false,
            Err(e) => {
                error!(location = %self.backend.location(), error = %e, "Unable to save inventory");
                self.stale = true;
            }
        }
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("products", &self.products)
            .field("location", &self.backend.location())
            .field("stale", &self.stale)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;
    use till_core::{Discount, Money};

    use crate::error::StoreError;

    /// In-memory backend whose saves can be made to fail.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryBackend {
        pub(crate) stored: Rc<RefCell<Vec<Product>>>,
        pub(crate) fail_saves: Rc<Cell<bool>>,
        pub(crate) saves: Rc<Cell<usize>>,
    }

    impl CatalogBackend for MemoryBackend {
        fn load(&self) -> StoreResult<Vec<Product>> {
            Ok(self.stored.borrow().clone())
        }

        fn save(&self, products: &[Product]) -> StoreResult<()> {
            self.saves.set(self.saves.get() + 1);
            if self.fail_saves.get() {
                return Err(StoreError::io(
                    "memory",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            *self.stored.borrow_mut() = products.to_vec();
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    pub(crate) fn widget() -> Product {
        Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2)
    }

    fn gadget() -> Product {
        Product::new("Gadget", "G1", Money::from_cents(2550), Discount::none(), 5)
    }

    fn file_inventory(dir: &TempDir) -> (Inventory, PathBuf) {
        let path = dir.path().join("inventory.txt");
        (Inventory::open_file(&path, WriteMode::Atomic), path)
    }

    fn reload(path: &std::path::Path) -> Vec<Product> {
        Inventory::load(FlatFileBackend::new(path)).unwrap().list().to_vec()
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let (inventory, path) = file_inventory(&dir);
        assert!(inventory.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_open_unreadable_starts_empty() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a catalog file.
        let inventory = Inventory::open_file(dir.path(), WriteMode::Atomic);
        assert!(inventory.is_empty());
        assert!(Inventory::load(FlatFileBackend::new(dir.path())).is_err());
    }

    #[test]
    fn test_latin1_line_does_not_cost_the_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        let mut bytes = b"Widget,W1,10.00,10,2\nGadget,G1,25.50,0,5\n".to_vec();
        bytes.extend_from_slice(b"Caf\xe9,C1,2.00,0,3\n");
        fs::write(&path, bytes).unwrap();

        let mut inventory = Inventory::open_file(&path, WriteMode::Atomic);
        assert_eq!(inventory.len(), 3);

        inventory.add(Product::new("New", "N1", Money::from_cents(100), Discount::none(), 1));
        let barcodes: Vec<String> = reload(&path).into_iter().map(|p| p.barcode).collect();
        assert_eq!(barcodes, ["W1", "G1", "C1", "N1"]);
    }

    #[test]
    fn test_every_mutation_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let (mut inventory, path) = file_inventory(&dir);

        inventory.add(widget());
        assert_eq!(reload(&path), inventory.list());

        inventory.add(gadget());
        assert_eq!(reload(&path), inventory.list());

        let mut changed = gadget();
        changed.price = Money::from_cents(1999);
        assert!(inventory.modify("G1", changed));
        assert_eq!(reload(&path), inventory.list());

        inventory.take_one("W1").unwrap();
        assert_eq!(reload(&path), inventory.list());

        inventory.restock_one("W1").unwrap();
        assert_eq!(reload(&path), inventory.list());

        assert!(inventory.remove("W1").is_some());
        assert_eq!(reload(&path), inventory.list());
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop_but_saves() {
        let backend = MemoryBackend::default();
        let mut inventory = Inventory::open(backend.clone());
        inventory.add(widget());
        let saves_before = backend.saves.get();

        assert!(inventory.remove("NOPE").is_none());
        assert_eq!(inventory.list(), &[widget()]);
        assert_eq!(backend.saves.get(), saves_before + 1);
    }

    #[test]
    fn test_modify_missing_is_noop_but_saves() {
        let backend = MemoryBackend::default();
        let mut inventory = Inventory::open(backend.clone());
        inventory.add(widget());
        let saves_before = backend.saves.get();

        assert!(!inventory.modify("NOPE", gadget()));
        assert_eq!(inventory.list(), &[widget()]);
        assert_eq!(backend.saves.get(), saves_before + 1);
    }

    #[test]
    fn test_duplicates_resolve_to_first_match() {
        let mut inventory = Inventory::open(MemoryBackend::default());
        let mut second = widget();
        second.name = "Widget (second)".to_string();

        inventory.add(widget());
        inventory.add(second.clone());
        assert_eq!(inventory.find("W1").unwrap().name, "Widget");

        inventory.remove("W1");
        assert_eq!(inventory.find("W1"), Some(&second));
    }

    #[test]
    fn test_modify_replaces_in_place() {
        let mut inventory = Inventory::open(MemoryBackend::default());
        inventory.add(gadget());
        inventory.add(widget());

        let updated = Product::new("Widget", "W1", Money::from_cents(2000), Discount::none(), 9);
        assert!(inventory.modify("W1", updated.clone()));
        assert_eq!(inventory.list()[1], updated);
        assert_eq!(inventory.find("W1").unwrap().final_price().cents(), 2000);
    }

    #[test]
    fn test_take_one_errors_leave_state_alone() {
        let backend = MemoryBackend::default();
        let mut inventory = Inventory::open(backend.clone());
        let mut empty = widget();
        empty.stock = 0;
        inventory.add(empty.clone());
        let saves_before = backend.saves.get();

        assert_eq!(
            inventory.take_one("W1"),
            Err(CoreError::OutOfStock { barcode: "W1".to_string() })
        );
        assert_eq!(
            inventory.take_one("X"),
            Err(CoreError::ProductNotFound("X".to_string()))
        );
        assert_eq!(inventory.list(), &[empty]);
        assert_eq!(backend.saves.get(), saves_before);
    }

    #[test]
    fn test_take_one_returns_snapshot_before_decrement() {
        let mut inventory = Inventory::open(MemoryBackend::default());
        inventory.add(widget());

        let snapshot = inventory.take_one("W1").unwrap();
        assert_eq!(snapshot.stock, 2);
        assert_eq!(inventory.find("W1").unwrap().stock, 1);
    }

    #[test]
    fn test_save_failure_keeps_memory_and_marks_stale() {
        let backend = MemoryBackend::default();
        let mut inventory = Inventory::open(backend.clone());
        inventory.add(widget());
        assert!(!inventory.is_stale());

        backend.fail_saves.set(true);
        inventory.add(gadget());
        assert!(inventory.is_stale());
        assert_eq!(inventory.len(), 2);
        assert_eq!(backend.stored.borrow().len(), 1);

        backend.fail_saves.set(false);
        inventory.take_one("G1").unwrap();
        assert!(!inventory.is_stale());
        assert_eq!(backend.stored.borrow().as_slice(), inventory.list());
    }

    #[test]
    fn test_atomic_and_overwrite_produce_same_file() {
        let dir = TempDir::new().unwrap();
        let atomic_path = dir.path().join("a.txt");
        let overwrite_path = dir.path().join("b.txt");

        for (path, mode) in [(&atomic_path, WriteMode::Atomic), (&overwrite_path, WriteMode::Overwrite)] {
            let mut inventory = Inventory::open_file(path, mode);
            inventory.add(widget());
            inventory.add(gadget());
            inventory.take_one("G1").unwrap();
        }

        assert_eq!(
            fs::read_to_string(&atomic_path).unwrap(),
            fs::read_to_string(&overwrite_path).unwrap()
        );
    }
}
