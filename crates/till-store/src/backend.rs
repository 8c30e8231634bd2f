//! # Catalog Backends
//!
//! Where the catalog lives between runs.
//!
//! ## Save Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Every Inventory mutation                              │
//! │                                                                         │
//! │  add / remove / modify / take_one / restock_one                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  backend.save(all products) ← full rewrite, never an append            │
//! │       │                                                                 │
//! │       ├── WriteMode::Atomic     write inventory.txt.tmp, rename over   │
//! │       │                         inventory.txt                          │
//! │       │                                                                 │
//! │       └── WriteMode::Overwrite  truncate inventory.txt and write       │
//! │                                                                         │
//! │  The file is read once, when the Inventory is opened.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use till_core::Product;
use tracing::{debug, warn};

use crate::codec::{decode_catalog, encode_catalog};
use crate::error::{StoreError, StoreResult};

/// Storage for the full catalog.
///
/// `save` always receives the complete catalog and replaces whatever was
/// stored before.
pub trait CatalogBackend {
    /// Reads the stored catalog.
    fn load(&self) -> StoreResult<Vec<Product>>;

    /// Replaces the stored catalog.
    fn save(&self, products: &[Product]) -> StoreResult<()>;

    /// Human-readable location, used in log messages.
    fn location(&self) -> String;
}

// =============================================================================
// Flat File Backend
// =============================================================================

/// How the catalog file is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write a sibling `.tmp` file, then rename it over the catalog.
    /// A crash mid-write leaves the previous catalog intact.
    #[default]
    Atomic,

    /// Truncate and rewrite the catalog in place.
    Overwrite,
}

/// The catalog as a plain text file.
#[derive(Debug, Clone)]
pub struct FlatFileBackend {
    path: PathBuf,
    mode: WriteMode,
}

impl FlatFileBackend {
    /// Creates a backend for the given file with atomic writes.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFileBackend {
            path: path.into(),
            mode: WriteMode::default(),
        }
    }

    /// Sets the write mode.
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the scratch file used by atomic writes.
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl CatalogBackend for FlatFileBackend {
    /// Reads and decodes the file. Malformed lines are logged and skipped.
    ///
    /// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
    fn load(&self) -> StoreResult<Vec<Product>> {
        let bytes = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            warn!(path = ?self.path, "Catalog is not valid UTF-8, replacing bad bytes");
        }
        let (products, rejected) = decode_catalog(&text);

        for err in &rejected {
            warn!(path = ?self.path, error = %err, "Skipping catalog line");
        }

        debug!(path = ?self.path, count = products.len(), skipped = rejected.len(), "Catalog read");
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> StoreResult<()> {
        let contents = encode_catalog(products);

        match self.mode {
            WriteMode::Atomic => {
                let temp_path = self.temp_path();
                fs::write(&temp_path, contents.as_bytes())
                    .map_err(|e| StoreError::io(&temp_path, e))?;
                fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
            }
            WriteMode::Overwrite => {
                fs::write(&self.path, contents.as_bytes())
                    .map_err(|e| StoreError::io(&self.path, e))?;
            }
        }

        debug!(path = ?self.path, count = products.len(), mode = ?self.mode, "Catalog written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use till_core::{Discount, Money};

    fn products() -> Vec<Product> {
        vec![
            Product::new("Widget", "W1", Money::from_cents(1000), Discount::from_percent(10), 2),
            Product::new("Gadget", "G1", Money::from_cents(2550), Discount::none(), 0),
        ]
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let backend = FlatFileBackend::new(dir.path().join("inventory.txt"));

        backend.save(&products()).unwrap();
        assert_eq!(backend.load().unwrap(), products());
    }

    #[test]
    fn test_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        FlatFileBackend::new(&path).save(&products()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Widget,W1,10.00,10,2\nGadget,G1,25.50,0,0\n");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let backend = FlatFileBackend::new(dir.path().join("inventory.txt"));
        backend.save(&products()).unwrap();

        assert!(!dir.path().join("inventory.txt.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        let backend = FlatFileBackend::new(&path).with_mode(WriteMode::Overwrite);

        backend.save(&products()).unwrap();
        backend.save(&products()[..1]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Widget,W1,10.00,10,2\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let backend = FlatFileBackend::new(dir.path().join("absent.txt"));
        let err = backend.load().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        fs::write(&path, "Widget,W1,10.00,10,2\ngarbage\nGadget,G1,25.50,0,0\n").unwrap();

        let loaded = FlatFileBackend::new(&path).load().unwrap();
        assert_eq!(loaded, products());
    }

    #[test]
    fn test_load_keeps_lines_with_non_utf8_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        let mut bytes = b"Widget,W1,10.00,10,2\nGadget,G1,25.50,0,0\n".to_vec();
        bytes.extend_from_slice(b"Caf\xe9,C1,2.00,0,3\n");
        fs::write(&path, bytes).unwrap();

        let loaded = FlatFileBackend::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(&loaded[..2], &products()[..]);
        assert_eq!(loaded[2].name, "Caf\u{FFFD}");
        assert_eq!(loaded[2].barcode, "C1");
        assert_eq!(loaded[2].stock, 3);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let backend = FlatFileBackend::new(dir.path().join("no-such-dir").join("inventory.txt"));
        assert!(matches!(backend.save(&products()), Err(StoreError::Io { .. })));
    }
}
