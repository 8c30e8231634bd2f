//! # Store Error Types
//!
//! Error types for catalog file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / bad catalog line                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path or line number          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Inventory logs it and keeps going with the in-memory catalog          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Catalog persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file could not be read or written.
    ///
    /// ## When This Occurs
    /// - File missing on first start
    /// - Directory not writable
    /// - Disk full
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog line could not be decoded.
    #[error("Malformed catalog line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl StoreError {
    /// Creates an Io error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a Malformed error for a 1-based line number.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// True if the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
