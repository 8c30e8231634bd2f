//! # Till Configuration
//!
//! Store name, catalog location and operator accounts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     till --inventory ./data/inventory.txt                              │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_INVENTORY_PATH=./data/inventory.txt                           │
//! │     TILL_ATOMIC_WRITES=false                                           │
//! │     TILL_STORE_NAME="Corner Shop"                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, otherwise                                           │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.till.till/till.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ./inventory.txt, admin@store.com, demo_cashier                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Till Demo Store"
//!
//! [inventory]
//! path = "inventory.txt"
//! atomic_writes = true
//!
//! [admin]
//! email = "admin@store.com"
//! password = "admin123"
//!
//! [[cashiers]]
//! name = "demo_cashier"
//! pin = 1234
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use till_core::{AdminAccount, CashierAccount};
use till_store::{WriteMode, DEFAULT_INVENTORY_FILE};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Printed under the invoice banner. Leave empty to omit.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Till Demo Store".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Inventory Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Catalog file, relative to the working directory unless absolute.
    #[serde(default = "default_inventory_path")]
    pub path: PathBuf,

    /// Write through a temp file and rename instead of overwriting in place.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

fn default_inventory_path() -> PathBuf {
    PathBuf::from(DEFAULT_INVENTORY_FILE)
}

fn default_true() -> bool {
    true
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            path: default_inventory_path(),
            atomic_writes: true,
        }
    }
}

fn default_cashiers() -> Vec<CashierAccount> {
    vec![CashierAccount::default()]
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete till configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub inventory: InventorySettings,

    /// The single administrator account.
    #[serde(default)]
    pub admin: AdminAccount,

    /// Everyone allowed to log in as a cashier.
    #[serde(default = "default_cashiers")]
    pub cashiers: Vec<CashierAccount>,
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            store: StoreSettings::default(),
            inventory: InventorySettings::default(),
            admin: AdminAccount::default(),
            cashiers: default_cashiers(),
        }
    }
}

impl TillConfig {
    /// Loads configuration from file and environment on top of defaults.
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional and silently skipped when absent.
    ///
    /// The result is not validated yet, so command line overrides can still
    /// be applied. Call [`TillConfig::validate`] before use.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads one TOML file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.inventory.path.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig("inventory.path must not be empty".into()));
        }

        if self.admin.email.trim().is_empty() {
            return Err(CliError::InvalidConfig("admin.email must not be empty".into()));
        }

        if self.cashiers.is_empty() {
            return Err(CliError::InvalidConfig(
                "at least one [[cashiers]] entry is required".into(),
            ));
        }

        // A PIN alone picks the cashier, so two accounts cannot share one.
        for (i, cashier) in self.cashiers.iter().enumerate() {
            if let Some(other) = self.cashiers[..i].iter().find(|c| c.pin == cashier.pin) {
                return Err(CliError::InvalidConfig(format!(
                    "cashiers '{}' and '{}' share a PIN",
                    other.name, cashier.name
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TILL_INVENTORY_PATH") {
            debug!(path = %path, "Overriding inventory path from environment");
            self.inventory.path = PathBuf::from(path);
        }

        if let Some(value) = var("TILL_ATOMIC_WRITES") {
            match parse_flag(&value) {
                Some(flag) => self.inventory.atomic_writes = flag,
                None => warn!(value = %value, "Unknown TILL_ATOMIC_WRITES value in environment"),
            }
        }

        if let Some(name) = var("TILL_STORE_NAME") {
            self.store.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "till")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// How the catalog file is rewritten.
    pub fn write_mode(&self) -> WriteMode {
        if self.inventory.atomic_writes {
            WriteMode::Atomic
        } else {
            WriteMode::Overwrite
        }
    }

    /// The cashier with this PIN.
    pub fn find_cashier(&self, pin: u32) -> Option<&CashierAccount> {
        self.cashiers.iter().find(|c| c.verify_pin(pin))
    }

    /// Store name for the invoice, if one is set.
    pub fn store_name(&self) -> Option<&str> {
        let name = self.store.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TillConfig::default();
        assert_eq!(config.inventory.path, PathBuf::from("inventory.txt"));
        assert_eq!(config.write_mode(), WriteMode::Atomic);
        assert!(config.admin.verify("admin@store.com", "admin123"));
        assert_eq!(config.find_cashier(1234).unwrap().name, "demo_cashier");
        assert!(config.find_cashier(4321).is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("till.toml");
        std::fs::write(
            &path,
            "[inventory]\natomic_writes = false\n\n[[cashiers]]\nname = \"Ana\"\npin = 4321\n",
        )
        .unwrap();

        let config = TillConfig::from_file(&path).unwrap();
        assert_eq!(config.write_mode(), WriteMode::Overwrite);
        assert_eq!(config.inventory.path, PathBuf::from("inventory.txt"));
        assert_eq!(config.store.name, "Till Demo Store");
        assert_eq!(config.cashiers, vec![CashierAccount::new("Ana", 4321)]);
        assert!(config.find_cashier(1234).is_none());
        assert_eq!(config.find_cashier(4321).unwrap().name, "Ana");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = TillConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_bad_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("till.toml");
        std::fs::write(&path, "[inventory\npath = 3").unwrap();
        assert!(TillConfig::from_file(&path).unwrap_err().is_config());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TillConfig::default();

        config.inventory.path = PathBuf::new();
        assert!(config.validate().is_err());

        config.inventory.path = PathBuf::from("x.txt");
        config.admin.email = " ".to_string();
        assert!(config.validate().is_err());

        config.admin.email = "boss@store.com".to_string();
        config.cashiers.clear();
        assert!(config.validate().is_err());

        config.cashiers.push(CashierAccount::new("Ana", 1));
        assert!(config.validate().is_ok());

        config.cashiers.push(CashierAccount::new("Bo", 1));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'Ana' and 'Bo' share a PIN"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TILL_INVENTORY_PATH", "/tmp/stock.txt"),
            ("TILL_ATOMIC_WRITES", "no"),
            ("TILL_STORE_NAME", "Corner Shop"),
        ]);
        let mut config = TillConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.inventory.path, PathBuf::from("/tmp/stock.txt"));
        assert!(!config.inventory.atomic_writes);
        assert_eq!(config.store_name(), Some("Corner Shop"));
    }

    #[test]
    fn test_unknown_flag_value_is_ignored() {
        let mut config = TillConfig::default();
        config.apply_overrides(|key| (key == "TILL_ATOMIC_WRITES").then(|| "maybe".to_string()));
        assert!(config.inventory.atomic_writes);
    }

    #[test]
    fn test_blank_store_name_is_omitted() {
        let mut config = TillConfig::default();
        config.store.name = "   ".to_string();
        assert_eq!(config.store_name(), None);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&TillConfig::default()).unwrap();
        assert!(toml_str.contains("[inventory]"));
        assert!(toml_str.contains("[[cashiers]]"));
    }
}
