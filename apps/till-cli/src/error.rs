//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌──────────────────────────┐     ┌──────────────────────────────────┐ │
//! │  │  Configuration           │     │  Terminal                        │ │
//! │  │                          │     │                                  │ │
//! │  │  InvalidConfig           │     │  InputClosed  (end of input)     │ │
//! │  │  ConfigLoadFailed        │     │  Terminal     (stdout/stdin I/O) │ │
//! │  └──────────────────────────┘     └──────────────────────────────────┘ │
//! │                                                                         │
//! │  Configuration errors stop the program before any menu is shown.       │
//! │  InputClosed ends the session the same way choosing Exit does.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog and checkout failures never reach this type. The session reports
//! them to the user and keeps going.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Terminal Errors
    // =========================================================================
    /// Input ended while the session was waiting for it.
    #[error("Input closed")]
    InputClosed,

    /// Reading from or writing to the terminal failed.
    #[error("Terminal I/O error: {0}")]
    Terminal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Terminal(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl CliError {
    /// True for errors that mean the program cannot start.
    pub fn is_config(&self) -> bool {
        matches!(self, CliError::InvalidConfig(_) | CliError::ConfigLoadFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_terminal() {
        let err: CliError = std::io::Error::from(std::io::ErrorKind::BrokenPipe).into();
        assert!(matches!(err, CliError::Terminal(_)));
        assert!(!err.is_config());
    }

    #[test]
    fn test_toml_error_is_config() {
        let err: CliError = toml::from_str::<toml::Table>("not = [valid").unwrap_err().into();
        assert!(err.is_config());
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
