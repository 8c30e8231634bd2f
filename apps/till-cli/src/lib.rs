//! # till-cli: Terminal Front End
//!
//! ## Module Structure
//! ```text
//! till-cli/src/
//! ├── main.rs       # `till` binary: args, logging, startup
//! ├── lib.rs        # This file
//! ├── config.rs     # till.toml, env overrides, validation
//! ├── error.rs      # CliError
//! ├── terminal.rs   # Prompter: tokens and lines over BufRead/Write
//! └── session.rs    # Menus and login state machine
//! ```
//!
//! ## Startup
//! ```text
//!   args ──► TillConfig::load ──► --inventory override ──► validate
//!                                                              │
//!   Inventory::open_file(path, write_mode) ◄───────────────────┘
//!          │
//!          ▼
//!   Session::new(&mut inventory, &config, stdin, stdout).run()
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod terminal;

pub use config::TillConfig;
pub use error::{CliError, CliResult};
pub use session::Session;
