//! # till
//!
//! ```bash
//! till                                  # ./inventory.txt, default accounts
//! till --config ./till.toml             # explicit config file
//! till --inventory ./data/stock.txt     # override the catalog file
//! RUST_LOG=debug till                   # show store operations on stderr
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use till_cli::{CliResult, Session, TillConfig};
use till_store::Inventory;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "till", version, about = "Terminal store checkout")]
struct Args {
    /// Path to till.toml (default: platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog file, overrides the config file and TILL_INVENTORY_PATH
    #[arg(short, long)]
    inventory: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "till stopped");
            eprintln!("till: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> CliResult<()> {
    let mut config = TillConfig::load(args.config)?;
    if let Some(path) = args.inventory {
        config.inventory.path = path;
    }
    config.validate()?;

    info!(path = ?config.inventory.path, mode = ?config.write_mode(), "Opening inventory");
    let mut inventory = Inventory::open_file(&config.inventory.path, config.write_mode());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut inventory, &config, stdin.lock(), stdout.lock()).run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every store operation
/// - `RUST_LOG=till_store=trace` - Trace for the store crate only
/// - Default: WARN, so log lines do not interleave with the menus
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
