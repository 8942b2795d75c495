//! # Tally Console Library
//!
//! The interactive billing console. `main.rs` only parses flags and
//! calls [`run`]; everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! tally_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── console.rs      ◄─── Menu loop
//! ├── state/
//! │   ├── mod.rs      ◄─── App (storage + session + config)
//! │   ├── config.rs   ◄─── AppConfig, currency formatting
//! │   └── session.rs  ◄─── Cart, selected customer, last receipt
//! ├── commands/
//! │   ├── item.rs     ◄─── Catalog and cart commands
//! │   ├── customer.rs ◄─── Directory commands
//! │   ├── billing.rs  ◄─── Checkout and receipts
//! │   └── report.rs   ◄─── Report commands
//! ├── reports.rs      ◄─── Report aggregation
//! ├── render.rs       ◄─── Tables and receipt layout
//! └── error.rs        ◄─── Console error type
//! ```

pub mod cli;
pub mod commands;
pub mod console;
pub mod error;
pub mod render;
pub mod reports;
pub mod state;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tally_store::{Storage, StoreConfig};

pub use cli::Cli;
pub use console::Console;
pub use error::{ConsoleError, ConsoleResult, ErrorCode};
pub use state::{App, AppConfig};

/// Runs the console on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, on stderr                     │
/// │     • Default: warn,tally=info, can be overridden with RUST_LOG         │
/// │                                                                         │
/// │  2. Resolve Configuration ────────────────────────────────────────────► │
/// │     • Flags, then TALLY_* variables, then defaults                      │
/// │     • Data dir: --data-dir or the platform data directory               │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Create the data dir, seed sample data if files are missing        │
/// │     • Load items, customers, receipts                                   │
/// │                                                                         │
/// │  4. Run Menu Loop ────────────────────────────────────────────────────► │
/// │     • Until Exit or end of input                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> ConsoleResult<()> {
    init_tracing();

    let config = AppConfig::from_cli(&cli);
    info!(
        data_dir = %config.data_dir.display(),
        store = %config.store_name,
        "Starting Tally"
    );

    let storage = Storage::open(
        StoreConfig::new(config.data_dir.clone()).seed_sample_data(config.seed_sample_data),
    )?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(App::new(storage, config), stdin.lock(), stdout.lock());
    console.run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
///
/// Logs go to stderr so they never interleave with the menus.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tally=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
