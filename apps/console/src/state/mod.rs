//! # State Module
//!
//! Everything a command can touch, split by lifetime:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                           App                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   Storage    │  │   Session    │  │   AppConfig      │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Catalog     │  │  Cart        │  │  store_name      │              │
//! │  │  Directory   │  │  customer    │  │  currency_symbol │              │
//! │  │  Receipts    │  │  last receipt│  │  data_dir        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  Storage: persisted, outlives the run                                  │
//! │  Session: discarded on exit                                            │
//! │  AppConfig: read-only after startup                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_data_dir, AppConfig};
pub use session::{LastReceipt, Session};

use tally_store::Storage;

/// State handed to every command.
///
/// Fields are public so a command can borrow storage and session
/// separately (for example the catalog immutably while the cart changes).
#[derive(Debug)]
pub struct App {
    pub storage: Storage,
    pub session: Session,
    pub config: AppConfig,
}

impl App {
    pub fn new(storage: Storage, config: AppConfig) -> Self {
        App {
            storage,
            session: Session::new(),
            config,
        }
    }
}
