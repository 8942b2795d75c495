//! # Storage
//!
//! Opens the data directory and wires every repository to its file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage::open                                   │
//! │                                                                         │
//! │  Console startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Where the files live, seeding on/off     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::open(config)                                                 │
//! │       │  1. create data dir                                            │
//! │       │  2. seed missing files (seed.rs)                               │
//! │       │  3. load every file into memory                                │
//! │       ▼                                                                 │
//! │  ┌─────────────┐ ┌─────────────┐ ┌──────────────────────────┐          │
//! │  │  Catalog    │ │  Directory  │ │  ReceiptStore            │          │
//! │  │  items.txt  │ │customers.txt│ │receipts.txt + details    │          │
//! │  └─────────────┘ └─────────────┘ └──────────────────────────┘          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use tally_core::{Cart, Customer, Item, ReceiptHeader, ReceiptId, ReceiptLine};

use crate::checkout;
use crate::error::{StoreError, StoreResult};
use crate::flat_file::FlatFile;
use crate::repository::{Catalog, Directory, ReceiptStore};
use crate::seed;
use crate::snapshot::MemorySnapshot;

/// Item catalog file name.
pub const ITEMS_FILE: &str = "items.txt";

/// Customer directory file name.
pub const CUSTOMERS_FILE: &str = "customers.txt";

/// Receipt header file name.
pub const RECEIPTS_FILE: &str = "receipts.txt";

/// Receipt line file name.
pub const RECEIPT_LINES_FILE: &str = "receipt_details.txt";

// =============================================================================
// Configuration
// =============================================================================

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data").seed_sample_data(false);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the four data files.
    pub data_dir: PathBuf,

    /// Whether to create sample items and customers when their files are
    /// missing.
    /// Default: true
    pub seed_sample_data: bool,
}

impl StoreConfig {
    /// Creates a configuration for `data_dir`. Created on open if missing.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            seed_sample_data: true,
        }
    }

    /// Sets whether to seed sample data.
    pub fn seed_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_FILE)
    }

    pub fn receipts_path(&self) -> PathBuf {
        self.data_dir.join(RECEIPTS_FILE)
    }

    pub fn receipt_lines_path(&self) -> PathBuf {
        self.data_dir.join(RECEIPT_LINES_FILE)
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Handle to every repository.
///
/// ## Usage in Console Commands
/// ```rust,ignore
/// let items = storage.catalog().search("pen");
/// let receipt_id = storage.checkout(session.customer(), &mut session.cart)?;
/// ```
#[derive(Debug)]
pub struct Storage {
    catalog: Catalog,
    directory: Directory,
    receipts: ReceiptStore,
    data_dir: Option<PathBuf>,
}

impl Storage {
    /// Opens (and if needed initializes) the data directory.
    ///
    /// ## What This Does
    /// 1. Creates the data directory if it doesn't exist
    /// 2. Writes sample items/customers if their files are missing and
    ///    seeding is enabled
    /// 3. Creates empty receipt files (header comment only) if missing
    /// 4. Loads all four files
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.data_dir.display(), "Opening data directory");

        fs::create_dir_all(&config.data_dir)
            .map_err(|err| StoreError::persistence(&config.data_dir, err))?;

        let items = FlatFile::<Item>::new(config.items_path());
        let customers = FlatFile::<Customer>::new(config.customers_path());
        let headers = FlatFile::<ReceiptHeader>::new(config.receipts_path());
        let lines = FlatFile::<ReceiptLine>::new(config.receipt_lines_path());

        if config.seed_sample_data {
            seed::ensure_file(&items, &seed::sample_items())?;
            seed::ensure_file(&customers, &seed::sample_customers())?;
        }
        seed::ensure_file(&headers, &[])?;
        seed::ensure_file(&lines, &[])?;

        let storage = Storage {
            catalog: Catalog::load(Box::new(items))?,
            directory: Directory::load(Box::new(customers))?,
            receipts: ReceiptStore::load(Box::new(headers), Box::new(lines))?,
            data_dir: Some(config.data_dir),
        };

        info!(
            items = storage.catalog.len(),
            customers = storage.directory.len(),
            receipts = storage.receipts.headers().len(),
            "Storage ready"
        );
        Ok(storage)
    }

    /// Creates storage that never touches disk (for tests).
    ///
    /// ## Usage
    /// ```rust
    /// use tally_store::{seed, Storage};
    ///
    /// let storage = Storage::in_memory(seed::sample_items(), seed::sample_customers());
    /// assert_eq!(storage.catalog().len(), 10);
    /// assert!(storage.receipts().headers().is_empty());
    /// ```
    pub fn in_memory(items: Vec<Item>, customers: Vec<Customer>) -> Self {
        Storage::from_parts(
            Catalog::new(items.clone(), Box::new(MemorySnapshot::with_records(items))),
            Directory::new(
                customers.clone(),
                Box::new(MemorySnapshot::with_records(customers)),
            ),
            ReceiptStore::new(
                Vec::new(),
                Vec::new(),
                Box::new(MemorySnapshot::<ReceiptHeader>::new()),
                Box::new(MemorySnapshot::<ReceiptLine>::new()),
            ),
        )
    }

    /// Assembles storage from repositories built elsewhere.
    pub fn from_parts(catalog: Catalog, directory: Directory, receipts: ReceiptStore) -> Self {
        Storage {
            catalog,
            directory,
            receipts,
            data_dir: None,
        }
    }

    /// The data directory, `None` for in-memory storage.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn receipts(&self) -> &ReceiptStore {
        &self.receipts
    }

    pub fn receipts_mut(&mut self) -> &mut ReceiptStore {
        &mut self.receipts
    }

    /// Checks out `cart` for `customer`, dated today (local time).
    pub fn checkout(
        &mut self,
        customer: Option<&Customer>,
        cart: &mut Cart,
    ) -> StoreResult<ReceiptId> {
        let today = Local::now().date_naive();
        self.checkout_on(customer, cart, today)
    }

    /// Checks out `cart` for `customer` with an explicit receipt date.
    pub fn checkout_on(
        &mut self,
        customer: Option<&Customer>,
        cart: &mut Cart,
        date: NaiveDate,
    ) -> StoreResult<ReceiptId> {
        checkout::checkout(customer, cart, &self.catalog, &mut self.receipts, date)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
