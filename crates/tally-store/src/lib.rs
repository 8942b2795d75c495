//! # tally-store: Flat-File Storage for Tally
//!
//! This crate provides persistence and repositories for the billing console.
//! Every data set is read fully into memory at startup and rewritten whole
//! on each change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Console command (Generate Receipt)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories │    │  Snapshot    │  │   │
//! │  │   │ (storage.rs)  │    │               │    │  stores      │  │   │
//! │  │   │               │    │ Catalog       │    │              │  │   │
//! │  │   │ open / seed   │◄───│ Directory     │───►│ FlatFile<T>  │  │   │
//! │  │   │ checkout      │    │ ReceiptStore  │    │ Memory...<T> │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   items.txt  customers.txt  receipts.txt  receipt_details.txt   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Opening the data directory, wiring repositories
//! - [`repository`] - Catalog, directory and receipt repositories
//! - [`checkout`] - Cart to receipt pipeline
//! - [`snapshot`] - Persistence trait and in-memory store
//! - [`flat_file`] / [`codec`] - Delimited text files
//! - [`seed`] - Sample data for a fresh directory
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_store::{Storage, StoreConfig};
//!
//! let mut storage = Storage::open(StoreConfig::new("./data"))?;
//!
//! let pens = storage.catalog().search("pen");
//! let receipt_id = storage.checkout(Some(&customer), &mut cart)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod codec;
pub mod error;
pub mod flat_file;
pub mod repository;
pub mod seed;
pub mod snapshot;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use flat_file::FlatFile;
pub use snapshot::{MemorySnapshot, SnapshotStore};
pub use storage::{Storage, StoreConfig};

// Repository re-exports for convenience
pub use repository::catalog::Catalog;
pub use repository::directory::Directory;
pub use repository::receipt::ReceiptStore;
