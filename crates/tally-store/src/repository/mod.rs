//! # Repository Module
//!
//! In-memory repositories for Tally, each backed by a snapshot store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  storage.catalog().search("pen")                               │
//! │       ▼                                                                 │
//! │  Catalog                                                               │
//! │  ├── search(&self, query)                                              │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── add_item(&mut self, ...)                                          │
//! │  └── update_stock(&mut self, id, qty)                                  │
//! │       │                                                                 │
//! │       │  save(&all_items)                                               │
//! │       ▼                                                                 │
//! │  SnapshotStore<Item> (items.txt or memory)                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`Catalog`] - Items, search, stock
//! - [`Directory`] - Customers and registration
//! - [`ReceiptStore`] - Receipt headers, lines and id allocation

pub mod catalog;
pub mod directory;
pub mod receipt;

pub use catalog::Catalog;
pub use directory::Directory;
pub use receipt::ReceiptStore;
