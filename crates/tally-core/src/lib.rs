//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of the billing console. It contains the cart,
//! money arithmetic and receipt id rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Console (apps/console)                         │   │
//! │  │    Item menu ──► Cart ──► Generate Receipt ──► Reports          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │receipt_id │  │   │
//! │  │   │   Item    │  │   Money   │  │   Cart    │  │ ReceiptId │  │   │
//! │  │   │  Receipt  │  │           │  │ CartLine  │  │  R001...  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-store (Persistence Layer)                 │   │
//! │  │        flat files, catalog, directory, receipts, checkout       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Customer, ReceiptHeader, ReceiptLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The shopping cart, validated against live catalog stock
//! - [`receipt_id`] - Receipt identifier parsing and allocation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Cart, Item, Money};
//!
//! let catalog = vec![Item::new("101", "Pen", Money::from_cents(1000), 5)];
//!
//! let mut cart = Cart::new();
//! cart.add(&catalog, "101", 3).unwrap();
//!
//! assert_eq!(cart.total(&catalog), Money::from_cents(3000));
//! assert!(cart.add(&catalog, "101", 3).is_err()); // only 5 in stock
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt_id;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt_id::{next_receipt_id, ReceiptId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix character of every receipt id ("R001").
pub const RECEIPT_ID_PREFIX: char = 'R';

/// Minimum width of the zero-padded receipt sequence number.
///
/// Sequences above 999 simply grow wider ("R1000").
pub const RECEIPT_ID_WIDTH: usize = 3;
