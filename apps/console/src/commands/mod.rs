//! # Console Commands Module
//!
//! Every action reachable from a menu.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── item.rs      ◄─── Catalog search/add, cart add/update/remove
//! ├── customer.rs  ◄─── Directory search/add, customer selection
//! ├── billing.rs   ◄─── View cart, generate/print receipt, clear cart
//! └── report.rs    ◄─── Daily sales, purchase history, item summary
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Command Flow                                 │
//! │                                                                         │
//! │  Menu loop (console.rs)                                                 │
//! │  ──────────────────────                                                 │
//! │  Enter item ID: 101                                                     │
//! │  Enter quantity: 3                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  item::add_to_cart(                                                     │
//! │      &mut app,       ◄── Storage + Session + AppConfig                 │
//! │      "101",          ◄── Raw text from the prompt                      │
//! │      "3",            ◄── Parsed and validated here                     │
//! │  ) -> ConsoleResult<CartLine>                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Menu loop prints a confirmation, or the error message                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that only display take an `out: &mut impl Write` and print
//! through [`crate::render`]; commands that change state return what
//! changed and leave the wording to the menu loop.

pub mod billing;
pub mod customer;
pub mod item;
pub mod report;
