//! # Session State
//!
//! What the operator is working on right now: the open cart, the
//! selected customer and the last receipt issued.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Menu Action              Command                  Session Change       │
//! │  ───────────              ───────                  ──────────────       │
//! │                                                                         │
//! │  Add Item to Cart ───────► item::add_to_cart() ──► cart.add(..)        │
//! │                                                                         │
//! │  Select Customer ────────► customer::select() ───► customer = Some(..) │
//! │                                                                         │
//! │  Generate Receipt ───────► billing::checkout() ──► cart.clear()        │
//! │                                                    last_receipt = ..    │
//! │                                                                         │
//! │  Clear Cart ─────────────► billing::clear() ─────► cart.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selected customer survives checkout, so several receipts can be
//! issued to the same person in a row.

use tally_core::{Cart, Customer, Money, ReceiptId};

use super::AppConfig;

/// The most recent receipt issued in this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastReceipt {
    pub receipt_id: ReceiptId,
    pub total: Money,
}

/// Per-run operator session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Lines waiting to be checked out
    pub cart: Cart,

    /// Customer receipts are issued to
    pub customer: Option<Customer>,

    /// Last successful checkout
    pub last_receipt: Option<LastReceipt>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// One-line summary shown above the main menu.
    ///
    /// ```text
    /// Customer: Rahul (1) | Cart: 3 item(s) | Last receipt: R004 ($30.00)
    /// ```
    pub fn status_line(&self, config: &AppConfig) -> String {
        let customer = match &self.customer {
            Some(c) => format!("{} ({})", c.name, c.id),
            None => "none".to_string(),
        };
        let last = match &self.last_receipt {
            Some(last) => format!(
                "{} ({})",
                last.receipt_id,
                config.format_currency(last.total)
            ),
            None => "none".to_string(),
        };

        format!(
            "Customer: {} | Cart: {} item(s) | Last receipt: {}",
            customer,
            self.cart.total_quantity(),
            last
        )
    }
}
