//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │  ReceiptHeader  │   │   ReceiptLine   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("101")     │   │  receipt_id     │◄──│  receipt_id(FK) │       │
//! │  │  name           │   │  customer_id    │   │  item_id        │       │
//! │  │  price          │   │  date           │   │  item_name      │       │
//! │  │  stock          │   │  total_amount   │   │  qty × price    │       │
//! │  └────────▲────────┘   └─────────────────┘   └────────▲────────┘       │
//! │           │ live lookup                               │ snapshot        │
//! │  ┌────────┴────────┐                         ┌────────┴────────┐       │
//! │  │    CartLine     │ ──── checkout ────────► │    SaleLine     │       │
//! │  │  item_id, qty   │                         │ id, name, price │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A receipt line copies the item name and unit price at checkout time.
//! Later catalog edits never rewrite history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::receipt_id::ReceiptId;

// =============================================================================
// Item
// =============================================================================

/// An item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Business identifier ("101").
    pub id: String,

    /// Display name shown in the cart and on receipts.
    pub name: String,

    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,

    /// Units on hand. Never negative after a catalog mutation.
    pub stock: i64,
}

impl Item {
    /// Creates a catalog item.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks whether `quantity` units can be taken from current stock.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Item Lookup
// =============================================================================

/// Read access to the catalog, by item id.
///
/// The cart holds item ids only and resolves them through this trait on
/// every operation, so a stock or price change between two cart mutations
/// is always honoured.
pub trait ItemLookup {
    /// Finds an item by its id.
    fn find_item(&self, item_id: &str) -> Option<&Item>;

    /// Current stock of an item, `None` if the item does not exist.
    fn current_stock(&self, item_id: &str) -> Option<i64> {
        self.find_item(item_id).map(|item| item.stock)
    }
}

impl ItemLookup for [Item] {
    fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.iter().find(|item| item.id == item_id)
    }
}

impl ItemLookup for Vec<Item> {
    fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.as_slice().find_item(item_id)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

// =============================================================================
// Sale Line
// =============================================================================

/// One line of a sale as handed to the receipt store.
///
/// Built from the cart at checkout; the name and unit price are frozen
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleLine {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Receipt Header
// =============================================================================

/// One record per completed sale.
///
/// ## Invariant
/// `total_amount` equals the sum of `line_total` over every
/// [`ReceiptLine`] carrying the same `receipt_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    pub receipt_id: ReceiptId,
    pub customer_id: String,
    pub date: NaiveDate,
    #[serde(with = "crate::money::decimal")]
    pub total_amount: Money,
}

// =============================================================================
// Receipt Line
// =============================================================================

/// One record per item within a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub receipt_id: ReceiptId,
    pub item_id: String,
    /// Name at time of sale (not looked up again).
    pub item_name: String,
    pub quantity: i64,
    /// Unit price at time of sale.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,
    #[serde(with = "crate::money::decimal")]
    pub line_total: Money,
}

impl ReceiptLine {
    /// Creates a receipt line from a sale line, computing its total.
    pub fn from_sale_line(receipt_id: ReceiptId, line: &SaleLine) -> Self {
        ReceiptLine {
            receipt_id,
            item_id: line.item_id.clone(),
            item_name: line.item_name.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            line_total: line.line_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_lookup_over_slice() {
        let catalog = vec![
            Item::new("101", "Pen", Money::from_cents(1000), 100),
            Item::new("102", "Notebook", Money::from_cents(5000), 0),
        ];

        assert_eq!(catalog.find_item("102").map(|i| i.name.as_str()), Some("Notebook"));
        assert_eq!(catalog.current_stock("101"), Some(100));
        assert_eq!(catalog.current_stock("999"), None);
        assert!(!catalog[1].can_supply(1));
    }

    #[test]
    fn test_receipt_line_from_sale_line() {
        let sale_line = SaleLine {
            item_id: "101".to_string(),
            item_name: "Pen".to_string(),
            quantity: 3,
            unit_price: Money::from_cents(1000),
        };

        let line = ReceiptLine::from_sale_line(ReceiptId::from_sequence(1), &sale_line);

        assert_eq!(line.receipt_id.as_str(), "R001");
        assert_eq!(line.line_total, Money::from_cents(3000));
        assert_eq!(line.price, Money::from_cents(1000));
    }
}
