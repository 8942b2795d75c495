//! # Sales Reports
//!
//! Read-only aggregation over the receipt store. Nothing here prints;
//! [`crate::render`] turns these into tables.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReceiptStore                                                           │
//! │     │                                                                   │
//! │     ├── headers_by_date(d) ───────► DailySales      (count, Σ, avg)    │
//! │     ├── headers_by_customer(c) ───► PurchaseHistory (receipts + lines) │
//! │     └── lines() ──────────────────► ItemSummary     (per item, by Σ)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use tally_core::{Money, ReceiptHeader, ReceiptLine};
use tally_store::ReceiptStore;

// =============================================================================
// Daily Sales
// =============================================================================

/// Receipts dated a single day.
#[derive(Debug)]
pub struct DailySales<'a> {
    pub date: NaiveDate,
    pub receipts: Vec<&'a ReceiptHeader>,
    pub total_sales: Money,
}

impl DailySales<'_> {
    pub fn transactions(&self) -> usize {
        self.receipts.len()
    }

    /// Average receipt value; zero on a day without sales.
    pub fn average(&self) -> Money {
        self.total_sales.divide_rounded(self.receipts.len() as i64)
    }
}

pub fn daily_sales(receipts: &ReceiptStore, date: NaiveDate) -> DailySales<'_> {
    let headers = receipts.headers_by_date(date);
    let total_sales = headers.iter().map(|h| h.total_amount).sum();

    DailySales {
        date,
        receipts: headers,
        total_sales,
    }
}

// =============================================================================
// Customer Purchase History
// =============================================================================

/// One past receipt with its lines.
#[derive(Debug)]
pub struct PastReceipt<'a> {
    pub header: &'a ReceiptHeader,
    pub lines: Vec<&'a ReceiptLine>,
}

/// Every receipt issued to one customer, oldest first.
#[derive(Debug)]
pub struct PurchaseHistory<'a> {
    pub customer_id: String,
    pub receipts: Vec<PastReceipt<'a>>,
    pub total_spent: Money,
}

impl PurchaseHistory<'_> {
    pub fn purchases(&self) -> usize {
        self.receipts.len()
    }
}

pub fn customer_history<'a>(receipts: &'a ReceiptStore, customer_id: &str) -> PurchaseHistory<'a> {
    let past: Vec<PastReceipt<'a>> = receipts
        .headers_by_customer(customer_id)
        .into_iter()
        .map(|header| PastReceipt {
            header,
            lines: receipts.lines_by_receipt_id(header.receipt_id.as_str()),
        })
        .collect();
    let total_spent = past.iter().map(|r| r.header.total_amount).sum();

    PurchaseHistory {
        customer_id: customer_id.to_string(),
        receipts: past,
        total_spent,
    }
}

// =============================================================================
// Item Sales Summary
// =============================================================================

/// Sales of one item across all receipts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSales {
    pub item_id: String,
    /// Name on the first receipt line seen for this id.
    pub item_name: String,
    pub quantity_sold: i64,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    /// Highest revenue first; ties by item id.
    pub rows: Vec<ItemSales>,
    pub total_quantity: i64,
    pub total_revenue: Money,
}

pub fn item_summary(receipts: &ReceiptStore) -> ItemSummary {
    let mut by_item: HashMap<&str, ItemSales> = HashMap::new();

    for line in receipts.lines() {
        let entry = by_item
            .entry(line.item_id.as_str())
            .or_insert_with(|| ItemSales {
                item_id: line.item_id.clone(),
                item_name: line.item_name.clone(),
                quantity_sold: 0,
                revenue: Money::zero(),
            });
        entry.quantity_sold += line.quantity;
        entry.revenue += line.line_total;
    }

    let mut rows: Vec<ItemSales> = by_item.into_values().collect();
    rows.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    let total_quantity = rows.iter().map(|r| r.quantity_sold).sum();
    let total_revenue = rows.iter().map(|r| r.revenue).sum();

    ItemSummary {
        rows,
        total_quantity,
        total_revenue,
    }
}
