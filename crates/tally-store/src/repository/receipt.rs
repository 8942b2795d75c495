//! # Receipt Repository
//!
//! Completed sales: one header per receipt plus its lines.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Recording a Receipt                               │
//! │                                                                         │
//! │  1. CHECK                                                              │
//! │     └── no lines? → EmptyReceipt (no id allocated)                     │
//! │                                                                         │
//! │  2. ALLOCATE                                                           │
//! │     └── next_receipt_id() → R004                                       │
//! │         (over headers, lines and rows kept undecoded on disk)          │
//! │                                                                         │
//! │  3. APPEND (memory)                                                    │
//! │     └── 1 header { R004, customer, date, Σ line totals }               │
//! │     └── N lines  { R004, item, name, qty, price, qty × price }         │
//! │                                                                         │
//! │  4. PERSIST                                                            │
//! │     └── save headers  → receipts.txt                                   │
//! │     └── save lines    → receipt_details.txt                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two saves are not atomic. If the header save succeeds and the line
//! save fails, the header file has a receipt with no lines on disk. Either
//! failure is returned as `Persistence` and the in-memory append is kept.

use chrono::NaiveDate;
use tracing::{debug, info};

use tally_core::{
    next_receipt_id, CoreError, Money, ReceiptHeader, ReceiptId, ReceiptLine, SaleLine,
};

use crate::error::StoreResult;
use crate::snapshot::SnapshotStore;

/// Repository for receipt headers and lines.
#[derive(Debug)]
pub struct ReceiptStore {
    headers: Vec<ReceiptHeader>,
    lines: Vec<ReceiptLine>,
    /// Ids of rows on disk that did not decode.
    reserved_ids: Vec<ReceiptId>,
    header_store: Box<dyn SnapshotStore<ReceiptHeader>>,
    line_store: Box<dyn SnapshotStore<ReceiptLine>>,
}

impl ReceiptStore {
    /// Creates a store over already-loaded records.
    pub fn new(
        headers: Vec<ReceiptHeader>,
        lines: Vec<ReceiptLine>,
        header_store: Box<dyn SnapshotStore<ReceiptHeader>>,
        line_store: Box<dyn SnapshotStore<ReceiptLine>>,
    ) -> Self {
        let reserved_ids = header_store
            .retained_keys()
            .into_iter()
            .chain(line_store.retained_keys())
            .map(ReceiptId::from)
            .collect();

        ReceiptStore {
            headers,
            lines,
            reserved_ids,
            header_store,
            line_store,
        }
    }

    /// Loads headers and lines from their stores.
    pub fn load(
        header_store: Box<dyn SnapshotStore<ReceiptHeader>>,
        line_store: Box<dyn SnapshotStore<ReceiptLine>>,
    ) -> StoreResult<Self> {
        let headers = header_store.load()?;
        let lines = line_store.load()?;

        let store = ReceiptStore::new(headers, lines, header_store, line_store);
        info!(
            receipts = store.headers.len(),
            lines = store.lines.len(),
            reserved = store.reserved_ids.len(),
            "Receipt store loaded"
        );
        Ok(store)
    }

    /// The id the next recorded receipt will get.
    ///
    /// Every id present in either file counts, including lines whose header
    /// is missing and rows that did not decode, so a new receipt never
    /// shares an id with lines already on disk.
    pub fn next_receipt_id(&self) -> ReceiptId {
        next_receipt_id(
            self.headers
                .iter()
                .map(|h| &h.receipt_id)
                .chain(self.lines.iter().map(|l| &l.receipt_id))
                .chain(self.reserved_ids.iter()),
        )
    }

    /// Records a sale and persists both files.
    ///
    /// ## Arguments
    /// * `customer_id` - Customer the receipt belongs to
    /// * `date` - Sale date
    /// * `lines` - Frozen sale lines (name and unit price at checkout)
    ///
    /// ## Returns
    /// The allocated receipt id.
    pub fn record(
        &mut self,
        customer_id: &str,
        date: NaiveDate,
        lines: &[SaleLine],
    ) -> StoreResult<ReceiptId> {
        if lines.is_empty() {
            return Err(CoreError::EmptyReceipt.into());
        }

        let receipt_id = self.next_receipt_id();
        let receipt_lines: Vec<ReceiptLine> = lines
            .iter()
            .map(|line| ReceiptLine::from_sale_line(receipt_id.clone(), line))
            .collect();
        let total_amount: Money = receipt_lines.iter().map(|line| line.line_total).sum();

        debug!(
            receipt_id = %receipt_id,
            customer_id,
            lines = receipt_lines.len(),
            total = %total_amount,
            "Recording receipt"
        );

        self.headers.push(ReceiptHeader {
            receipt_id: receipt_id.clone(),
            customer_id: customer_id.to_string(),
            date,
            total_amount,
        });
        self.lines.extend(receipt_lines);

        self.header_store.save(&self.headers)?;
        self.line_store.save(&self.lines)?;

        info!(receipt_id = %receipt_id, total = %total_amount, "Receipt saved");
        Ok(receipt_id)
    }

    /// Headers dated `date`, in recording order.
    pub fn headers_by_date(&self, date: NaiveDate) -> Vec<&ReceiptHeader> {
        self.headers.iter().filter(|h| h.date == date).collect()
    }

    /// Headers for `customer_id`, in recording order.
    pub fn headers_by_customer(&self, customer_id: &str) -> Vec<&ReceiptHeader> {
        self.headers
            .iter()
            .filter(|h| h.customer_id == customer_id)
            .collect()
    }

    /// Lines belonging to `receipt_id`.
    pub fn lines_by_receipt_id(&self, receipt_id: &str) -> Vec<&ReceiptLine> {
        self.lines
            .iter()
            .filter(|line| line.receipt_id == receipt_id)
            .collect()
    }

    pub fn header(&self, receipt_id: &str) -> Option<&ReceiptHeader> {
        self.headers.iter().find(|h| h.receipt_id == receipt_id)
    }

    pub fn headers(&self) -> &[ReceiptHeader] {
        &self.headers
    }

    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::snapshot::MemorySnapshot;

    struct Fixture {
        store: ReceiptStore,
        headers: MemorySnapshot<ReceiptHeader>,
        lines: MemorySnapshot<ReceiptLine>,
    }

    fn fixture() -> Fixture {
        let headers = MemorySnapshot::<ReceiptHeader>::new();
        let lines = MemorySnapshot::<ReceiptLine>::new();
        let store = ReceiptStore::load(Box::new(headers.clone()), Box::new(lines.clone())).unwrap();
        Fixture {
            store,
            headers,
            lines,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sale(item_id: &str, quantity: i64, cents: i64) -> SaleLine {
        SaleLine {
            item_id: item_id.to_string(),
            item_name: format!("Item {item_id}"),
            quantity,
            unit_price: Money::from_cents(cents),
        }
    }

    fn header(id: &str, customer_id: &str) -> ReceiptHeader {
        ReceiptHeader {
            receipt_id: ReceiptId::from(id),
            customer_id: customer_id.to_string(),
            date: day(1),
            total_amount: Money::zero(),
        }
    }

    #[test]
    fn test_empty_store_allocates_r001() {
        let f = fixture();
        assert_eq!(f.store.next_receipt_id(), "R001");
    }

    #[test]
    fn test_next_id_after_gap() {
        let store = ReceiptStore::new(
            vec![header("R001", "1"), header("R003", "2")],
            Vec::new(),
            Box::new(MemorySnapshot::<ReceiptHeader>::new()),
            Box::new(MemorySnapshot::<ReceiptLine>::new()),
        );
        assert_eq!(store.next_receipt_id(), "R004");
    }

    #[test]
    fn test_lines_without_header_still_hold_their_id() {
        let orphan = ReceiptLine::from_sale_line(ReceiptId::from("R005"), &sale("101", 1, 1000));
        let mut store = ReceiptStore::new(
            vec![header("R001", "1")],
            vec![orphan],
            Box::new(MemorySnapshot::<ReceiptHeader>::new()),
            Box::new(MemorySnapshot::<ReceiptLine>::new()),
        );

        assert_eq!(store.next_receipt_id(), "R006");

        let id = store.record("1", day(9), &[sale("102", 2, 500)]).unwrap();
        assert_eq!(id, "R006");
        assert_eq!(store.lines_by_receipt_id("R006").len(), 1);
        assert_eq!(store.header("R006").unwrap().total_amount, Money::from_cents(1000));
    }

    #[test]
    fn test_record_writes_header_and_lines() {
        let mut f = fixture();

        let id = f
            .store
            .record("1", day(9), &[sale("101", 3, 1000), sale("102", 1, 5000)])
            .unwrap();

        assert_eq!(id, "R001");
        let header = f.store.header("R001").unwrap();
        assert_eq!(header.total_amount, Money::from_cents(8000));
        assert_eq!(header.customer_id, "1");

        let lines = f.store.lines_by_receipt_id("R001");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_total, Money::from_cents(3000));

        assert_eq!(f.headers.len(), 1);
        assert_eq!(f.lines.len(), 2);
        assert_eq!(f.store.next_receipt_id(), "R002");
    }

    #[test]
    fn test_header_total_matches_lines() {
        let mut f = fixture();
        f.store.record("1", day(9), &[sale("101", 2, 999)]).unwrap();
        f.store
            .record("2", day(9), &[sale("103", 7, 550), sale("104", 1, 300)])
            .unwrap();

        for header in f.store.headers() {
            let sum: Money = f
                .store
                .lines_by_receipt_id(header.receipt_id.as_str())
                .iter()
                .map(|line| line.line_total)
                .sum();
            assert_eq!(header.total_amount, sum);
        }
    }

    #[test]
    fn test_record_without_lines_is_rejected() {
        let mut f = fixture();

        let err = f.store.record("1", day(9), &[]).unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::EmptyReceipt)));
        assert_eq!(f.store.next_receipt_id(), "R001");
        assert!(f.headers.is_empty());
    }

    #[test]
    fn test_queries() {
        let mut f = fixture();
        f.store.record("1", day(9), &[sale("101", 1, 1000)]).unwrap();
        f.store.record("2", day(9), &[sale("102", 1, 5000)]).unwrap();
        f.store.record("1", day(10), &[sale("103", 1, 500)]).unwrap();

        assert_eq!(f.store.headers_by_date(day(9)).len(), 2);
        assert_eq!(f.store.headers_by_date(day(11)).len(), 0);

        let ids: Vec<_> = f
            .store
            .headers_by_customer("1")
            .iter()
            .map(|h| h.receipt_id.to_string())
            .collect();
        assert_eq!(ids, vec!["R001", "R003"]);

        assert!(f.store.header("R999").is_none());
        assert!(f.store.lines_by_receipt_id("R999").is_empty());
    }

    #[test]
    fn test_failed_line_save_keeps_memory_append() {
        let mut f = fixture();
        f.lines.set_fail_writes(true);

        let err = f.store.record("1", day(9), &[sale("101", 1, 1000)]).unwrap_err();

        assert!(matches!(err, StoreError::Persistence { .. }));
        // Header file was written before the line save failed.
        assert_eq!(f.headers.len(), 1);
        assert!(f.lines.is_empty());
        assert_eq!(f.store.headers().len(), 1);
        assert_eq!(f.store.next_receipt_id(), "R002");
    }
}
