//! End-to-end checkout against real files in a scratch directory.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tally_core::{Cart, CoreError, Money};
use tally_store::storage::{RECEIPTS_FILE, RECEIPT_LINES_FILE};
use tally_store::{StoreConfig, StoreError, Storage};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

/// One item (101 Pen at 10.00, stock 5) and one customer ("1").
fn single_item_store(dir: &Path) -> StoreConfig {
    fs::write(
        dir.join("items.txt"),
        "# ItemID, ItemName, Price, Stock\n101, Pen, 10.0, 5\n",
    )
    .unwrap();
    fs::write(
        dir.join("customers.txt"),
        "# CustID, Name, Phone, Email, Address\n1, Rahul, 9876543210, rahul@example.com, Patan\n",
    )
    .unwrap();
    StoreConfig::new(dir).seed_sample_data(false)
}

#[test]
fn checkout_writes_both_files_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = single_item_store(dir.path());

    let mut storage = Storage::open(config.clone()).unwrap();
    let customer = storage.directory().find_by_id("1").cloned();

    let mut cart = Cart::new();
    cart.add(storage.catalog(), "101", 3).unwrap();
    assert_eq!(cart.total(storage.catalog()), Money::from_cents(3000));

    let id = storage.checkout_on(customer.as_ref(), &mut cart, date()).unwrap();

    assert_eq!(id, "R001");
    assert!(cart.is_empty());

    let headers = fs::read_to_string(dir.path().join(RECEIPTS_FILE)).unwrap();
    assert_eq!(
        headers,
        "# ReceiptID, CustID, Date, TotalAmount\nR001,1,2024-03-09,30.00\n"
    );
    let lines = fs::read_to_string(dir.path().join(RECEIPT_LINES_FILE)).unwrap();
    assert_eq!(
        lines,
        "# ReceiptID, ItemID, ItemName, Quantity, Price, Total\nR001,101,Pen,3,10.00,30.00\n"
    );

    // Stock is untouched by checkout.
    assert_eq!(storage.catalog().find_by_id("101").unwrap().stock, 5);

    let reopened = Storage::open(config).unwrap();
    assert_eq!(reopened.receipts().headers().len(), 1);
    assert_eq!(reopened.receipts().lines_by_receipt_id("R001").len(), 1);
    assert_eq!(reopened.receipts().next_receipt_id(), "R002");
}

#[test]
fn checkout_without_customer_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = Storage::open(single_item_store(dir.path())).unwrap();

    let mut cart = Cart::new();
    cart.add(storage.catalog(), "101", 2).unwrap();

    let err = storage.checkout_on(None, &mut cart, date()).unwrap_err();

    assert!(matches!(err, StoreError::Core(CoreError::NoCustomerSelected)));
    assert_eq!(cart.quantity_of("101"), Some(2));
    assert!(storage.receipts().headers().is_empty());
}

#[test]
fn adding_beyond_stock_leaves_cart_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(single_item_store(dir.path())).unwrap();

    let mut cart = Cart::new();
    let err = cart.add(storage.catalog(), "101", 10).unwrap_err();

    assert!(matches!(err, CoreError::InsufficientStock { .. }));
    assert!(cart.is_empty());
}

#[test]
fn receipt_ids_continue_after_hand_edited_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = single_item_store(dir.path());
    fs::write(
        dir.path().join(RECEIPTS_FILE),
        "# ReceiptID, CustID, Date, TotalAmount\n\
         R001, 1, 2024-03-01, 10.0\n\
         R003, 1, 2024-03-02, 20.0\n\
         Rxx, 1, 2024-03-02, 5.0\n\
         R004, 1\n",
    )
    .unwrap();

    let mut storage = Storage::open(config).unwrap();
    assert_eq!(storage.receipts().headers().len(), 3);

    let customer = storage.directory().find_by_id("1").cloned();
    let mut cart = Cart::new();
    cart.add(storage.catalog(), "101", 1).unwrap();

    let id = storage.checkout_on(customer.as_ref(), &mut cart, date()).unwrap();
    assert_eq!(id, "R004");
}

#[test]
fn undecodable_receipt_rows_keep_their_ids_and_survive_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = single_item_store(dir.path());
    fs::write(
        dir.path().join(RECEIPTS_FILE),
        "# ReceiptID, CustID, Date, TotalAmount\n\
         R001, 1, 09/03/2024, 20.0\n\
         R002, 1, 2024-03-09, twenty\n\
         R003, 1, 2024-03-09, 10.0\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(RECEIPT_LINES_FILE),
        "# ReceiptID, ItemID, ItemName, Quantity, Price, Total\n\
         R001, 101, Pen, 2, 10.0, 20.0\n\
         R002, 101, Pen, 2, 10.0\n\
         R003, 101, Pen, 1, 10.0, 10.0\n",
    )
    .unwrap();

    let mut storage = Storage::open(config.clone()).unwrap();
    assert_eq!(storage.receipts().headers().len(), 1);
    assert_eq!(storage.receipts().next_receipt_id(), "R004");

    let customer = storage.directory().find_by_id("1").cloned();
    let mut cart = Cart::new();
    cart.add(storage.catalog(), "101", 1).unwrap();
    let id = storage.checkout_on(customer.as_ref(), &mut cart, date()).unwrap();
    assert_eq!(id, "R004");

    let headers = fs::read_to_string(dir.path().join(RECEIPTS_FILE)).unwrap();
    assert!(headers.contains("R001,1,09/03/2024,20.0\n"));
    assert!(headers.contains("R002,1,2024-03-09,twenty\n"));
    assert!(headers.contains("R003,1,2024-03-09,10.00\n"));
    assert!(headers.contains("R004,1,2024-03-09,10.00\n"));

    let mut ids: Vec<&str> = headers
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split(',').next())
        .collect();
    let written = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), written);

    let reopened = Storage::open(config).unwrap();
    let receipts = reopened.receipts();
    assert_eq!(receipts.headers().len(), 2);
    for header in receipts.headers() {
        let sum: Money = receipts
            .lines_by_receipt_id(header.receipt_id.as_str())
            .iter()
            .map(|line| line.line_total)
            .sum();
        assert_eq!(header.total_amount, sum, "receipt {}", header.receipt_id);
    }
    assert_eq!(receipts.next_receipt_id(), "R005");
}
