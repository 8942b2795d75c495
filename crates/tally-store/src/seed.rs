//! # Sample Data
//!
//! Populates a fresh data directory so the console is usable on first run.
//!
//! ## What Gets Created
//! ```text
//! data dir (created if absent)
//! ├── items.txt            ← 10 stationery items, only if missing
//! ├── customers.txt        ← 10 customers, only if missing
//! ├── receipts.txt         ← header comment only, if missing
//! └── receipt_details.txt  ← header comment only, if missing
//! ```
//! Existing files are never touched.

use tracing::info;

use tally_core::{Customer, Item, Money};

use crate::codec::FlatRecord;
use crate::error::StoreResult;
use crate::flat_file::FlatFile;
use crate::snapshot::SnapshotStore;

/// (id, name, price in cents, stock)
const SAMPLE_ITEMS: &[(&str, &str, i64, i64)] = &[
    ("101", "Pen", 1000, 100),
    ("102", "Notebook", 5000, 200),
    ("103", "Pencil", 500, 150),
    ("104", "Eraser", 300, 80),
    ("105", "Ruler", 1500, 60),
    ("106", "Calculator", 25000, 25),
    ("107", "Stapler", 12000, 40),
    ("108", "Paper Pack", 8000, 75),
    ("109", "Marker", 2500, 90),
    ("110", "Folder", 2000, 120),
];

/// (id, name, phone, address); email is derived from the name.
const SAMPLE_CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("1", "Rahul", "9876543210", "Patan"),
    ("2", "Priya", "9876543211", "Ahmedabad"),
    ("3", "Amit", "9876543212", "Gandhinagar"),
    ("4", "Sita", "9876543213", "Rajkot"),
    ("5", "Ravi", "9876543214", "Surat"),
    ("6", "Neha", "9876543215", "Vadodara"),
    ("7", "Kiran", "9876543216", "Bhavnagar"),
    ("8", "Maya", "9876543217", "Junagadh"),
    ("9", "Dev", "9876543218", "Anand"),
    ("10", "Asha", "9876543219", "Mehsana"),
];

/// The sample catalog.
pub fn sample_items() -> Vec<Item> {
    SAMPLE_ITEMS
        .iter()
        .map(|&(id, name, cents, stock)| Item::new(id, name, Money::from_cents(cents), stock))
        .collect()
}

/// The sample customer directory.
pub fn sample_customers() -> Vec<Customer> {
    SAMPLE_CUSTOMERS
        .iter()
        .map(|&(id, name, phone, address)| Customer {
            id: id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: address.to_string(),
        })
        .collect()
}

/// Writes `records` to `file` if it does not exist yet.
///
/// Returns whether the file was created.
pub fn ensure_file<T: FlatRecord>(file: &FlatFile<T>, records: &[T]) -> StoreResult<bool> {
    if file.exists() {
        return Ok(false);
    }

    file.save(records)?;
    info!(
        path = %file.path().display(),
        count = records.len(),
        "Created data file"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_shape() {
        let items = sample_items();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0], Item::new("101", "Pen", Money::from_cents(1000), 100));
        assert_eq!(items[9].name, "Folder");

        let customers = sample_customers();
        assert_eq!(customers.len(), 10);
        assert_eq!(customers[0].email, "rahul@example.com");
        assert_eq!(customers[9].phone, "9876543219");
    }

    #[test]
    fn test_ensure_file_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::<Item>::new(dir.path().join("items.txt"));

        assert!(ensure_file(&file, &sample_items()).unwrap());
        assert!(!ensure_file(&file, &[]).unwrap());
        assert_eq!(file.load().unwrap().len(), 10);
    }
}
