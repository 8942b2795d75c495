//! # Flat Record Codec
//!
//! Maps each record type to one comma-separated row.
//!
//! ## File Layouts
//! ```text
//! items.txt            # ItemID, ItemName, Price, Stock
//!                      101,Pen,10.00,100
//!
//! customers.txt        # CustID, Name, Phone, Email, Address
//!                      1,Rahul,9876543210,rahul@example.com,Patan
//!
//! receipts.txt         # ReceiptID, CustID, Date, TotalAmount
//!                      R001,1,2024-03-09,30.00
//!
//! receipt_details.txt  # ReceiptID, ItemID, ItemName, Quantity, Price, Total
//!                      R001,101,Pen,3,10.00,30.00
//!                      R002,102,Notebook,1,50.00        ← total may be absent
//! ```
//!
//! Rows shorter than [`FlatRecord::MIN_FIELDS`] are skipped; extra trailing
//! fields are ignored.

use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;

use tally_core::{Customer, Item, Money, ReceiptHeader, ReceiptId, ReceiptLine};

/// A record stored as one delimited row.
///
/// Rows are written through the record's `Serialize` impl. The default
/// [`FlatRecord::decode`] reads the first `MIN_FIELDS` fields through
/// `Deserialize`.
pub trait FlatRecord: Serialize + DeserializeOwned {
    /// Comment line written at the top of the file.
    const HEADER: &'static str;

    /// Fewest fields a row must have to be decoded.
    const MIN_FIELDS: usize;

    /// Decodes a trimmed row that has at least `MIN_FIELDS` fields.
    fn decode(row: &StringRecord) -> Result<Self, String> {
        let mut row = row.clone();
        row.truncate(Self::MIN_FIELDS);
        row.deserialize(None).map_err(|e| e.to_string())
    }
}

impl FlatRecord for Item {
    const HEADER: &'static str = "# ItemID, ItemName, Price, Stock";
    const MIN_FIELDS: usize = 4;
}

impl FlatRecord for Customer {
    const HEADER: &'static str = "# CustID, Name, Phone, Email, Address";
    const MIN_FIELDS: usize = 5;
}

impl FlatRecord for ReceiptHeader {
    const HEADER: &'static str = "# ReceiptID, CustID, Date, TotalAmount";
    const MIN_FIELDS: usize = 4;
}

impl FlatRecord for ReceiptLine {
    const HEADER: &'static str = "# ReceiptID, ItemID, ItemName, Quantity, Price, Total";
    const MIN_FIELDS: usize = 5;

    /// The sixth field (line total) is optional and falls back to
    /// price × quantity.
    fn decode(row: &StringRecord) -> Result<Self, String> {
        let field = |index: usize| row.get(index).unwrap_or("");

        let quantity: i64 = field(3)
            .parse()
            .map_err(|_| format!("invalid quantity '{}'", field(3)))?;
        let price: Money = field(4).parse().map_err(|e| format!("price: {e}"))?;
        let line_total = match row.get(5).filter(|total| !total.is_empty()) {
            Some(total) => total.parse().map_err(|e| format!("total: {e}"))?,
            None => price.multiply_quantity(quantity),
        };

        Ok(ReceiptLine {
            receipt_id: ReceiptId::from(field(0)),
            item_id: field(1).to_string(),
            item_name: field(2).to_string(),
            quantity,
            price,
            line_total,
        })
    }
}
