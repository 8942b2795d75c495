//! # Billing Commands
//!
//! Viewing the cart, checking out and printing receipts.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Generate Receipt                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generate_receipt(app, date)                                           │
//! │       │  customer selected?  cart non-empty?                           │
//! │       │  lines frozen, receipts.txt + receipt_details.txt written      │
//! │       ▼                                                                 │
//! │  session.last_receipt = { R004, $30.00 }   cart emptied                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  print_receipt(app, out, "R004", now)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use tally_core::ReceiptId;

use crate::error::{ConsoleError, ConsoleResult};
use crate::render;
use crate::state::{App, LastReceipt};

/// Prints the cart with live names and prices.
pub fn view_cart(app: &App, out: &mut impl Write) -> ConsoleResult<()> {
    render::write_cart(out, &app.session.cart, app.storage.catalog(), &app.config)?;
    Ok(())
}

/// Records the cart as a receipt for the selected customer.
///
/// On failure the cart and selection are unchanged.
///
/// ## Returns
/// The new receipt id
pub fn generate_receipt(app: &mut App, date: NaiveDate) -> ConsoleResult<ReceiptId> {
    debug!(date = %date, lines = app.session.cart.len(), "generate_receipt command");

    let App {
        storage, session, ..
    } = app;

    let receipt_id = storage.checkout_on(session.customer.as_ref(), &mut session.cart, date)?;
    let total = storage
        .receipts()
        .header(receipt_id.as_str())
        .map(|header| header.total_amount)
        .unwrap_or_default();

    info!(receipt_id = %receipt_id, total = %total, "Receipt generated");

    session.last_receipt = Some(LastReceipt {
        receipt_id: receipt_id.clone(),
        total,
    });
    Ok(receipt_id)
}

/// Prints a stored receipt.
///
/// The date comes from the receipt; the time is `printed_at`.
pub fn print_receipt(
    app: &App,
    out: &mut impl Write,
    receipt_id: &str,
    printed_at: NaiveDateTime,
) -> ConsoleResult<()> {
    let receipts = app.storage.receipts();
    let header = receipts
        .header(receipt_id)
        .ok_or_else(|| ConsoleError::not_found("Receipt", receipt_id))?;
    let lines = receipts.lines_by_receipt_id(receipt_id);
    let customer = app.storage.directory().find_by_id(&header.customer_id);

    render::write_receipt(out, &app.config, header, customer, &lines, printed_at)?;
    Ok(())
}

/// Empties the cart.
///
/// ## Returns
/// Number of lines removed
pub fn clear_cart(app: &mut App) -> usize {
    let removed = app.session.cart.len();
    app.session.cart.clear();
    debug!(removed, "clear_cart command");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{customer, item};
    use crate::error::ErrorCode;
    use crate::state::AppConfig;
    use std::path::PathBuf;
    use tally_core::Money;
    use tally_store::seed::{sample_customers, sample_items};
    use tally_store::Storage;

    fn app() -> App {
        let config = AppConfig {
            data_dir: PathBuf::from("data"),
            ..AppConfig::default()
        };
        App::new(Storage::in_memory(sample_items(), sample_customers()), config)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_generate_receipt_updates_session() {
        let mut app = app();
        customer::select_customer(&mut app, "1").unwrap();
        item::add_to_cart(&mut app, "101", "3").unwrap();
        item::add_to_cart(&mut app, "104", "1").unwrap();

        let id = generate_receipt(&mut app, date()).unwrap();

        assert_eq!(id, "R001");
        assert!(app.session.cart.is_empty());
        assert_eq!(
            app.session.last_receipt,
            Some(LastReceipt {
                receipt_id: ReceiptId::from("R001"),
                total: Money::from_cents(3300),
            })
        );
        // Selection survives checkout.
        assert!(app.session.customer().is_some());
    }

    #[test]
    fn test_generate_receipt_needs_customer_and_items() {
        let mut app = app();
        item::add_to_cart(&mut app, "101", "1").unwrap();

        let err = generate_receipt(&mut app, date()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(err.message, "Please select a customer first!");
        assert_eq!(app.session.cart.len(), 1);

        customer::select_customer(&mut app, "1").unwrap();
        clear_cart(&mut app);

        let err = generate_receipt(&mut app, date()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert!(app.storage.receipts().headers().is_empty());
    }

    #[test]
    fn test_print_receipt() {
        let mut app = app();
        customer::select_customer(&mut app, "2").unwrap();
        item::add_to_cart(&mut app, "102", "2").unwrap();
        let id = generate_receipt(&mut app, date()).unwrap();

        let mut out = Vec::new();
        let printed_at = date().and_hms_opt(9, 30, 0).unwrap();
        print_receipt(&app, &mut out, id.as_str(), printed_at).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Customer: Priya"));
        assert!(text.contains("Notebook"));
        assert!(text.contains("TOTAL AMOUNT: $100.00"));

        let err = print_receipt(&app, &mut Vec::new(), "R999", printed_at).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
