//! # Rendering
//!
//! Text output for the console: tables for items, customers, the cart,
//! receipts and reports. Every function writes to any `io::Write`, so
//! tests render into a `Vec<u8>`.
//!
//! Amounts always go through [`AppConfig::format_currency`].

use std::io::{self, Write};

use chrono::NaiveDateTime;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};
use tally_core::{Cart, Customer, Item, ItemLookup, ReceiptHeader, ReceiptLine};

use crate::reports::{DailySales, ItemSummary, PurchaseHistory};
use crate::state::AppConfig;

/// Width of banners and separators.
pub const WIDTH: usize = 50;

// =============================================================================
// Helpers
// =============================================================================

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}

/// Builds the table and right-aligns `numeric` columns.
fn write_table(
    out: &mut impl Write,
    builder: Builder,
    numeric: std::ops::Range<usize>,
) -> io::Result<()> {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "{table}")
}

// =============================================================================
// Catalog & Directory
// =============================================================================

pub fn write_items<'a>(
    out: &mut impl Write,
    items: impl IntoIterator<Item = &'a Item>,
    config: &AppConfig,
) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Item ID", "Item Name", "Price", "Stock"]);

    let mut count = 0;
    for item in items {
        builder.push_record([
            item.id.clone(),
            item.name.clone(),
            config.format_currency(item.price),
            item.stock.to_string(),
        ]);
        count += 1;
    }

    if count == 0 {
        return writeln!(out, "No items found.");
    }
    write_table(out, builder, 2..4)
}

pub fn write_customers<'a>(
    out: &mut impl Write,
    customers: impl IntoIterator<Item = &'a Customer>,
) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Phone", "Email", "Address"]);

    let mut count = 0;
    for customer in customers {
        builder.push_record([
            customer.id.as_str(),
            customer.name.as_str(),
            customer.phone.as_str(),
            customer.email.as_str(),
            customer.address.as_str(),
        ]);
        count += 1;
    }

    if count == 0 {
        return writeln!(out, "No customers found.");
    }
    write_table(out, builder, 0..1)
}

// =============================================================================
// Cart
// =============================================================================

/// Prints the cart with live catalog names and prices.
///
/// A line whose item has vanished from the catalog is shown without a
/// price and left out of the total.
pub fn write_cart<C>(
    out: &mut impl Write,
    cart: &Cart,
    catalog: &C,
    config: &AppConfig,
) -> io::Result<()>
where
    C: ItemLookup + ?Sized,
{
    if cart.is_empty() {
        return writeln!(out, "Cart is empty!");
    }

    let mut builder = Builder::default();
    builder.push_record(["Item ID", "Item Name", "Qty", "Price", "Total"]);

    for line in cart.lines() {
        match catalog.find_item(&line.item_id) {
            Some(item) => builder.push_record([
                line.item_id.clone(),
                item.name.clone(),
                line.quantity.to_string(),
                config.format_currency(item.price),
                config.format_currency(item.price.multiply_quantity(line.quantity)),
            ]),
            None => builder.push_record([
                line.item_id.clone(),
                "(no longer in catalog)".to_string(),
                line.quantity.to_string(),
                "-".to_string(),
                "-".to_string(),
            ]),
        }
    }

    writeln!(out, "\n--- CURRENT CART ---")?;
    write_table(out, builder, 2..5)?;
    writeln!(out, "Cart Total: {}", config.format_currency(cart.total(catalog)))
}

// =============================================================================
// Receipt
// =============================================================================

/// Prints a stored receipt.
///
/// ```text
/// ==================================================
///                  XYZ Retail Store
///                  CUSTOMER RECEIPT
/// ==================================================
/// Date: 2024-03-09            Time: 14:05:00
/// Receipt ID: R001
/// --------------------------------------------------
/// Customer: Rahul
/// ...
/// ```
pub fn write_receipt(
    out: &mut impl Write,
    config: &AppConfig,
    header: &ReceiptHeader,
    customer: Option<&Customer>,
    lines: &[&ReceiptLine],
    printed_at: NaiveDateTime,
) -> io::Result<()> {
    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "{:^width$}", config.store_name, width = WIDTH)?;
    writeln!(out, "{:^width$}", "CUSTOMER RECEIPT", width = WIDTH)?;
    writeln!(out, "{}", rule('='))?;
    writeln!(
        out,
        "Date: {:<22}Time: {}",
        header.date.format("%Y-%m-%d").to_string(),
        printed_at.format("%H:%M:%S")
    )?;
    writeln!(out, "Receipt ID: {}", header.receipt_id)?;
    writeln!(out, "{}", rule('-'))?;

    match customer {
        Some(c) => {
            writeln!(out, "Customer: {}", c.name)?;
            writeln!(out, "Phone: {}", c.phone)?;
            writeln!(out, "Email: {}", c.email)?;
        }
        None => writeln!(out, "Customer ID: {}", header.customer_id)?,
    }

    let mut builder = Builder::default();
    builder.push_record(["Item ID", "Item Name", "Qty", "Price", "Total"]);
    for line in lines {
        builder.push_record([
            line.item_id.clone(),
            line.item_name.clone(),
            line.quantity.to_string(),
            config.format_currency(line.price),
            config.format_currency(line.line_total),
        ]);
    }
    write_table(out, builder, 2..5)?;

    writeln!(out, "TOTAL AMOUNT: {}", config.format_currency(header.total_amount))?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "{:^width$}", "Thank you for shopping with us!", width = WIDTH)?;
    writeln!(out, "{}", rule('='))
}

// =============================================================================
// Reports
// =============================================================================

pub fn write_daily_sales(
    out: &mut impl Write,
    report: &DailySales<'_>,
    config: &AppConfig,
) -> io::Result<()> {
    writeln!(out, "\n--- DAILY SALES REPORT: {} ---", report.date)?;

    if report.receipts.is_empty() {
        return writeln!(out, "No sales recorded for {}.", report.date);
    }

    let mut builder = Builder::default();
    builder.push_record(["Receipt ID", "Customer ID", "Amount"]);
    for header in &report.receipts {
        builder.push_record([
            header.receipt_id.to_string(),
            header.customer_id.clone(),
            config.format_currency(header.total_amount),
        ]);
    }
    write_table(out, builder, 2..3)?;

    writeln!(out, "Total Transactions: {}", report.transactions())?;
    writeln!(out, "Total Sales: {}", config.format_currency(report.total_sales))?;
    writeln!(out, "Average Transaction: {}", config.format_currency(report.average()))
}

pub fn write_purchase_history(
    out: &mut impl Write,
    customer: &Customer,
    history: &PurchaseHistory<'_>,
    config: &AppConfig,
) -> io::Result<()> {
    writeln!(out, "\n--- PURCHASE HISTORY: {} ({}) ---", customer.name, customer.id)?;

    if history.receipts.is_empty() {
        return writeln!(out, "No purchases found for {}.", customer.name);
    }

    for past in &history.receipts {
        writeln!(
            out,
            "\nReceipt {} on {}: {}",
            past.header.receipt_id,
            past.header.date,
            config.format_currency(past.header.total_amount)
        )?;

        let mut builder = Builder::default();
        builder.push_record(["Item Name", "Qty", "Price", "Total"]);
        for line in &past.lines {
            builder.push_record([
                line.item_name.clone(),
                line.quantity.to_string(),
                config.format_currency(line.price),
                config.format_currency(line.line_total),
            ]);
        }
        write_table(out, builder, 1..4)?;
    }

    writeln!(out, "Total Purchases: {}", history.purchases())?;
    writeln!(out, "Total Spent: {}", config.format_currency(history.total_spent))
}

pub fn write_item_summary(
    out: &mut impl Write,
    summary: &ItemSummary,
    config: &AppConfig,
) -> io::Result<()> {
    writeln!(out, "\n--- ITEM SALES SUMMARY ---")?;

    if summary.rows.is_empty() {
        return writeln!(out, "No sales recorded yet.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Item ID", "Item Name", "Qty Sold", "Revenue"]);
    for row in &summary.rows {
        builder.push_record([
            row.item_id.clone(),
            row.item_name.clone(),
            row.quantity_sold.to_string(),
            config.format_currency(row.revenue),
        ]);
    }
    write_table(out, builder, 2..4)?;

    writeln!(out, "Total Items Sold: {}", summary.total_quantity)?;
    writeln!(out, "Total Revenue: {}", config.format_currency(summary.total_revenue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tally_core::{Money, ReceiptId};

    fn config() -> AppConfig {
        AppConfig {
            data_dir: PathBuf::from("data"),
            ..AppConfig::default()
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn catalog() -> Vec<Item> {
        vec![
            Item::new("101", "Pen", Money::from_cents(1000), 100),
            Item::new("102", "Bag", Money::from_cents(5000), 10),
        ]
    }

    #[test]
    fn test_items_table() {
        let items = catalog();
        let text = render(|out| write_items(out, &items, &config()));

        assert!(text.contains("Item Name"));
        assert!(text.contains("Pen"));
        assert!(text.contains("$50.00"));

        let none = render(|out| write_items(out, &Vec::<Item>::new(), &config()));
        assert_eq!(none, "No items found.\n");
    }

    #[test]
    fn test_cart_shows_live_prices_and_total() {
        let mut items = catalog();
        let mut cart = Cart::new();
        cart.add(&items, "101", 2).unwrap();
        cart.add(&items, "102", 1).unwrap();
        items[0].price = Money::from_cents(1200);

        let text = render(|out| write_cart(out, &cart, &items, &config()));

        assert!(text.contains("$24.00"));
        assert!(text.contains("Cart Total: $74.00"));
    }

    #[test]
    fn test_empty_cart() {
        let text = render(|out| write_cart(out, &Cart::new(), &catalog(), &config()));
        assert_eq!(text, "Cart is empty!\n");
    }

    #[test]
    fn test_receipt_layout() {
        let header = ReceiptHeader {
            receipt_id: ReceiptId::from("R001"),
            customer_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            total_amount: Money::from_cents(3000),
        };
        let line = ReceiptLine {
            receipt_id: ReceiptId::from("R001"),
            item_id: "101".to_string(),
            item_name: "Pen".to_string(),
            quantity: 3,
            price: Money::from_cents(1000),
            line_total: Money::from_cents(3000),
        };
        let customer = Customer {
            id: "1".to_string(),
            name: "Rahul".to_string(),
            phone: "9876543210".to_string(),
            email: "rahul@example.com".to_string(),
            address: "Patan".to_string(),
        };
        let printed_at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();

        let text = render(|out| {
            write_receipt(out, &config(), &header, Some(&customer), &[&line], printed_at)
        });

        let store = text.find("XYZ Retail Store").unwrap();
        let id = text.find("Receipt ID: R001").unwrap();
        let name = text.find("Customer: Rahul").unwrap();
        let total = text.find("TOTAL AMOUNT: $30.00").unwrap();
        let thanks = text.find("Thank you for shopping with us!").unwrap();
        assert!(store < id && id < name && name < total && total < thanks);
        assert!(text.contains("Time: 14:05:00"));
        assert!(text.contains("Email: rahul@example.com"));
    }
}
