//! # Report Commands

use std::io::Write;

use chrono::NaiveDate;
use tracing::debug;

use tally_core::validation::parse_date;
use tally_core::CoreError;

use crate::error::ConsoleResult;
use crate::render;
use crate::reports;
use crate::state::App;

/// Prints the sales of one day.
///
/// ## Arguments
/// * `date` - `YYYY-MM-DD` as typed; blank means `today`
pub fn daily_sales(
    app: &App,
    out: &mut impl Write,
    date: &str,
    today: NaiveDate,
) -> ConsoleResult<()> {
    let date = match date.trim() {
        "" => today,
        text => parse_date(text)?,
    };
    debug!(date = %date, "daily_sales command");

    let report = reports::daily_sales(app.storage.receipts(), date);
    render::write_daily_sales(out, &report, &app.config)?;
    Ok(())
}

/// Prints every purchase of the selected customer.
pub fn customer_history(app: &App, out: &mut impl Write) -> ConsoleResult<()> {
    let customer = app.session.customer().ok_or(CoreError::NoCustomerSelected)?;
    debug!(customer_id = %customer.id, "customer_history command");

    let history = reports::customer_history(app.storage.receipts(), &customer.id);
    render::write_purchase_history(out, customer, &history, &app.config)?;
    Ok(())
}

/// Prints quantity and revenue per item, best sellers first.
pub fn item_summary(app: &App, out: &mut impl Write) -> ConsoleResult<()> {
    let summary = reports::item_summary(app.storage.receipts());
    render::write_item_summary(out, &summary, &app.config)?;
    Ok(())
}
