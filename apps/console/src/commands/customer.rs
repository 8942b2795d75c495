//! # Customer Commands
//!
//! Directory lookups, registration and choosing who the next receipt
//! is for.

use std::io::Write;

use tracing::{debug, info};

use tally_core::validation::validate_search_query;
use tally_core::Customer;

use crate::error::{ConsoleError, ConsoleResult};
use crate::render;
use crate::state::App;

/// Prints customers whose id, name, phone or email contains `query`.
pub fn search_customers(app: &App, out: &mut impl Write, query: &str) -> ConsoleResult<()> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_customers command");

    render::write_customers(out, app.storage.directory().search(&query))?;
    Ok(())
}

/// Prints the whole directory.
pub fn list_customers(app: &App, out: &mut impl Write) -> ConsoleResult<()> {
    render::write_customers(out, app.storage.directory().all())?;
    Ok(())
}

/// Registers a customer. Only the name is required.
///
/// ## Returns
/// The stored customer, with its newly allocated id
pub fn add_customer(
    app: &mut App,
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
) -> ConsoleResult<Customer> {
    debug!(name, "add_customer command");

    let customer = app
        .storage
        .directory_mut()
        .add_customer(name, phone, email, address)?;
    Ok(customer.clone())
}

/// Makes `customer_id` the customer for the following receipts.
///
/// The cart is kept when the selection changes.
pub fn select_customer(app: &mut App, customer_id: &str) -> ConsoleResult<Customer> {
    let customer_id = customer_id.trim();

    let customer = app
        .storage
        .directory()
        .find_by_id(customer_id)
        .cloned()
        .ok_or_else(|| ConsoleError::not_found("Customer", customer_id))?;

    info!(customer_id, name = %customer.name, "Customer selected");
    app.session.select_customer(customer.clone());
    Ok(customer)
}
