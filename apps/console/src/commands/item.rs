//! # Item Commands
//!
//! Catalog browsing and the cart operations reached from the item menu.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Receipt  │                        │
//! │  │  Cart    │     │          │     │ recorded │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                 │                              │
//! │                   add_to_cart       generate_receipt                   │
//! │                   update_cart_quantity (billing.rs)                    │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart (billing.rs) ────────►                    │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every quantity is checked against the live catalog stock.

use std::io::Write;

use tracing::debug;

use tally_core::validation::{parse_integer, validate_search_query};
use tally_core::{CartLine, Item, Money};

use crate::error::ConsoleResult;
use crate::render;
use crate::state::App;

/// Prints items whose id or name contains `query`.
///
/// ## Arguments
/// * `query` - Search text (case-insensitive, empty lists everything)
pub fn search_items(app: &App, out: &mut impl Write, query: &str) -> ConsoleResult<()> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_items command");

    let items = app.storage.catalog().search(&query);
    render::write_items(out, items, &app.config)?;
    Ok(())
}

/// Prints the whole catalog.
pub fn list_items(app: &App, out: &mut impl Write) -> ConsoleResult<()> {
    render::write_items(out, app.storage.catalog().all(), &app.config)?;
    Ok(())
}

/// Adds a new item to the catalog and saves it.
///
/// ## Arguments
/// * `price` - Decimal text as typed ("10", "49.99")
/// * `stock` - Whole number as typed
///
/// ## Returns
/// The stored item
pub fn add_item(
    app: &mut App,
    id: &str,
    name: &str,
    price: &str,
    stock: &str,
) -> ConsoleResult<Item> {
    let price: Money = price.trim().parse()?;
    let stock = parse_integer("stock", stock)?;
    debug!(id, name, price = %price, stock, "add_item command");

    let item = app.storage.catalog_mut().add_item(id, name, price, stock)?;
    Ok(item.clone())
}

/// Adds `quantity` of an item to the cart.
///
/// ## Behavior
/// - If the item is already in the cart: quantity increases
/// - If not: a new line is added
/// - The combined quantity may not exceed the catalog stock
///
/// ## Returns
/// The cart line after the change
pub fn add_to_cart(app: &mut App, item_id: &str, quantity: &str) -> ConsoleResult<CartLine> {
    let item_id = item_id.trim();
    let quantity = parse_integer("quantity", quantity)?;
    debug!(item_id, quantity, "add_to_cart command");

    app.session
        .cart
        .add(app.storage.catalog(), item_id, quantity)?;

    Ok(CartLine {
        item_id: item_id.to_string(),
        quantity: app.session.cart.quantity_of(item_id).unwrap_or(quantity),
    })
}

/// Sets the quantity of a cart line. Zero or less removes the line.
pub fn update_cart_quantity(app: &mut App, item_id: &str, quantity: &str) -> ConsoleResult<()> {
    let item_id = item_id.trim();
    let quantity = parse_integer("quantity", quantity)?;
    debug!(item_id, quantity, "update_cart_quantity command");

    app.session
        .cart
        .set_quantity(app.storage.catalog(), item_id, quantity)?;
    Ok(())
}

/// Removes an item's line from the cart.
///
/// ## Returns
/// `false` if the item wasn't in the cart
pub fn remove_from_cart(app: &mut App, item_id: &str) -> bool {
    let item_id = item_id.trim();
    debug!(item_id, "remove_from_cart command");
    app.session.cart.remove(item_id)
}
