//! # Checkout
//!
//! Turns the cart into a recorded receipt.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(customer, cart, catalog, receipts, date)                      │
//! │                                                                         │
//! │  customer == None ──────────────► NoCustomerSelected                   │
//! │  cart.is_empty() ───────────────► EmptyCart                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart.sale_lines(catalog)         name + price frozen here              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipts.record(customer.id, date, lines) ──► Err? cart untouched     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart.clear() ──► Ok(receipt_id)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog stock is not decremented here.

use chrono::NaiveDate;
use tracing::{info, warn};

use tally_core::{Cart, CoreError, Customer, ItemLookup, ReceiptId};

use crate::error::StoreResult;
use crate::repository::ReceiptStore;

/// Records the cart as a receipt for `customer` and empties the cart.
///
/// On any error the cart is left exactly as it was.
pub fn checkout<C>(
    customer: Option<&Customer>,
    cart: &mut Cart,
    catalog: &C,
    receipts: &mut ReceiptStore,
    date: NaiveDate,
) -> StoreResult<ReceiptId>
where
    C: ItemLookup + ?Sized,
{
    let customer = customer.ok_or(CoreError::NoCustomerSelected)?;

    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let lines = cart.sale_lines(catalog)?;

    let receipt_id = match receipts.record(&customer.id, date, &lines) {
        Ok(id) => id,
        Err(err) => {
            warn!(customer_id = %customer.id, error = %err, "Checkout failed, cart kept");
            return Err(err);
        }
    };

    cart.clear();

    info!(
        receipt_id = %receipt_id,
        customer_id = %customer.id,
        lines = lines.len(),
        "Checkout complete"
    );
    Ok(receipt_id)
}
