//! # Cart
//!
//! The in-progress, not-yet-committed set of purchase lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Console Action           Cart Method              Cart Change          │
//! │  ──────────────           ───────────              ───────────          │
//! │                                                                         │
//! │  Add Item to Cart ───────► add() ─────────────────► push or merge       │
//! │                                                                         │
//! │  Update Quantity ────────► set_quantity() ────────► lines[i].qty = n    │
//! │                                                                         │
//! │  Remove Item ────────────► remove() ──────────────► lines.remove(i)     │
//! │                                                                         │
//! │  Generate Receipt ───────► sale_lines() + clear() (via checkout)        │
//! │                                                                         │
//! │  Every stock check re-reads the catalog through `ItemLookup`.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id (adding the same item merges)
//! - Every line quantity is > 0
//! - A mutation never leaves a line above the item's live stock
//! - A failed mutation leaves the cart exactly as it was

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemLookup, SaleLine};
use crate::validation::validate_quantity;

/// A pending purchase line.
///
/// Holds the item id only: name, price and stock are always looked up
/// again in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: String,
    pub quantity: i64,
}

/// The shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item to the cart or increases its quantity if already present.
    ///
    /// ## Errors
    /// - `Validation` if `quantity <= 0`
    /// - `NotFound` if the item is not in the catalog
    /// - `InsufficientStock` if the new line quantity would exceed live stock
    pub fn add<C>(&mut self, catalog: &C, item_id: &str, quantity: i64) -> CoreResult<()>
    where
        C: ItemLookup + ?Sized,
    {
        validate_quantity(quantity)?;

        let item = catalog
            .find_item(item_id)
            .ok_or_else(|| CoreError::not_found("Item", item_id))?;

        let in_cart = self.quantity_of(item_id).unwrap_or(0);
        let requested = in_cart.saturating_add(quantity);
        if !item.can_supply(requested) {
            return Err(CoreError::InsufficientStock {
                item_id: item_id.to_string(),
                available: item.stock,
                requested,
            });
        }

        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine {
                item_id: item_id.to_string(),
                quantity,
            }),
        }

        Ok(())
    }

    /// Removes the line for `item_id`.
    ///
    /// Returns whether a line was removed; a missing id is a no-op.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        self.lines.len() != initial_len
    }

    /// Overwrites the quantity of a line already in the cart.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: same as [`Cart::remove`]
    /// - Item has no cart line: `NotFound`
    /// - `new_quantity` above live stock: `InsufficientStock`
    pub fn set_quantity<C>(&mut self, catalog: &C, item_id: &str, new_quantity: i64) -> CoreResult<()>
    where
        C: ItemLookup + ?Sized,
    {
        if new_quantity <= 0 {
            self.remove(item_id);
            return Ok(());
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) else {
            return Err(CoreError::not_found("Cart line", item_id));
        };

        let available = catalog
            .current_stock(item_id)
            .ok_or_else(|| CoreError::not_found("Item", item_id))?;
        if available < new_quantity {
            return Err(CoreError::InsufficientStock {
                item_id: item_id.to_string(),
                available,
                requested: new_quantity,
            });
        }

        line.quantity = new_quantity;
        Ok(())
    }

    /// Σ live price × quantity over the current lines.
    ///
    /// Lines whose item is no longer in the catalog contribute nothing;
    /// [`Cart::sale_lines`] reports them as `NotFound` instead.
    pub fn total<C>(&self, catalog: &C) -> Money
    where
        C: ItemLookup + ?Sized,
    {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .find_item(&line.item_id)
                    .map(|item| item.price.multiply_quantity(line.quantity))
            })
            .sum()
    }

    /// Snapshot of the cart as sale lines: id, name, quantity and unit price
    /// as they are in the catalog right now.
    pub fn sale_lines<C>(&self, catalog: &C) -> CoreResult<Vec<SaleLine>>
    where
        C: ItemLookup + ?Sized,
    {
        self.lines
            .iter()
            .map(|line| {
                let item = catalog
                    .find_item(&line.item_id)
                    .ok_or_else(|| CoreError::not_found("Item", &line.item_id))?;
                Ok(SaleLine {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    quantity: line.quantity,
                    unit_price: item.price,
                })
            })
            .collect()
    }

    /// Copy of the current lines, in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Quantity in the cart for `item_id`, if present.
    pub fn quantity_of(&self, item_id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map(|line| line.quantity)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
