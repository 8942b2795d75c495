//! # Catalog Repository
//!
//! The item catalog, held in memory and saved in full after each change.
//!
//! ## Key Operations
//! - Substring search over id and name
//! - Lookup by id (also through [`ItemLookup`] for the cart)
//! - Adding items and decrementing stock
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Search Works                                     │
//! │                                                                         │
//! │  User types: "pen"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase, then substring match on id OR name                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  101 | Pen     ← MATCH                                                 │
//! │  103 | Pencil  ← MATCH                                                 │
//! │  102 | Notebook                                                        │
//! │                                                                         │
//! │  Empty query returns the whole catalog in file order.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use tally_core::validation::{
    validate_item_id, validate_name, validate_price, validate_quantity, validate_stock,
};
use tally_core::{CoreError, Item, ItemLookup, Money, ValidationError};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::SnapshotStore;

/// Repository for catalog items.
///
/// ## Usage
/// ```rust
/// use tally_store::{Catalog, MemorySnapshot};
/// use tally_core::{Item, ItemLookup, Money};
///
/// let mut catalog = Catalog::new(Vec::new(), Box::new(MemorySnapshot::<Item>::new()));
/// catalog.add_item("101", "Pen", Money::from_cents(1000), 5).unwrap();
///
/// assert_eq!(catalog.current_stock("101"), Some(5));
/// assert_eq!(catalog.search("PE").len(), 1);
/// ```
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Item>,
    store: Box<dyn SnapshotStore<Item>>,
}

impl Catalog {
    /// Creates a catalog over already-loaded items.
    pub fn new(items: Vec<Item>, store: Box<dyn SnapshotStore<Item>>) -> Self {
        Catalog { items, store }
    }

    /// Loads the catalog from its store.
    pub fn load(store: Box<dyn SnapshotStore<Item>>) -> StoreResult<Self> {
        let items = store.load()?;
        info!(count = items.len(), "Catalog loaded");
        Ok(Catalog::new(items, store))
    }

    /// Every item, in file order.
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    /// Case-insensitive substring search over id and name.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        let needle = query.trim().to_lowercase();

        debug!(query = %needle, "Searching catalog");

        self.items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.id.to_lowercase().contains(&needle)
                    || item.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Gets an item by its id.
    pub fn find_by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a new item and saves the catalog.
    ///
    /// ## Errors
    /// - `Validation` for a bad id/name, negative price or stock
    /// - `Validation(Duplicate)` if the id is taken, including by a row on
    ///   disk that did not load
    /// - `Persistence` if the save fails (the item stays in memory)
    pub fn add_item(
        &mut self,
        id: &str,
        name: &str,
        price: Money,
        stock: i64,
    ) -> StoreResult<&Item> {
        let id = id.trim();
        let name = name.trim();

        validate_item_id(id)?;
        validate_name("item name", name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        let taken_on_disk = self.store.retained_keys().iter().any(|key| key == id);
        if self.find_by_id(id).is_some() || taken_on_disk {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: id.to_string(),
            }
            .into());
        }

        info!(id, name, price = %price, stock, "Adding item");

        self.items.push(Item::new(id, name, price, stock));
        self.store.save(&self.items)?;

        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Decrements an item's stock by `quantity_sold` and saves.
    ///
    /// Returns the remaining stock.
    ///
    /// ## Errors
    /// - `Validation` if `quantity_sold <= 0`
    /// - `NotFound` if the item doesn't exist
    /// - `InsufficientStock` if stock would go negative (nothing changes)
    pub fn update_stock(&mut self, item_id: &str, quantity_sold: i64) -> StoreResult<i64> {
        validate_quantity(quantity_sold)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| StoreError::not_found("Item", item_id))?;

        if !item.can_supply(quantity_sold) {
            return Err(CoreError::InsufficientStock {
                item_id: item_id.to_string(),
                available: item.stock,
                requested: quantity_sold,
            }
            .into());
        }

        item.stock -= quantity_sold;
        let remaining = item.stock;

        debug!(item_id, quantity_sold, remaining, "Stock updated");

        self.store.save(&self.items)?;
        Ok(remaining)
    }
}

impl ItemLookup for Catalog {
    fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.find_by_id(item_id)
    }
}
