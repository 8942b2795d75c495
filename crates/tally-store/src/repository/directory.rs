//! # Directory Repository
//!
//! Customer records: lookup, search and registration.
//!
//! New customers get the next numeric id: one more than the highest id
//! that parses as an integer, counting rows on disk that did not load.
//! Non-numeric ids are left alone.

use tracing::{debug, info};

use tally_core::validation::validate_name;
use tally_core::Customer;

use crate::error::StoreResult;
use crate::snapshot::SnapshotStore;

/// Repository for customers.
#[derive(Debug)]
pub struct Directory {
    customers: Vec<Customer>,
    store: Box<dyn SnapshotStore<Customer>>,
}

impl Directory {
    /// Creates a directory over already-loaded customers.
    pub fn new(customers: Vec<Customer>, store: Box<dyn SnapshotStore<Customer>>) -> Self {
        Directory { customers, store }
    }

    /// Loads the directory from its store.
    pub fn load(store: Box<dyn SnapshotStore<Customer>>) -> StoreResult<Self> {
        let customers = store.load()?;
        info!(count = customers.len(), "Customer directory loaded");
        Ok(Directory::new(customers, store))
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    /// Case-insensitive substring search over id, name, phone and email.
    pub fn search(&self, query: &str) -> Vec<&Customer> {
        let needle = query.trim().to_lowercase();

        debug!(query = %needle, "Searching customers");

        self.customers
            .iter()
            .filter(|c| {
                [&c.id, &c.name, &c.phone, &c.email]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id.trim())
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// The id the next registered customer will get.
    pub fn next_customer_id(&self) -> String {
        let retained = self.store.retained_keys();
        let max = self
            .customers
            .iter()
            .map(|c| c.id.as_str())
            .chain(retained.iter().map(String::as_str))
            .filter_map(|id| id.parse::<i64>().ok())
            .map(i128::from)
            .fold(0, i128::max);
        (max + 1).to_string()
    }

    /// Registers a customer and saves the directory.
    ///
    /// Only the name is required; the other fields may be blank.
    pub fn add_customer(
        &mut self,
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
    ) -> StoreResult<&Customer> {
        let name = name.trim();
        validate_name("customer name", name)?;

        let customer = Customer {
            id: self.next_customer_id(),
            name: name.to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            address: address.trim().to_string(),
        };

        info!(id = %customer.id, name = %customer.name, "Adding customer");

        self.customers.push(customer);
        self.store.save(&self.customers)?;

        let index = self.customers.len() - 1;
        Ok(&self.customers[index])
    }
}
