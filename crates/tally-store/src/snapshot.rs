//! # Snapshot Persistence
//!
//! Every repository keeps its records in memory and hands the complete list
//! to a [`SnapshotStore`] after each mutation. There are no partial writes:
//! `save` always replaces everything the repository owns.
//!
//! A store may also hold rows it could not decode (a hand-edited date, a
//! price with a typo). Those are not the repository's records, but they are
//! still on disk: `save` writes them back untouched and their keys stay
//! reserved through [`SnapshotStore::retained_keys`].
//!
//! ```text
//!   Catalog / Directory / ReceiptStore
//!          │  load() once at startup
//!          │  save(&all_records) after every mutation
//!          ▼
//!   ┌──────────────────────┐        ┌──────────────────────┐
//!   │  FlatFile<T>         │   or   │  MemorySnapshot<T>   │
//!   │  items.txt ...       │        │  tests only          │
//!   └──────────────────────┘        └──────────────────────┘
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io;
use std::rc::Rc;

use crate::error::{StoreError, StoreResult};

/// Full-snapshot persistence for one record type.
pub trait SnapshotStore<T>: fmt::Debug {
    /// Reads every stored record.
    fn load(&self) -> StoreResult<Vec<T>>;

    /// Replaces the stored records with `records`.
    fn save(&self, records: &[T]) -> StoreResult<()>;

    /// Keys (first field) of rows kept by the last `load` without being
    /// decoded. Repositories must not hand these out again.
    fn retained_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// In-process snapshot store.
///
/// Clones share the same records, so a test can keep one handle and give
/// the other to a repository. Writes can be switched to fail to exercise
/// persistence error paths.
#[derive(Debug)]
pub struct MemorySnapshot<T> {
    records: Rc<RefCell<Vec<T>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl<T> Clone for MemorySnapshot<T> {
    fn clone(&self) -> Self {
        MemorySnapshot {
            records: Rc::clone(&self.records),
            fail_writes: Rc::clone(&self.fail_writes),
        }
    }
}

impl<T> Default for MemorySnapshot<T> {
    fn default() -> Self {
        MemorySnapshot::with_records(Vec::new())
    }
}

impl<T> MemorySnapshot<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        MemorySnapshot {
            records: Rc::new(RefCell::new(records)),
            fail_writes: Rc::new(Cell::new(false)),
        }
    }

    /// Makes every following `save` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of records last saved.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl<T: Clone> MemorySnapshot<T> {
    /// Copy of the records last saved.
    pub fn records(&self) -> Vec<T> {
        self.records.borrow().clone()
    }
}

impl<T: Clone + fmt::Debug> SnapshotStore<T> for MemorySnapshot<T> {
    fn load(&self) -> StoreResult<Vec<T>> {
        Ok(self.records())
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::persistence(
                "<memory>",
                io::Error::new(io::ErrorKind::Other, "writes disabled"),
            ));
        }
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let store = MemorySnapshot::with_records(vec![1, 2]);
        let handle = store.clone();

        store.save(&[3, 4, 5]).unwrap();

        assert_eq!(handle.records(), vec![3, 4, 5]);
        assert_eq!(handle.load().unwrap().len(), 3);
    }

    #[test]
    fn test_failing_writes_keep_previous_snapshot() {
        let store = MemorySnapshot::with_records(vec!["a"]);
        store.set_fail_writes(true);

        let err = store.save(&["b"]).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
        assert_eq!(store.records(), vec!["a"]);

        store.set_fail_writes(false);
        store.save(&["b"]).unwrap();
        assert_eq!(store.records(), vec!["b"]);
    }
}
