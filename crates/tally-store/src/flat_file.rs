//! # Flat File Store
//!
//! [`SnapshotStore`] over one comma-delimited text file.
//!
//! ## Load
//! ```text
//! items.txt
//! ┌──────────────────────────────────────┐
//! │ # ItemID, ItemName, Price, Stock     │ ← comment, skipped
//! │                                      │ ← blank, skipped
//! │ 101, Pen, 10.0, 100                  │ ← trimmed, decoded
//! │ 102, Notebook                        │ ← too few fields, skipped (warn)
//! │ 103, Pencil, five, 150               │ ← bad price, retained (warn)
//! └──────────────────────────────────────┘
//! ```
//! A missing file loads as empty. Only I/O failures abort a load.
//!
//! Rows with enough fields that fail to decode are retained: they are not
//! returned as records, but their keys are reported through
//! [`SnapshotStore::retained_keys`] and every later save writes them back.
//!
//! ## Save
//! Truncates the file, writes the header comment, one row per record and
//! then the retained rows. No temp file or rename: a crash mid-write can
//! lose data.

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::codec::FlatRecord;
use crate::error::{StoreError, StoreResult};
use crate::snapshot::SnapshotStore;

/// A data file holding records of type `T`.
pub struct FlatFile<T> {
    path: PathBuf,
    /// Undecodable rows from the last load, written back on save.
    retained: RefCell<Vec<StringRecord>>,
    record: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for FlatFile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatFile")
            .field("path", &self.path)
            .field("retained", &self.retained.borrow().len())
            .finish()
    }
}

impl<T> Clone for FlatFile<T> {
    fn clone(&self) -> Self {
        FlatFile {
            path: self.path.clone(),
            retained: RefCell::new(self.retained.borrow().clone()),
            record: PhantomData,
        }
    }
}

impl<T> FlatFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFile {
            path: path.into(),
            retained: RefCell::new(Vec::new()),
            record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl<T: FlatRecord> FlatFile<T> {
    fn write_all(&self, records: &[T]) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(&self.path)?);
        writeln!(file, "{}", T::HEADER)?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        for row in self.retained.borrow().iter() {
            writer.write_record(row)?;
        }
        writer.flush()
    }
}

impl<T: FlatRecord> SnapshotStore<T> for FlatFile<T> {
    fn load(&self) -> StoreResult<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Data file missing, loading empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::persistence(&self.path, err)),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(file);

        let mut records = Vec::new();
        let mut retained = Vec::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(err) if err.is_io_error() => {
                    return Err(StoreError::persistence(&self.path, err.into()));
                }
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "Skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            let line = row.position().map_or(0, |pos| pos.line());

            if row.len() < T::MIN_FIELDS {
                warn!(
                    path = %self.path.display(),
                    line,
                    fields = row.len(),
                    expected = T::MIN_FIELDS,
                    "Skipping short row"
                );
                skipped += 1;
                continue;
            }

            match T::decode(&row) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    let err = StoreError::InvalidRecord {
                        path: self.path.clone(),
                        line,
                        reason,
                    };
                    warn!(error = %err, "Keeping undecodable row as-is");
                    retained.push(row);
                }
            }
        }

        debug!(
            path = %self.path.display(),
            count = records.len(),
            retained = retained.len(),
            skipped,
            "Loaded data file"
        );
        *self.retained.borrow_mut() = retained;
        Ok(records)
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        self.write_all(records)
            .map_err(|err| StoreError::persistence(&self.path, err))?;

        debug!(path = %self.path.display(), count = records.len(), "Saved data file");
        Ok(())
    }

    fn retained_keys(&self) -> Vec<String> {
        self.retained
            .borrow()
            .iter()
            .filter_map(|row| row.get(0))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tally_core::{Item, Money, ReceiptLine};

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::<Item>::new(dir.path().join("items.txt"));

        assert!(!file.exists());
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_comments_blank_and_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        fs::write(
            &path,
            "# ItemID, ItemName, Price, Stock\n\
             101, Pen, 10.0, 100\n\
             \n\
             102, Notebook\n\
             103, Pencil, five, 150\n\
             104, Eraser, 3.0, 80\n",
        )
        .unwrap();

        let items = FlatFile::<Item>::new(&path).load().unwrap();

        assert_eq!(
            items,
            vec![
                Item::new("101", "Pen", Money::from_cents(1000), 100),
                Item::new("104", "Eraser", Money::from_cents(300), 80),
            ]
        );
    }

    #[test]
    fn test_undecodable_rows_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        fs::write(
            &path,
            "# ItemID, ItemName, Price, Stock\n\
             101, Pen, 10.0, 100\n\
             102, Notebook\n\
             103, Pencil, five, 150, note\n",
        )
        .unwrap();

        let file = FlatFile::<Item>::new(&path);
        let mut items = file.load().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(file.retained_keys(), vec!["103".to_string()]);

        items.push(Item::new("104", "Eraser", Money::from_cents(300), 80));
        file.save(&items).unwrap();

        // Short rows are dropped; the undecodable one is written back as read.
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# ItemID, ItemName, Price, Stock\n\
             101,Pen,10.00,100\n\
             104,Eraser,3.00,80\n\
             103,Pencil,five,150,note\n"
        );

        let reloaded = FlatFile::<Item>::new(&path);
        assert_eq!(reloaded.load().unwrap(), items);
        assert_eq!(reloaded.retained_keys(), vec!["103".to_string()]);
    }

    #[test]
    fn test_save_writes_header_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::<Item>::new(dir.path().join("items.txt"));
        let items = vec![
            Item::new("101", "Pen", Money::from_cents(1000), 100),
            Item::new("108", "Paper, A4", Money::from_cents(8050), 75),
        ];

        file.save(&items).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("# ItemID, ItemName, Price, Stock\n101,Pen,10.00,100\n"));
        assert_eq!(file.load().unwrap(), items);
    }

    #[test]
    fn test_receipt_lines_without_total_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt_details.txt");
        fs::write(&path, "R001, 101, Pen, 3, 10.0\nR001, 102, Notebook, 1, 50.0, 50.0\n").unwrap();

        let lines = FlatFile::<ReceiptLine>::new(&path).load().unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_total, Money::from_cents(3000));
        assert_eq!(lines[1].line_total, Money::from_cents(5000));
    }

    #[test]
    fn test_save_into_missing_directory_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::<Item>::new(dir.path().join("nope").join("items.txt"));

        let err = file.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }
}
