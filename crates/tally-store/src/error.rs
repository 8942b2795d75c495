//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error          CoreError (cart, validation)          │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConsoleError (in apps/console) ← Adds an error code                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Console prints the message and shows the menu again                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule was violated (not found, stock, empty cart...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a data file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full during a rewrite
    ///
    /// In-memory state is NOT rolled back when a save fails.
    #[error("Failed to access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row in a data file could not be decoded.
    ///
    /// Loads skip such rows and log this error; it is never returned from
    /// a whole-file load.
    #[error("Invalid record in {} at line {line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl StoreError {
    /// Creates a Persistence error for a file path.
    pub fn persistence(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Persistence {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Core(CoreError::not_found(entity, id))
    }

    /// The domain error, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
