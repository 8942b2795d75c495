//! # Console Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Menu choice "Add Item to Cart"                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ConsoleError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::Persistence {..} ───┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Rule broken? ─── CoreError::InsufficientStock ── ConsoleError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Menu loop prints `message` and shows the menu again.                  │
//! │  Only `ErrorCode::Io` (stdin/stdout broken) ends the session.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io;

use tally_core::{CoreError, ValidationError};
use tally_store::StoreError;

/// Error returned from console commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message printed to the operator
    pub message: String,
}

/// Error codes for console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Item, customer or receipt doesn't exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Insufficient stock
    InsufficientStock,

    /// Checkout preconditions not met (no customer, empty cart)
    CheckoutError,

    /// Reading or writing the data files failed
    StorageError,

    /// The terminal itself failed
    Io,
}

impl ConsoleError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ConsoleError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    /// Whether the menu loop should stop instead of reporting and carrying on.
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, ErrorCode::Io)
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConsoleError {}

/// Converts core errors to console errors.
impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => ConsoleError::not_found(&entity, &id),
            CoreError::InsufficientStock {
                item_id,
                available,
                requested,
            } => ConsoleError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}! Available: {}, requested: {}",
                    item_id, available, requested
                ),
            ),
            CoreError::EmptyCart => ConsoleError::new(
                ErrorCode::CheckoutError,
                "Cart is empty! Add items before generating a receipt.",
            ),
            CoreError::EmptyReceipt => {
                ConsoleError::new(ErrorCode::CheckoutError, "Receipt has no lines")
            }
            CoreError::NoCustomerSelected => {
                ConsoleError::new(ErrorCode::CheckoutError, "Please select a customer first!")
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

/// Converts store errors to console errors.
impl From<StoreError> for ConsoleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            other => {
                // Log the full error, the operator gets the short form
                tracing::error!(error = %other, "Storage operation failed");
                ConsoleError::new(ErrorCode::StorageError, other.to_string())
            }
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::new(ErrorCode::Io, format!("Terminal error: {}", err))
    }
}

/// Convenience type alias for console results.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
