//! # Receipt Identifiers
//!
//! Receipt ids look like `R001`: the prefix character followed by a
//! zero-padded sequence number.
//!
//! ## Allocation
//! ```text
//! existing headers: R001, R003, Rxyz (hand-edited)
//!                     │     │     │
//!                     1     3     ✗ skipped (not a number)
//!                           │
//!                     max = 3 ──► next = R004
//!
//! no headers ──► max = 0 ──► next = R001
//! ```
//! Suffixes are read as `i64` and the successor is computed in `i128`, so
//! even `R9223372036854775807` has a next id (`R9223372036854775808`).
//! Ids are only ever produced by [`next_receipt_id`]; callers never supply
//! one. Malformed ids already on disk are tolerated, never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{RECEIPT_ID_PREFIX, RECEIPT_ID_WIDTH};

/// A receipt identifier ("R001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Builds the id for a sequence number: `R` + at least three digits.
    ///
    /// ```rust
    /// use tally_core::ReceiptId;
    ///
    /// assert_eq!(ReceiptId::from_sequence(7).as_str(), "R007");
    /// assert_eq!(ReceiptId::from_sequence(1234).as_str(), "R1234");
    /// ```
    pub fn from_sequence(sequence: i128) -> Self {
        ReceiptId(format!(
            "{}{:0width$}",
            RECEIPT_ID_PREFIX,
            sequence,
            width = RECEIPT_ID_WIDTH
        ))
    }

    /// Numeric suffix: every character after the first, parsed as an integer.
    ///
    /// Returns `None` when the suffix is not a number.
    pub fn sequence(&self) -> Option<i64> {
        let mut chars = self.0.chars();
        chars.next()?;
        chars.as_str().parse().ok()
    }

    /// The id as text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(id: String) -> Self {
        ReceiptId(id)
    }
}

impl From<&str> for ReceiptId {
    fn from(id: &str) -> Self {
        ReceiptId(id.to_string())
    }
}

impl PartialEq<str> for ReceiptId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ReceiptId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Allocates the id following the highest numeric suffix in `existing`.
///
/// Ids whose suffix does not parse are skipped (not counted as zero, not an
/// error).
pub fn next_receipt_id<'a, I>(existing: I) -> ReceiptId
where
    I: IntoIterator<Item = &'a ReceiptId>,
{
    let max = existing
        .into_iter()
        .filter_map(ReceiptId::sequence)
        .map(i128::from)
        .fold(0, i128::max);
    ReceiptId::from_sequence(max + 1)
}
