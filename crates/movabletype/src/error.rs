//! Error types for Movable Type parsing.

use std::num::ParseIntError;

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a parse.
///
/// Every variant is fatal: the parser never recovers from one and never
/// returns the records it had sealed before it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `STATUS` value outside the allowed set.
    #[error("STATUS column is allowed only Draft or Publish or Future. Got {0}")]
    InvalidStatus(String),

    /// `ALLOW COMMENTS` / `ALLOW PINGS` value is not an integer.
    #[error("{key} column is allowed only 0 or 1: {source}")]
    InvalidFlag {
        /// Key of the offending line.
        key: &'static str,
        /// Underlying integer conversion failure.
        #[source]
        source: ParseIntError,
    },

    /// `ALLOW COMMENTS` / `ALLOW PINGS` value is an integer other than 0 or 1.
    #[error("{key} column is allowed only 0 or 1. Got {value}")]
    FlagOutOfRange {
        /// Key of the offending line.
        key: &'static str,
        /// The parsed value.
        value: i64,
    },

    /// `DATE` value does not have the fixed-width shape of its layout.
    #[error("Parsing error on DATE column: {value:?} does not match {layout}")]
    DateLayout {
        /// The raw value.
        value: String,
        /// The layout selected for the value.
        layout: &'static str,
    },

    /// `DATE` value has the right shape but is not a valid date and time.
    #[error("Parsing error on DATE column: {source}")]
    InvalidDate {
        /// The raw value that failed to parse.
        value: String,
        /// Underlying format mismatch.
        #[source]
        source: chrono::ParseError,
    },
}
