use chrono::{DateTime, Utc};
use thiserror::Error;

/// The unified error type for the `custom_bar` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A gold price was requested for a time earlier than every known reference row.
    ///
    /// `earliest` is `None` when the reference series holds no rows at all.
    #[error("no gold reference price at or before {requested} (series starts at {earliest:?})")]
    EmptyLookup {
        requested: DateTime<Utc>,
        earliest: Option<DateTime<Utc>>,
    },

    /// A gold bar type name that does not map to a known denomination.
    #[error("unknown gold bar denomination: {0}")]
    UnknownDenomination(String),

    /// Gold bar counts must be strictly positive.
    #[error("gold bar count must be > 0, got {0}")]
    InvalidGoldBarCount(u32),

    /// A row's timestamp is earlier than the row before it.
    #[error("row {index} at {current} is earlier than the previous row at {previous}")]
    NonMonotonic {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// Decimal arithmetic left the representable range.
    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),

    /// A float input was NaN or infinite.
    #[error("non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// The input table lacks a required column.
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    /// A row violates the OHLCV shape (e.g. low above close, negative volume).
    #[error("malformed row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// A numeric cell could not be parsed as a decimal.
    #[error("row {index}: invalid number in column {column}: {value:?}")]
    InvalidNumber {
        index: usize,
        column: &'static str,
        value: String,
    },

    /// A timestamp cell could not be parsed or resolved to a single instant.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// A time zone name that is not in the IANA database.
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),

    /// An error from the CSV reader or writer.
    #[error("CSV error")]
    Csv(#[from] csv::Error),

    /// An error while encoding JSON output.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
