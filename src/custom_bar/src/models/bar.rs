//! Canonical in-memory representation of a custom bar (OHLCV).
//!
//! Unlike clock bars, a [`PriceBar`] covers a variable-length run of trades: it opens
//! at the first trade it absorbs and closes once the accumulated dollar value reaches
//! the threshold in force for that bar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single custom bar produced by [`BarConverter`](crate::converter::BarConverter).
///
/// Prices are exact decimals so repeated aggregation never compounds rounding error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Timestamp of the first trade absorbed into the bar (UTC).
    pub date_time: DateTime<Utc>,

    /// Open of the first absorbed trade.
    pub open: Decimal,

    /// Highest high across absorbed trades.
    pub high: Decimal,

    /// Lowest low across absorbed trades.
    pub low: Decimal,

    /// Close of the last absorbed trade.
    pub close: Decimal,

    /// Sum of absorbed volumes.
    pub volume: Decimal,

    /// Number of trades absorbed. Not part of the tabular output.
    #[serde(skip)]
    pub trade_count: usize,
}
