//! Input rows for bar construction.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Serialize;

use crate::errors::Error;

/// A single trade (or fine-grained OHLCV row) fed into the bar converter.
///
/// Tables of trades must be ordered by `date_time`; equal timestamps are allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub date_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl TradeRow {
    pub fn new(
        date_time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Build a row from native floats, converting each value to the nearest decimal.
    ///
    /// Fails with [`Error::NonFinite`] for NaN, infinities, or values outside the
    /// decimal range.
    pub fn from_f64(
        date_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, Error> {
        Ok(Self {
            date_time,
            open: decimal_from_f64("open", open)?,
            high: decimal_from_f64("high", high)?,
            low: decimal_from_f64("low", low)?,
            close: decimal_from_f64("close", close)?,
            volume: decimal_from_f64("volume", volume)?,
        })
    }

    /// Check the OHLCV shape: `low <= open, close <= high` and a non-negative volume.
    pub fn shape_violation(&self) -> Option<String> {
        if self.low > self.high {
            return Some(format!("low {} above high {}", self.low, self.high));
        }
        for (name, price) in [("open", self.open), ("close", self.close)] {
            if price < self.low || price > self.high {
                return Some(format!(
                    "{name} {price} outside [{}, {}]",
                    self.low, self.high
                ));
            }
        }
        if self.volume < Decimal::ZERO {
            return Some(format!("negative volume {}", self.volume));
        }
        None
    }
}

fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, Error> {
    if !value.is_finite() {
        return Err(Error::NonFinite { field, value });
    }
    Decimal::from_f64(value).ok_or(Error::NonFinite { field, value })
}
