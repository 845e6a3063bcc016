//! The ordered output of a conversion run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::bar::PriceBar;

/// Column set shared by trade input tables and bar output tables.
pub const COLUMNS: [&str; 6] = ["date_time", "open", "high", "low", "close", "volume"];

/// Time-ordered custom bars, keyed by each bar's opening `date_time`.
///
/// Serializes as a plain array of bars, one row per bar with the [`COLUMNS`] layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBarSeries {
    bars: Vec<PriceBar>,
}

impl PriceBarSeries {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }

    /// The `date_time` index of the table.
    pub fn index(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.date_time).collect()
    }

    pub fn total_volume(&self) -> Decimal {
        self.bars.iter().map(|b| b.volume).sum()
    }

    pub fn into_inner(self) -> Vec<PriceBar> {
        self.bars
    }
}

impl From<Vec<PriceBar>> for PriceBarSeries {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}

impl IntoIterator for PriceBarSeries {
    type Item = PriceBar;
    type IntoIter = std::vec::IntoIter<PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceBarSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
