use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{divider::BarDivider, errors::Error};

/// Fixed threshold, e.g. "close a bar every $1M traded".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDivider {
    restriction: Decimal,
}

impl PriceDivider {
    pub fn new(restriction: Decimal) -> Self {
        Self { restriction }
    }

    pub fn restriction(&self) -> Decimal {
        self.restriction
    }
}

impl BarDivider for PriceDivider {
    fn calc_bar_restriction(&self, _at_time: DateTime<Utc>) -> Result<Decimal, Error> {
        Ok(self.restriction)
    }
}
