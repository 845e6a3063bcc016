//! Bar restriction strategies.
//!
//! This module defines the [`BarDivider`] trait, the single capability the
//! [`BarConverter`](crate::converter::BarConverter) needs: given the opening time of a
//! new bar, return the accumulation threshold that closes it.
//!
//! Two strategies ship with the crate and are collected in the closed
//! [`BarRestriction`] enum:
//! - [`PriceDivider`]: a fixed threshold.
//! - [`GoldBarDivider`]: the value of a fixed gold denomination at the bar's open.
//!
//! Any other type implementing [`BarDivider`] can be handed to the converter as well.
//!
//! # Example
//!
//! ```rust
//! # use chrono::{DateTime, Timelike, Utc};
//! # use rust_decimal::Decimal;
//! # use custom_bar::divider::BarDivider;
//! # use custom_bar::errors::Error;
//! struct SessionDivider;
//!
//! impl BarDivider for SessionDivider {
//!     fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error> {
//!         // smaller bars during the first hour
//!         Ok(if at_time.hour() == 14 { Decimal::from(50_000) } else { Decimal::from(250_000) })
//!     }
//! }
//! ```

pub mod gold;
pub mod gold_calc;
pub mod price;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Error;

pub use gold::GoldBarDivider;
pub use gold_calc::GoldBarCalc;
pub use price::PriceDivider;

pub trait BarDivider {
    /// Threshold for a bar opening at `at_time`.
    ///
    /// Called exactly once per bar. A zero or negative threshold makes every trade
    /// close its own bar.
    fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error>;
}

impl<T: BarDivider + ?Sized> BarDivider for &T {
    fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error> {
        (**self).calc_bar_restriction(at_time)
    }
}

impl<T: BarDivider + ?Sized> BarDivider for Box<T> {
    fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error> {
        (**self).calc_bar_restriction(at_time)
    }
}

/// The strategies this crate knows how to configure.
#[derive(Debug, Clone)]
pub enum BarRestriction {
    Price(PriceDivider),
    GoldBar(GoldBarDivider),
}

impl BarRestriction {
    pub fn name(&self) -> &'static str {
        match self {
            BarRestriction::Price(_) => "price",
            BarRestriction::GoldBar(_) => "gold",
        }
    }
}

impl BarDivider for BarRestriction {
    fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error> {
        match self {
            BarRestriction::Price(d) => d.calc_bar_restriction(at_time),
            BarRestriction::GoldBar(d) => d.calc_bar_restriction(at_time),
        }
    }
}

impl From<PriceDivider> for BarRestriction {
    fn from(d: PriceDivider) -> Self {
        BarRestriction::Price(d)
    }
}

impl From<GoldBarDivider> for BarRestriction {
    fn from(d: GoldBarDivider) -> Self {
        BarRestriction::GoldBar(d)
    }
}
