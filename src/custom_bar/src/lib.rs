//! Custom OHLCV bars closed by an accumulated dollar-value threshold.
//!
//! The threshold comes from a [`divider::BarDivider`]: either a fixed amount
//! ([`divider::PriceDivider`]) or the as-of value of a gold denomination
//! ([`divider::GoldBarDivider`]). [`converter::BarConverter`] does the grouping.

pub mod config;
pub mod converter;
pub mod divider;
pub mod errors;
pub mod io;
pub mod logging;
pub mod models;
pub mod pipeline;
