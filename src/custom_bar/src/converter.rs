//! Threshold-driven bar construction.
//!
//! [`BarConverter`] walks a time-ordered trade table once. Each bar asks the injected
//! [`BarDivider`] for its threshold at the bar's opening time, then absorbs trades until
//! the accumulated dollar value `Σ aggregate_price × volume` reaches that threshold.
//! Whatever is left when the trades run out becomes a final, short bar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::{
    divider::BarDivider,
    errors::Error,
    models::{bar::PriceBar, bar_series::PriceBarSeries, trade::TradeRow},
};

/// The classical OHLC average `(open + high + low + close) / 4`.
pub fn aggregate_price(trade: &TradeRow) -> Result<Decimal, Error> {
    trade
        .open
        .checked_add(trade.high)
        .and_then(|sum| sum.checked_add(trade.low))
        .and_then(|sum| sum.checked_add(trade.close))
        .and_then(|sum| sum.checked_div(Decimal::from(4)))
        .ok_or(Error::Overflow("aggregate price"))
}

/// Dollar value a single trade contributes to its bar.
fn trade_value(trade: &TradeRow) -> Result<Decimal, Error> {
    aggregate_price(trade)?
        .checked_mul(trade.volume)
        .ok_or(Error::Overflow("trade value"))
}

#[derive(Debug)]
pub struct BarConverter<D> {
    bar_divider: D,
}

impl<D: BarDivider> BarConverter<D> {
    pub fn new(bar_divider: D) -> Self {
        Self { bar_divider }
    }

    pub fn bar_divider(&self) -> &D {
        &self.bar_divider
    }

    /// Convert `trades` (ascending by `date_time`) into custom bars.
    ///
    /// Every trade lands in exactly one bar and the trailing remainder is always emitted.
    /// The divider is queried once per bar, at the bar's opening time.
    ///
    /// Errors:
    /// - [`Error::NonMonotonic`] if a trade is earlier than its predecessor
    /// - any error returned by the divider (e.g. [`Error::EmptyLookup`])
    /// - [`Error::Overflow`] if the accumulated value leaves the decimal range
    pub fn make_custom_bars(&self, trades: &[TradeRow]) -> Result<PriceBarSeries, Error> {
        debug!(rows = trades.len(), "making custom bars");

        let mut bars = Vec::new();
        let mut current: Option<BarAccumulator> = None;
        let mut previous: Option<DateTime<Utc>> = None;

        for (index, trade) in trades.iter().enumerate() {
            if let Some(previous) = previous {
                if trade.date_time < previous {
                    return Err(Error::NonMonotonic {
                        index,
                        previous,
                        current: trade.date_time,
                    });
                }
            }
            previous = Some(trade.date_time);

            let acc = match current.take() {
                Some(mut acc) => {
                    acc.absorb(trade)?;
                    acc
                }
                None => {
                    let threshold = self.bar_divider.calc_bar_restriction(trade.date_time)?;
                    BarAccumulator::start(trade, threshold)?
                }
            };

            if acc.is_complete() {
                let bar = acc.into_bar();
                trace!(date_time = %bar.date_time, trades = bar.trade_count, "bar closed");
                bars.push(bar);
            } else {
                current = Some(acc);
            }
        }

        if let Some(acc) = current {
            debug!(
                value = %acc.value,
                threshold = %acc.threshold,
                trades = acc.trade_count,
                "flushing trailing partial bar"
            );
            bars.push(acc.into_bar());
        }

        debug!(bars = bars.len(), "custom bars done");
        Ok(PriceBarSeries::new(bars))
    }
}

/// Running state of the bar under construction.
#[derive(Debug)]
struct BarAccumulator {
    date_time: DateTime<Utc>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
    value: Decimal,
    threshold: Decimal,
    trade_count: usize,
}

impl BarAccumulator {
    fn start(trade: &TradeRow, threshold: Decimal) -> Result<Self, Error> {
        Ok(Self {
            date_time: trade.date_time,
            open: trade.open,
            high: trade.high,
            low: trade.low,
            close: trade.close,
            volume: trade.volume,
            value: trade_value(trade)?,
            threshold,
            trade_count: 1,
        })
    }

    fn absorb(&mut self, trade: &TradeRow) -> Result<(), Error> {
        self.high = self.high.max(trade.high);
        self.low = self.low.min(trade.low);
        self.close = trade.close;
        self.volume = self
            .volume
            .checked_add(trade.volume)
            .ok_or(Error::Overflow("bar volume"))?;
        self.value = self
            .value
            .checked_add(trade_value(trade)?)
            .ok_or(Error::Overflow("bar value"))?;
        self.trade_count += 1;
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.threshold <= Decimal::ZERO || self.value >= self.threshold
    }

    fn into_bar(self) -> PriceBar {
        PriceBar {
            date_time: self.date_time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            trade_count: self.trade_count,
        }
    }
}
