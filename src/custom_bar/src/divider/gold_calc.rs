//! As-of gold valuation.
//!
//! [`GoldBarCalc`] owns an immutable, time-ordered series of per-gram reference prices
//! and answers "what was a given gold denomination worth at time `t`?" using the latest
//! price not after `t`. Lookups are binary searches over the sorted series.
//!
//! Valuation is `price × grams(bar_type) × count`, computed in exact decimal and rounded
//! once, half-to-even, to four fractional digits.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{
    errors::Error,
    models::gold::{GoldBar, GoldPrice},
};

/// Fractional digits kept on a gold valuation.
pub const GOLD_PRICE_SCALE: u32 = 4;

#[derive(Debug, Clone)]
pub struct GoldBarCalc {
    series: Vec<GoldPrice>,
}

impl GoldBarCalc {
    /// Wrap a reference series. Rows must be non-decreasing in `date_time`.
    pub fn new(series: Vec<GoldPrice>) -> Result<Self, Error> {
        if let Some(index) = series
            .windows(2)
            .position(|w| w[1].date_time < w[0].date_time)
        {
            return Err(Error::NonMonotonic {
                index: index + 1,
                previous: series[index].date_time,
                current: series[index + 1].date_time,
            });
        }
        Ok(Self { series })
    }

    pub fn series(&self) -> &[GoldPrice] {
        &self.series
    }

    /// The row with the greatest `date_time <= for_date_time`.
    ///
    /// With duplicate timestamps the last such row wins.
    pub fn price_as_of(&self, for_date_time: DateTime<Utc>) -> Result<&GoldPrice, Error> {
        let after = self
            .series
            .partition_point(|row| row.date_time <= for_date_time);
        match after.checked_sub(1) {
            Some(idx) => Ok(&self.series[idx]),
            None => Err(Error::EmptyLookup {
                requested: for_date_time,
                earliest: self.series.first().map(|row| row.date_time),
            }),
        }
    }

    /// Value of `gold_unit` at `for_date_time`, rounded half-even to four places.
    pub fn calc_gold_price(
        &self,
        gold_unit: &GoldBar,
        for_date_time: DateTime<Utc>,
    ) -> Result<Decimal, Error> {
        let reference = self.price_as_of(for_date_time)?;
        let raw = reference
            .close
            .checked_mul(gold_unit.bar_type.grams())
            .and_then(|v| v.checked_mul(Decimal::from(gold_unit.count.get())))
            .ok_or(Error::Overflow("gold bar value"))?;

        let mut value =
            raw.round_dp_with_strategy(GOLD_PRICE_SCALE, RoundingStrategy::MidpointNearestEven);
        value.rescale(GOLD_PRICE_SCALE);

        debug!(
            %for_date_time,
            reference_time = %reference.date_time,
            gold_unit = %gold_unit,
            %value,
            "gold bar valued"
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gold::GoldBarType;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, hour, minute, 0).unwrap()
    }

    fn one(bar_type: GoldBarType) -> GoldBar {
        GoldBar::try_new(1, bar_type).unwrap()
    }

    fn hourly_calc() -> GoldBarCalc {
        GoldBarCalc::new(vec![
            GoldPrice::new(at(9, 0), dec!(59.0)),
            GoldPrice::new(at(10, 0), dec!(60.0)),
            GoldPrice::new(at(11, 0), dec!(61.0)),
        ])
        .unwrap()
    }

    fn flat_calc(price: Decimal) -> GoldBarCalc {
        GoldBarCalc::new(vec![GoldPrice::new(at(9, 0), price)]).unwrap()
    }

    #[test]
    fn uses_latest_price_before_time() {
        let calc = hourly_calc();
        let got = calc
            .calc_gold_price(&one(GoldBarType::Gram), at(10, 30))
            .unwrap();
        assert_eq!(got, dec!(60.0000));
        assert_eq!(got.to_string(), "60.0000");
    }

    #[test]
    fn exact_time_match_uses_that_row() {
        let calc = hourly_calc();
        let got = calc
            .calc_gold_price(&one(GoldBarType::Gram), at(10, 0))
            .unwrap();
        assert_eq!(got, dec!(60));
    }

    #[test]
    fn after_last_row_uses_last_row() {
        let calc = hourly_calc();
        let row = calc.price_as_of(at(23, 59)).unwrap();
        assert_eq!(row.close, dec!(61.0));
    }

    #[test]
    fn duplicate_timestamps_resolve_to_last_row() {
        let calc = GoldBarCalc::new(vec![
            GoldPrice::new(at(9, 0), dec!(58)),
            GoldPrice::new(at(10, 0), dec!(59)),
            GoldPrice::new(at(10, 0), dec!(60)),
        ])
        .unwrap();
        assert_eq!(calc.price_as_of(at(10, 0)).unwrap().close, dec!(60));
    }

    #[test]
    fn conversion_factors_at_sixty() {
        let calc = flat_calc(dec!(60.0));
        let cases = [
            (GoldBarType::Gram, dec!(60.0000)),
            (GoldBarType::TroyOunce, dec!(1866.2086)),
            (GoldBarType::Kilogram, dec!(60000.0000)),
            (GoldBarType::Kilogram11, dec!(660000.0000)),
            (GoldBarType::TroyOunce400, dec!(746483.4432)),
        ];
        for (bar_type, want) in cases {
            let got = calc.calc_gold_price(&one(bar_type), at(10, 0)).unwrap();
            assert_eq!(got, want, "{bar_type}");
            assert_eq!(got.scale(), GOLD_PRICE_SCALE, "{bar_type}");
        }
    }

    #[test]
    fn multiple_units() {
        let calc = flat_calc(dec!(60.0));
        let five_grams = GoldBar::try_new(5, GoldBarType::Gram).unwrap();
        let got = calc.calc_gold_price(&five_grams, at(10, 0)).unwrap();
        assert_eq!(got.to_string(), "300.0000");
    }

    #[test]
    fn rounds_once_at_four_places() {
        // 60.123456 * 31.1034768 = 1870.0485188318208
        let calc = flat_calc(dec!(60.123456));
        let got = calc
            .calc_gold_price(&one(GoldBarType::TroyOunce), at(10, 0))
            .unwrap();
        assert_eq!(got, dec!(1870.0485));
    }

    #[test]
    fn rounding_is_half_to_even() {
        let gram = one(GoldBarType::Gram);
        let down = flat_calc(dec!(0.00005)).calc_gold_price(&gram, at(10, 0)).unwrap();
        assert_eq!(down, dec!(0.0000));
        let up = flat_calc(dec!(0.00015)).calc_gold_price(&gram, at(10, 0)).unwrap();
        assert_eq!(up, dec!(0.0002));
    }

    #[test]
    fn count_multiplies_before_rounding() {
        // 59.5 * 31.1034768 * 2 = 3701.31373920
        let calc = flat_calc(dec!(59.5));
        let two_oz = GoldBar::try_new(2, GoldBarType::TroyOunce).unwrap();
        let got = calc.calc_gold_price(&two_oz, at(10, 0)).unwrap();
        assert_eq!(got, dec!(3701.3137));
    }

    #[test]
    fn before_series_start_is_empty_lookup() {
        let calc = hourly_calc();
        let err = calc
            .calc_gold_price(&one(GoldBarType::Gram), at(8, 59))
            .unwrap_err();
        match err {
            Error::EmptyLookup {
                requested,
                earliest,
            } => {
                assert_eq!(requested, at(8, 59));
                assert_eq!(earliest, Some(at(9, 0)));
            }
            other => panic!("expected EmptyLookup, got {other:?}"),
        }
    }

    #[test]
    fn empty_series_is_empty_lookup() {
        let calc = GoldBarCalc::new(Vec::new()).unwrap();
        let err = calc.price_as_of(at(10, 0)).unwrap_err();
        assert!(matches!(err, Error::EmptyLookup { earliest: None, .. }));
    }

    #[test]
    fn unsorted_series_is_rejected() {
        let err = GoldBarCalc::new(vec![
            GoldPrice::new(at(10, 0), dec!(60)),
            GoldPrice::new(at(9, 0), dec!(59)),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::NonMonotonic { index: 1, .. }));
    }
}
