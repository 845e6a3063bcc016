use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    divider::{BarDivider, gold_calc::GoldBarCalc},
    errors::Error,
    models::gold::GoldBar,
};

/// Threshold worth one fixed gold denomination at each bar's opening time.
///
/// As the reference price drifts, so does the dollar size of the bars.
#[derive(Debug, Clone)]
pub struct GoldBarDivider {
    gold_bar_calc: GoldBarCalc,
    gold_bars: GoldBar,
}

impl GoldBarDivider {
    pub fn new(gold_bar_calc: GoldBarCalc, gold_bars: GoldBar) -> Self {
        Self {
            gold_bar_calc,
            gold_bars,
        }
    }

    pub fn gold_bars(&self) -> &GoldBar {
        &self.gold_bars
    }

    pub fn gold_bar_calc(&self) -> &GoldBarCalc {
        &self.gold_bar_calc
    }
}

impl BarDivider for GoldBarDivider {
    fn calc_bar_restriction(&self, at_time: DateTime<Utc>) -> Result<Decimal, Error> {
        self.gold_bar_calc.calc_gold_price(&self.gold_bars, at_time)
    }
}
