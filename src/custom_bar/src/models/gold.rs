//! Gold denominations and reference prices.
//!
//! A [`GoldBar`] pairs a non-zero count with a standardized [`GoldBarType`]. Every
//! type has a fixed gram-equivalent factor, so the value of a denomination is simply
//! `price_per_gram × grams × count`.
//!
//! ```
//! use std::num::NonZeroU32;
//! use custom_bar::models::gold::{GoldBar, GoldBarType};
//!
//! let bar: GoldBar = "2 kg".parse().unwrap();
//! assert_eq!(bar, GoldBar::new(NonZeroU32::new(2).unwrap(), GoldBarType::Kilogram));
//! assert_eq!(bar.to_string(), "2 kilogram");
//! ```

use std::{fmt, num::NonZeroU32, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Standardized gold bar weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum GoldBarType {
    /// 1 g
    Gram,
    /// 31.1034768 g
    TroyOunce,
    /// 1000 g
    Kilogram,
    /// 11 kg bar per GOST 28058
    #[serde(rename = "kilogram_11")]
    Kilogram11,
    /// 400 oz "good delivery" bar
    #[serde(rename = "troy_ounce_400")]
    TroyOunce400,
}

impl GoldBarType {
    pub const ALL: [GoldBarType; 5] = [
        GoldBarType::Gram,
        GoldBarType::TroyOunce,
        GoldBarType::Kilogram,
        GoldBarType::Kilogram11,
        GoldBarType::TroyOunce400,
    ];

    /// Gram-equivalent weight of one bar of this type.
    pub fn grams(self) -> Decimal {
        match self {
            GoldBarType::Gram => dec!(1),
            GoldBarType::TroyOunce => dec!(31.1034768),
            GoldBarType::Kilogram => dec!(1000),
            GoldBarType::Kilogram11 => dec!(11000),
            GoldBarType::TroyOunce400 => dec!(12441.39072),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GoldBarType::Gram => "gram",
            GoldBarType::TroyOunce => "troy_ounce",
            GoldBarType::Kilogram => "kilogram",
            GoldBarType::Kilogram11 => "kilogram_11",
            GoldBarType::TroyOunce400 => "troy_ounce_400",
        }
    }
}

impl fmt::Display for GoldBarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoldBarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        let bar_type = match norm.as_str() {
            "gram" | "g" => GoldBarType::Gram,
            "troy_ounce" | "t_ounce" | "oz" => GoldBarType::TroyOunce,
            "kilogram" | "kg" => GoldBarType::Kilogram,
            "kilogram_11" | "kg_11" | "gost_28058" => GoldBarType::Kilogram11,
            "troy_ounce_400" | "t_ounce_400" | "good_delivery" => GoldBarType::TroyOunce400,
            _ => return Err(Error::UnknownDenomination(s.to_string())),
        };
        Ok(bar_type)
    }
}

impl TryFrom<String> for GoldBarType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A gold denomination = count × bar type (e.g. 1 kilogram, 5 troy ounces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoldBar {
    pub count: NonZeroU32,
    pub bar_type: GoldBarType,
}

impl GoldBar {
    pub const fn new(count: NonZeroU32, bar_type: GoldBarType) -> Self {
        Self { count, bar_type }
    }

    /// Fallible constructor for counts coming from config or the command line.
    pub fn try_new(count: u32, bar_type: GoldBarType) -> Result<Self, Error> {
        let count = NonZeroU32::new(count).ok_or(Error::InvalidGoldBarCount(count))?;
        Ok(Self::new(count, bar_type))
    }

    /// Total gram-equivalent weight; `None` on decimal overflow.
    pub fn grams(&self) -> Option<Decimal> {
        self.bar_type
            .grams()
            .checked_mul(Decimal::from(self.count.get()))
    }
}

/// Display/parse for CLI ergonomics (`"1 kilogram"`, `"5 oz"`, `"gram"`)
impl fmt::Display for GoldBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.bar_type)
    }
}

impl FromStr for GoldBar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((count, bar_type)) = s.split_once(char::is_whitespace) {
            if let Ok(count) = count.parse::<u32>() {
                return GoldBar::try_new(count, bar_type.trim().parse()?);
            }
        }
        Ok(GoldBar::new(NonZeroU32::MIN, s.parse()?))
    }
}

/// One row of the gold reference series: price per gram at `date_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldPrice {
    pub date_time: DateTime<Utc>,
    pub close: Decimal,
}

impl GoldPrice {
    pub fn new(date_time: DateTime<Utc>, close: Decimal) -> Self {
        Self { date_time, close }
    }
}
