#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use custom_bar::models::trade::TradeRow;
use rust_decimal::Decimal;

pub const TRADES_CSV: &str = "\
date_time,open,high,low,close,volume
2023-01-01 10:00:00,100.0,105.0,95.0,102.0,10
2023-01-01 10:01:00,101.0,106.0,96.0,103.0,10
2023-01-01 10:02:00,102.0,107.0,97.0,104.0,10
2023-01-01 10:03:00,103.0,108.0,98.0,105.0,10
";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap()
}

pub fn minute(n: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(n)
}

/// A well-formed row around `mid` with the given half-spread.
pub fn trade(at: DateTime<Utc>, mid: i64, spread: i64, volume: i64) -> TradeRow {
    let mid = Decimal::from(mid);
    let spread = Decimal::from(spread);
    TradeRow::new(at, mid, mid + spread, mid - spread, mid, Decimal::from(volume))
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
