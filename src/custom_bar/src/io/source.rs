//! CSV readers for trade tables and gold reference series.
//!
//! Both readers expect a header row. Column lookup is by name (case-insensitive, extra
//! columns ignored), numbers are parsed as exact decimals and rows must be ordered by
//! `date_time`. Row indexes in errors count data rows from zero.

use std::{fs::File, io::Read, path::Path, str::FromStr};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::Error,
    io::time::parse_timestamp,
    models::{bar_series::COLUMNS, gold::GoldPrice, trade::TradeRow},
};

pub const GOLD_COLUMNS: [&str; 2] = ["date_time", "close"];

pub fn read_trades<R: Read>(reader: R, tz: Tz) -> Result<Vec<TradeRow>, Error> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let [ts, open, high, low, close, volume] = locate(rdr.headers()?, COLUMNS)?;

    let mut rows = Vec::new();
    let mut previous: Option<DateTime<Utc>> = None;
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let row = TradeRow::new(
            parse_timestamp(cell(&record, ts), tz)?,
            parse_decimal(&record, index, open, "open")?,
            parse_decimal(&record, index, high, "high")?,
            parse_decimal(&record, index, low, "low")?,
            parse_decimal(&record, index, close, "close")?,
            parse_decimal(&record, index, volume, "volume")?,
        );
        if let Some(reason) = row.shape_violation() {
            return Err(Error::MalformedRow { index, reason });
        }
        check_order(&mut previous, index, row.date_time)?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "read trades");
    Ok(rows)
}

pub fn read_trades_path(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<TradeRow>, Error> {
    read_trades(File::open(path)?, tz)
}

/// Read a `date_time, close` series of per-gram gold prices.
pub fn read_gold_series<R: Read>(reader: R, tz: Tz) -> Result<Vec<GoldPrice>, Error> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let [ts, close] = locate(rdr.headers()?, GOLD_COLUMNS)?;

    let mut series = Vec::new();
    let mut previous: Option<DateTime<Utc>> = None;
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let row = GoldPrice::new(
            parse_timestamp(cell(&record, ts), tz)?,
            parse_decimal(&record, index, close, "close")?,
        );
        if row.close < Decimal::ZERO {
            return Err(Error::MalformedRow {
                index,
                reason: format!("negative gold price {}", row.close),
            });
        }
        check_order(&mut previous, index, row.date_time)?;
        series.push(row);
    }

    debug!(rows = series.len(), "read gold series");
    Ok(series)
}

pub fn read_gold_series_path(path: impl AsRef<Path>, tz: Tz) -> Result<Vec<GoldPrice>, Error> {
    read_gold_series(File::open(path)?, tz)
}

fn locate<const N: usize>(
    headers: &StringRecord,
    names: [&'static str; N],
) -> Result<[usize; N], Error> {
    let mut positions = [0usize; N];
    for (slot, name) in positions.iter_mut().zip(names) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(Error::MissingColumn(name))?;
    }
    Ok(positions)
}

fn cell(record: &StringRecord, position: usize) -> &str {
    record.get(position).unwrap_or_default()
}

/// Plain (`101.25`) or scientific (`1.0125e2`) notation.
fn parse_decimal(
    record: &StringRecord,
    index: usize,
    position: usize,
    column: &'static str,
) -> Result<Decimal, Error> {
    let text = cell(record, position);
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| Error::InvalidNumber {
            index,
            column,
            value: text.to_string(),
        })
}

fn check_order(
    previous: &mut Option<DateTime<Utc>>,
    index: usize,
    current: DateTime<Utc>,
) -> Result<(), Error> {
    if let Some(previous) = *previous {
        if current < previous {
            return Err(Error::NonMonotonic {
                index,
                previous,
                current,
            });
        }
    }
    *previous = Some(current);
    Ok(())
}
