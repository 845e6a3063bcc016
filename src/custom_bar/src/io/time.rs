//! Timestamp parsing for input tables and CLI arguments.
//!
//! - [`parse_timestamp`]: RFC-3339 with an explicit offset, or a naive wall time read in a
//!   given IANA zone. Everything is normalized to UTC.
//! - [`parse_timezone`]: look up an IANA zone name (e.g. "America/New_York").
//!
//! Notes:
//! - Nonexistent local times ("spring forward" gaps) are errors.
//! - Ambiguous local times ("fall back", the wall time occurs twice) resolve to the
//!   earlier instant so that re-reading a file always yields the same UTC column.
//!
//! Examples
//! - "2024-03-10T09:30:00-05:00" -> "2024-03-10T14:30:00Z" (zone ignored)
//! - "2024-11-03 01:30" in America/New_York -> 05:30Z

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::Error;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_timezone(name: &str) -> Result<Tz, Error> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(name.to_string()))
}

/// Parse a timestamp cell to UTC.
///
/// Accepted forms, tried in order:
/// - RFC-3339 with offset (`2023-01-01T10:00:00Z`, `2023-01-01T05:00:00-05:00`)
/// - naive `YYYY-MM-DD HH:MM[:SS[.fff]]` (space or `T`), read as wall time in `tz`
/// - bare `YYYY-MM-DD`, midnight in `tz`
pub fn parse_timestamp(text: &str, tz: Tz) -> Result<DateTime<Utc>, Error> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| Error::InvalidTimestamp {
            value: text.to_string(),
            reason: "expected RFC-3339 or YYYY-MM-DD[ HH:MM[:SS]]".to_string(),
        })?;

    from_local_naive(naive, tz).map_err(|reason| Error::InvalidTimestamp {
        value: text.to_string(),
        reason,
    })
}

/// Wall time in `tz` to UTC. Ambiguous times take the earlier instant.
fn from_local_naive(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, String> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("nonexistent local time in {tz}"))
}
