//! String ↔ instant conversion with explicit formats and zones.
//!
//! Formats use chrono's `strftime` syntax. A format without time fields
//! parses to midnight in the given zone.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

use crate::instant::Instant;
use crate::zone::Zone;

/// `2019-05-09T16-35`, as written by the device log.
pub const LOG_TIMESTAMP: &str = "%Y-%m-%dT%H-%M";
pub const RFC3339_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
pub const RFC3339_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f";
pub const SIMPLE_DATE_TIME: &str = "%Y/%m/%d %H:%M:%S";
/// `2019/05/09T16:35:00`
pub const ISO8601_SLASHED: &str = "%Y/%m/%dT%H:%M:%S";
/// `November 1, 1990`
pub const LONG_DATE: &str = "%B %d, %Y";

/// Parse `raw` as a wall-clock time in `zone`.
pub fn parse_in_zone(raw: &str, format: &str, zone: &Zone) -> Option<Instant> {
    let naive = NaiveDateTime::parse_from_str(raw, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    zone.from_local(&naive)
}

pub fn parse_utc(raw: &str, format: &str) -> Option<Instant> {
    parse_in_zone(raw, format, &Zone::UTC)
}

pub fn from_log_timestamp(raw: &str) -> Option<Instant> {
    parse_utc(raw, LOG_TIMESTAMP)
}

pub fn from_iso_timestamp(raw: &str) -> Option<Instant> {
    parse_utc(raw, ISO8601_SLASHED)
}

pub fn parse_long_date(raw: &str, zone: &Zone) -> Option<Instant> {
    parse_in_zone(raw, LONG_DATE, zone)
}

/// Render `at` as read in `zone`. `None` when `format` is not a valid
/// `strftime` string.
pub fn format_in_zone(at: Instant, format: &str, zone: &Zone) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", zone.to_local(at).format(format)).ok()?;
    Some(out)
}
