//! Time zones: UTC, fixed offsets, and IANA zones backed by `chrono-tz`.

use std::fmt;
use std::str::FromStr;

use auxi_domain::config::{is_utc_alias, parse_offset_seconds};
use auxi_domain::trace::TraceEvent;
use auxi_domain::Error;
use chrono::{Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::instant::Instant;

/// A time zone the calendar can resolve wall-clock times against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    pub const UTC: Zone = Zone::Named(chrono_tz::UTC);

    /// Fixed offset in seconds east of UTC. `None` for offsets of a day or
    /// more.
    pub fn fixed(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Zone::Fixed)
    }

    /// UTC offset in effect at `at`, in seconds east of UTC.
    pub fn offset_seconds_at(&self, at: Instant) -> i32 {
        match self {
            Zone::Fixed(offset) => offset.local_minus_utc(),
            Zone::Named(tz) => tz
                .offset_from_utc_datetime(&at.as_utc().naive_utc())
                .fix()
                .local_minus_utc(),
        }
    }

    /// Wall-clock reading of `at` in this zone.
    pub fn to_local(&self, at: Instant) -> NaiveDateTime {
        match self {
            Zone::Fixed(offset) => at.as_utc().with_timezone(offset).naive_local(),
            Zone::Named(tz) => at.as_utc().with_timezone(tz).naive_local(),
        }
    }

    /// Resolve a wall-clock time to an instant.
    ///
    /// - Fall-back overlaps: the earliest (pre-transition) mapping is chosen.
    /// - Spring-forward gaps: the time is pushed forward by the length of the
    ///   gap (02:30 in a one-hour gap starting at 02:00 becomes 03:30).
    pub fn from_local(&self, local: &NaiveDateTime) -> Option<Instant> {
        match self {
            Zone::Fixed(offset) => resolve(offset.from_local_datetime(local)),
            Zone::Named(tz) => match tz.from_local_datetime(local) {
                LocalResult::None => {
                    let probe = local.checked_sub_signed(Duration::days(1))?;
                    let before = tz.offset_from_utc_datetime(&probe).fix().local_minus_utc();
                    let utc = local.checked_sub_signed(Duration::seconds(i64::from(before)))?;
                    Some(Instant::from(utc.and_utc()))
                }
                other => resolve(other),
            },
        }
    }

    pub fn is_utc(&self) -> bool {
        match self {
            Zone::Fixed(offset) => offset.local_minus_utc() == 0,
            Zone::Named(tz) => *tz == chrono_tz::UTC,
        }
    }
}

fn resolve<T: TimeZone>(result: LocalResult<chrono::DateTime<T>>) -> Option<Instant> {
    match result {
        LocalResult::Single(dt) => Some(Instant::from(dt.with_timezone(&chrono::Utc))),
        LocalResult::Ambiguous(earliest, _) => Some(Instant::from(earliest.with_timezone(&chrono::Utc))),
        LocalResult::None => None,
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::UTC
    }
}

impl FromStr for Zone {
    type Err = Error;

    /// Accepts `UTC`/`GMT`/`Z`, fixed offsets (`+05:30`, `-0800`), and IANA
    /// names (`America/New_York`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if is_utc_alias(trimmed) {
            return Ok(Zone::UTC);
        }
        if let Some(zone) = parse_offset_seconds(trimmed).and_then(Zone::fixed) {
            return Ok(zone);
        }
        trimmed
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| Error::InvalidTimezone(raw.to_string()))
    }
}

/// Parse a zone string, falling back to UTC when it is not recognised.
pub fn parse_zone(raw: &str) -> Zone {
    match raw.parse::<Zone>() {
        Ok(zone) => zone,
        Err(_) => {
            tracing::warn!(timezone = raw, "unknown timezone, falling back to UTC");
            TraceEvent::ZoneFallback {
                requested: raw.to_string(),
                fallback: Zone::UTC.to_string(),
            }
            .emit();
            Zone::UTC
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(offset) => write!(f, "{offset}"),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
