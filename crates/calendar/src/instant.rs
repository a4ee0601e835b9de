//! The immutable point-in-time value every calendar operation works on.

use std::fmt;
use std::ops::{Add, Sub};

use auxi_domain::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::zone::Zone;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// An absolute timestamp. Never mutated: every "setter" in this crate
/// returns a new `Instant`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant(DateTime::UNIX_EPOCH);

    /// Seconds and nanoseconds since the Unix epoch. `None` when out of
    /// chrono's representable range.
    pub fn from_timestamp(secs: i64, nanos: u32) -> Option<Self> {
        DateTime::from_timestamp(secs, nanos).map(Self)
    }

    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn timestamp_subsec_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn checked_add(self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    pub fn checked_sub(self, delta: Duration) -> Option<Self> {
        self.0.checked_sub_signed(delta).map(Self)
    }

    /// Shift by the difference between the two zones' UTC offsets, both
    /// sampled at `reference`.
    ///
    /// Sampling both offsets at one reference keeps the conversion pure
    /// arithmetic: `x.convert_at(b, a, r).convert_at(a, b, r) == x` for any
    /// zones, including ones with daylight-saving transitions.
    pub fn convert_at(self, to: &Zone, from: &Zone, reference: Instant) -> Instant {
        let shift = i64::from(to.offset_seconds_at(reference))
            - i64::from(from.offset_seconds_at(reference));
        // Only the extreme ends of chrono's range can overflow here.
        self.checked_add(Duration::seconds(shift)).unwrap_or(self)
    }

    /// Shift a wall-clock-in-`from` instant so it reads as UTC, with the
    /// offset sampled at `reference`.
    pub fn convert_to_utc(self, from: &Zone, reference: Instant) -> Instant {
        self.convert_at(&Zone::UTC, from, reference)
    }

    /// Shift a wall-clock-in-UTC instant so it reads as `local`, with the
    /// offset sampled at `reference`.
    pub fn convert_to_local(self, local: &Zone, reference: Instant) -> Instant {
        self.convert_at(local, &Zone::UTC, reference)
    }

    /// Round to the nearest multiple of `precision` since the Unix epoch,
    /// ties away from zero.
    pub fn round(self, precision: Duration) -> Result<Instant> {
        let step = precision
            .num_nanoseconds()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("rounding precision must be positive, got {precision}"))
            })? as i128;

        let nanos = i128::from(self.timestamp()) * NANOS_PER_SEC
            + i128::from(self.timestamp_subsec_nanos());
        let mut quotient = nanos / step;
        let remainder = nanos % step;
        if remainder.abs() * 2 >= step {
            quotient += nanos.signum();
        }
        let rounded = quotient * step;

        let secs = i64::try_from(rounded.div_euclid(NANOS_PER_SEC))
            .map_err(|_| Error::Unresolved("rounded instant out of range".into()))?;
        let subsec = rounded.rem_euclid(NANOS_PER_SEC) as u32;
        Instant::from_timestamp(secs, subsec)
            .ok_or_else(|| Error::Unresolved("rounded instant out of range".into()))
    }

    /// Whole-second equality. Two missing instants are equal; a missing
    /// and a present one are not.
    pub fn equal_using_seconds(lhs: Option<Instant>, rhs: Option<Instant>) -> bool {
        match (lhs, rhs) {
            (None, None) => true,
            (Some(a), Some(b)) => a.timestamp() == b.timestamp(),
            _ => false,
        }
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

/// Panics on overflow, like `DateTime + Duration`.
impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0 + rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant(self.0 - rhs)
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.0.signed_duration_since(rhs.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
