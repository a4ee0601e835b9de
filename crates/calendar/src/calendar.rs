//! The calendar capability the engine computes against.
//!
//! Everything calendar-specific (week boundaries, month lengths, leap
//! rules) sits behind [`Calendar`], so boundary and schedule logic can be
//! exercised against any implementation. [`Gregorian`] is the
//! chrono-backed default.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::components::CalendarComponents;
use crate::instant::Instant;
use crate::zone::Zone;

/// Units calendar arithmetic can advance by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

pub trait Calendar: Send + Sync {
    /// First day of the week.
    fn first_weekday(&self) -> Weekday;

    /// Full breakdown of `instant` as read in `zone`.
    fn components(&self, instant: Instant, zone: &Zone) -> Option<CalendarComponents>;

    /// Compose an instant from components read in `zone`. `year` is
    /// required; a missing month or day defaults to 1 and missing time
    /// fields to 0. Out-of-range fields yield `None`.
    fn instant_from(&self, components: &CalendarComponents, zone: &Zone) -> Option<Instant>;

    /// Advance `instant` by `amount` units (negative goes back).
    fn add(&self, amount: i64, unit: CalendarUnit, instant: Instant, zone: &Zone) -> Option<Instant>;

    /// Valid day-of-month numbers for the month containing `instant`.
    fn day_range(&self, instant: Instant, zone: &Zone) -> Option<RangeInclusive<u32>>;
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn first_weekday(&self) -> Weekday {
        (**self).first_weekday()
    }

    fn components(&self, instant: Instant, zone: &Zone) -> Option<CalendarComponents> {
        (**self).components(instant, zone)
    }

    fn instant_from(&self, components: &CalendarComponents, zone: &Zone) -> Option<Instant> {
        (**self).instant_from(components, zone)
    }

    fn add(&self, amount: i64, unit: CalendarUnit, instant: Instant, zone: &Zone) -> Option<Instant> {
        (**self).add(amount, unit, instant, zone)
    }

    fn day_range(&self, instant: Instant, zone: &Zone) -> Option<RangeInclusive<u32>> {
        (**self).day_range(instant, zone)
    }
}

/// Proleptic Gregorian calendar.
///
/// Calendar units (years through days) keep the wall-clock time and clamp
/// the day to the end of a shorter month; clock units (hours and below)
/// advance absolute time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gregorian {
    first_weekday: Weekday,
}

impl Gregorian {
    pub fn new(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    /// Weeks start on Monday.
    pub fn iso() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl Default for Gregorian {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl Calendar for Gregorian {
    fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    fn components(&self, instant: Instant, zone: &Zone) -> Option<CalendarComponents> {
        let local = zone.to_local(instant);
        let (era, year) = if local.year() >= 1 {
            (1, local.year())
        } else {
            (0, 1 - local.year())
        };
        Some(CalendarComponents {
            era: Some(era),
            year: Some(year),
            month: Some(local.month()),
            day: Some(local.day()),
            hour: Some(local.hour()),
            minute: Some(local.minute()),
            second: Some(local.second()),
            nanosecond: Some(local.nanosecond()),
            weekday: Some(local.weekday().number_from_sunday()),
        })
    }

    fn instant_from(&self, components: &CalendarComponents, zone: &Zone) -> Option<Instant> {
        let year = match components.era {
            Some(0) => 1 - components.year?,
            _ => components.year?,
        };
        let date = NaiveDate::from_ymd_opt(year, components.month.unwrap_or(1), components.day.unwrap_or(1))?;
        let time = NaiveTime::from_hms_nano_opt(
            components.hour.unwrap_or(0),
            components.minute.unwrap_or(0),
            components.second.unwrap_or(0),
            components.nanosecond.unwrap_or(0),
        )?;
        zone.from_local(&NaiveDateTime::new(date, time))
    }

    fn add(&self, amount: i64, unit: CalendarUnit, instant: Instant, zone: &Zone) -> Option<Instant> {
        let wall = |local: NaiveDateTime| zone.from_local(&local);
        match unit {
            CalendarUnit::Year => add_months(zone.to_local(instant), amount.checked_mul(12)?).and_then(wall),
            CalendarUnit::Month => add_months(zone.to_local(instant), amount).and_then(wall),
            CalendarUnit::Week => add_days(zone.to_local(instant), amount.checked_mul(7)?).and_then(wall),
            CalendarUnit::Day => add_days(zone.to_local(instant), amount).and_then(wall),
            CalendarUnit::Hour => instant.checked_add(Duration::try_hours(amount)?),
            CalendarUnit::Minute => instant.checked_add(Duration::try_minutes(amount)?),
            CalendarUnit::Second => instant.checked_add(Duration::try_seconds(amount)?),
        }
    }

    fn day_range(&self, instant: Instant, zone: &Zone) -> Option<RangeInclusive<u32>> {
        let local = zone.to_local(instant);
        Some(1..=days_in_month(local.year(), local.month())?)
    }
}

fn add_months(local: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        local.checked_add_months(months)
    } else {
        local.checked_sub_months(months)
    }
}

fn add_days(local: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let days = Days::new(amount.unsigned_abs());
    if amount >= 0 {
        local.checked_add_days(days)
    } else {
        local.checked_sub_days(days)
    }
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn month_lengths_and_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn components_round_trip() {
        let cal = Gregorian::default();
        let zone: Zone = "Europe/Paris".parse().unwrap();
        let x = utc(2024, 6, 15, 10, 20, 30);
        let c = cal.components(x, &zone).unwrap();
        assert_eq!(c.hour, Some(12));
        assert_eq!(c.weekday, Some(7)); // Saturday
        assert_eq!(c.era, Some(1));
        assert_eq!(cal.instant_from(&c, &zone), Some(x));
    }

    #[test]
    fn compose_rejects_out_of_range_fields() {
        let cal = Gregorian::default();
        assert_eq!(cal.instant_from(&CalendarComponents::date(2023, 2, 29), &Zone::UTC), None);
        assert_eq!(cal.instant_from(&CalendarComponents::date_time(2024, 1, 1, 24, 0, 0), &Zone::UTC), None);
        assert_eq!(cal.instant_from(&CalendarComponents::time(8, 0, 0), &Zone::UTC), None);
    }

    #[test]
    fn compose_defaults_missing_low_fields() {
        let cal = Gregorian::default();
        let c = CalendarComponents {
            year: Some(2024),
            month: Some(3),
            ..CalendarComponents::default()
        };
        assert_eq!(cal.instant_from(&c, &Zone::UTC), Some(utc(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn before_common_era() {
        let cal = Gregorian::default();
        let c = CalendarComponents {
            era: Some(0),
            ..CalendarComponents::date(1, 1, 1)
        };
        let x = cal.instant_from(&c, &Zone::UTC).unwrap();
        let back = cal.components(x, &Zone::UTC).unwrap();
        assert_eq!(back.era, Some(0));
        assert_eq!(back.year, Some(1));
    }

    #[test]
    fn add_month_clamps_to_month_end() {
        let cal = Gregorian::default();
        let x = utc(2024, 1, 31, 9, 0, 0);
        assert_eq!(cal.add(1, CalendarUnit::Month, x, &Zone::UTC), Some(utc(2024, 2, 29, 9, 0, 0)));
        assert_eq!(cal.add(-2, CalendarUnit::Month, x, &Zone::UTC), Some(utc(2023, 11, 30, 9, 0, 0)));
        assert_eq!(cal.add(1, CalendarUnit::Year, utc(2024, 2, 29, 0, 0, 0), &Zone::UTC), Some(utc(2025, 2, 28, 0, 0, 0)));
    }

    #[test]
    fn add_day_keeps_wall_clock_across_dst() {
        let cal = Gregorian::default();
        let ny: Zone = "America/New_York".parse().unwrap();
        // 2024-03-09 09:00 EST
        let x = utc(2024, 3, 9, 14, 0, 0);
        let next = cal.add(1, CalendarUnit::Day, x, &ny).unwrap();
        // 2024-03-10 09:00 EDT
        assert_eq!(next, utc(2024, 3, 10, 13, 0, 0));
        assert_eq!(next - x, Duration::hours(23));
    }

    #[test]
    fn add_hour_is_absolute() {
        let cal = Gregorian::default();
        let ny: Zone = "America/New_York".parse().unwrap();
        let x = utc(2024, 3, 10, 6, 30, 0); // 01:30 EST
        let next = cal.add(1, CalendarUnit::Hour, x, &ny).unwrap();
        assert_eq!(next - x, Duration::hours(1));
        assert_eq!(ny.to_local(next).hour(), 3);
    }

    #[test]
    fn day_range_follows_local_month() {
        let cal = Gregorian::default();
        let tokyo: Zone = "Asia/Tokyo".parse().unwrap();
        // 2024-01-31 20:00 UTC is already February 1st in Tokyo.
        let x = utc(2024, 1, 31, 20, 0, 0);
        assert_eq!(cal.day_range(x, &tokyo), Some(1..=29));
        assert_eq!(cal.day_range(x, &Zone::UTC), Some(1..=31));
    }

    #[test]
    fn week_start_is_configurable() {
        assert_eq!(Gregorian::default().first_weekday(), Weekday::Sun);
        assert_eq!(Gregorian::iso().first_weekday(), Weekday::Mon);
    }
}
