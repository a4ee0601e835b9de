//! Calendar-aligned arithmetic on [`Instant`]: day, week, and month
//! boundaries, component setters, and calendar-aware differences.
//!
//! Every operation takes the calendar and zone explicitly. The
//! [`CalendarEngine`](crate::engine::CalendarEngine) supplies host defaults.

use std::ops::RangeInclusive;

use auxi_domain::{Error, Result};

use crate::calendar::{Calendar, CalendarUnit};
use crate::components::{components_match, CalendarComponents, Component, DATE_COMPONENTS};
use crate::instant::Instant;
use crate::zone::Zone;

fn unresolved(what: &str) -> Error {
    Error::Unresolved(format!("calendar could not resolve {what}"))
}

impl Instant {
    /// Full breakdown of this instant in `zone`.
    pub fn components_in<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<CalendarComponents> {
        calendar
            .components(self, zone)
            .ok_or_else(|| unresolved("components"))
    }

    // ── Day ─────────────────────────────────────────────────────────

    /// Same calendar date at `hour:minute:second.000`.
    pub fn set_time<C: Calendar + ?Sized>(
        self,
        hour: u32,
        minute: u32,
        second: u32,
        calendar: &C,
        zone: &Zone,
    ) -> Option<Instant> {
        let current = calendar.components(self, zone)?;
        let target = CalendarComponents {
            era: current.era,
            ..CalendarComponents::date_time(current.year?, current.month?, current.day?, hour, minute, second)
        };
        calendar.instant_from(&target, zone)
    }

    /// Same calendar date at the wall-clock time `source` shows in `zone`.
    pub fn set_time_of_day<C: Calendar + ?Sized>(self, source: Instant, calendar: &C, zone: &Zone) -> Option<Instant> {
        let time = calendar.components(source, zone)?;
        self.set_time(time.hour?, time.minute?, time.second?, calendar, zone)
    }

    /// Same wall-clock time on `year-month-day`. `None` when the date does
    /// not exist.
    pub fn set_date<C: Calendar + ?Sized>(
        self,
        month: u32,
        day: u32,
        year: i32,
        calendar: &C,
        zone: &Zone,
    ) -> Option<Instant> {
        let current = calendar.components(self, zone)?;
        let target = CalendarComponents {
            month: Some(month),
            day: Some(day),
            year: Some(year),
            era: None,
            weekday: None,
            ..current
        };
        calendar.instant_from(&target, zone)
    }

    /// 00:00:00.000 on the same calendar date.
    pub fn start_of_day<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        self.set_time(0, 0, 0, calendar, zone)
            .ok_or_else(|| unresolved("start of day"))
    }

    /// 23:59:59.000 on the same calendar date.
    pub fn end_of_day<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        self.set_time(23, 59, 59, calendar, zone)
            .ok_or_else(|| unresolved("end of day"))
    }

    /// One calendar day later at the same wall-clock time. Falls back to
    /// 24 hours of absolute time when the calendar cannot add a day.
    pub fn tomorrow<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Instant {
        calendar
            .add(1, CalendarUnit::Day, self, zone)
            .or_else(|| self.checked_add(chrono::Duration::days(1)))
            .unwrap_or(self)
    }

    /// Year, month, and day match in `zone`.
    pub fn is_same_day<C: Calendar + ?Sized>(self, other: Instant, calendar: &C, zone: &Zone) -> bool {
        match (calendar.components(self, zone), calendar.components(other, zone)) {
            (Some(a), Some(b)) => components_match(
                &a.restricted_to(DATE_COMPONENTS),
                &b.restricted_to(DATE_COMPONENTS),
            ),
            _ => false,
        }
    }

    /// 1 (Sunday) through 7 (Saturday).
    pub fn day_number_of_week<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<u32> {
        self.components_in(calendar, zone)?
            .weekday
            .ok_or_else(|| unresolved("weekday"))
    }

    // ── Week ────────────────────────────────────────────────────────

    /// Start of the first day of the week containing this instant, per the
    /// calendar's first weekday.
    pub fn start_of_week<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let weekday = self.day_number_of_week(calendar, zone)?;
        let first = calendar.first_weekday().number_from_sunday();
        let back = i64::from((weekday + 7 - first) % 7);
        calendar
            .add(-back, CalendarUnit::Day, self, zone)
            .ok_or_else(|| unresolved("start of week"))?
            .start_of_day(calendar, zone)
    }

    /// End of the day six days after [`Instant::start_of_week`].
    pub fn end_of_week<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let start = self.start_of_week(calendar, zone)?;
        calendar
            .add(6, CalendarUnit::Day, start, zone)
            .ok_or_else(|| unresolved("end of week"))?
            .end_of_day(calendar, zone)
    }

    /// The day after [`Instant::end_of_week`]. Measured from the boundary,
    /// not from `self`.
    pub fn next_week<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let end = self.end_of_week(calendar, zone)?;
        calendar
            .add(1, CalendarUnit::Day, end, zone)
            .ok_or_else(|| unresolved("next week"))
    }

    /// The day before [`Instant::start_of_week`].
    pub fn previous_week<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let start = self.start_of_week(calendar, zone)?;
        calendar
            .add(-1, CalendarUnit::Day, start, zone)
            .ok_or_else(|| unresolved("previous week"))
    }

    // ── Month ───────────────────────────────────────────────────────

    /// Start of day 1 of this instant's month.
    pub fn start_of_month<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let current = self.components_in(calendar, zone)?;
        let first = CalendarComponents {
            era: current.era,
            year: current.year,
            month: current.month,
            day: Some(1),
            ..CalendarComponents::default()
        };
        calendar
            .instant_from(&first, zone)
            .ok_or_else(|| unresolved("start of month"))
    }

    /// End of the last day of this instant's month.
    pub fn end_of_month<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let start = self.start_of_month(calendar, zone)?;
        let days = calendar
            .day_range(start, zone)
            .ok_or_else(|| unresolved("days in month"))?;
        calendar
            .add(i64::from(*days.end()) - 1, CalendarUnit::Day, start, zone)
            .ok_or_else(|| unresolved("end of month"))?
            .end_of_day(calendar, zone)
    }

    /// The day after [`Instant::end_of_month`].
    pub fn next_month<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let end = self.end_of_month(calendar, zone)?;
        calendar
            .add(1, CalendarUnit::Day, end, zone)
            .ok_or_else(|| unresolved("next month"))
    }

    /// The day before [`Instant::start_of_month`].
    pub fn previous_month<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Result<Instant> {
        let start = self.start_of_month(calendar, zone)?;
        calendar
            .add(-1, CalendarUnit::Day, start, zone)
            .ok_or_else(|| unresolved("previous month"))
    }

    /// Valid day numbers of this instant's month.
    pub fn days_in_month<C: Calendar + ?Sized>(self, calendar: &C, zone: &Zone) -> Option<RangeInclusive<u32>> {
        calendar.day_range(self, zone)
    }

    /// Same month and wall-clock time on `day`. `None` when `day` is outside
    /// the month's valid range.
    pub fn with_day_of_month<C: Calendar + ?Sized>(self, day: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        if !calendar.day_range(self, zone)?.contains(&day) {
            return None;
        }
        self.with_component(Component::Day, i64::from(day), calendar, zone)
    }

    // ── Component setters ───────────────────────────────────────────

    /// Replace one of year, month, day, hour, minute, or second, keeping
    /// every other field. `None` when the result does not exist.
    pub fn with_component<C: Calendar + ?Sized>(
        self,
        component: Component,
        value: i64,
        calendar: &C,
        zone: &Zone,
    ) -> Option<Instant> {
        let mut target = calendar.components(self, zone)?;
        target.weekday = None;
        match component {
            Component::Year => target.year = Some(i32::try_from(value).ok()?),
            Component::Month => target.month = Some(u32::try_from(value).ok()?),
            Component::Day => target.day = Some(u32::try_from(value).ok()?),
            Component::Hour => target.hour = Some(u32::try_from(value).ok()?),
            Component::Minute => target.minute = Some(u32::try_from(value).ok()?),
            Component::Second => target.second = Some(u32::try_from(value).ok()?),
            Component::Era | Component::Nanosecond | Component::Weekday => return None,
        }
        calendar.instant_from(&target, zone)
    }

    pub fn with_year<C: Calendar + ?Sized>(self, year: i32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Year, i64::from(year), calendar, zone)
    }

    pub fn with_month<C: Calendar + ?Sized>(self, month: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Month, i64::from(month), calendar, zone)
    }

    pub fn with_day<C: Calendar + ?Sized>(self, day: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Day, i64::from(day), calendar, zone)
    }

    pub fn with_hour<C: Calendar + ?Sized>(self, hour: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Hour, i64::from(hour), calendar, zone)
    }

    pub fn with_minute<C: Calendar + ?Sized>(self, minute: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Minute, i64::from(minute), calendar, zone)
    }

    pub fn with_second<C: Calendar + ?Sized>(self, second: u32, calendar: &C, zone: &Zone) -> Option<Instant> {
        self.with_component(Component::Second, i64::from(second), calendar, zone)
    }

    // ── Differences ─────────────────────────────────────────────────

    /// Whole calendar days from `other` to `self` (positive when `self` is
    /// later). Feb 27 → Mar 1 is 3 days in a leap year and 2 otherwise.
    pub fn days_between<C: Calendar + ?Sized>(self, other: Instant, calendar: &C, zone: &Zone) -> Result<i64> {
        difference(CalendarUnit::Day, other, self, calendar, zone)
    }

    /// Whole hours from `other` to `self`. 22:59:59.999 → 23:00:00.000 the
    /// next day is 24 hours, not 25.
    pub fn hours_between<C: Calendar + ?Sized>(self, other: Instant, calendar: &C, zone: &Zone) -> Result<i64> {
        difference(CalendarUnit::Hour, other, self, calendar, zone)
    }

    /// Whole calendar months from `other` to `self`.
    pub fn months_between<C: Calendar + ?Sized>(self, other: Instant, calendar: &C, zone: &Zone) -> Result<i64> {
        difference(CalendarUnit::Month, other, self, calendar, zone)
    }
}

/// Largest `n` (toward zero) such that `from + n units` does not pass `to`.
///
/// Starts from a duration-based estimate and corrects it with calendar
/// additions, so irregular month and day lengths are honoured.
fn difference<C: Calendar + ?Sized>(
    unit: CalendarUnit,
    from: Instant,
    to: Instant,
    calendar: &C,
    zone: &Zone,
) -> Result<i64> {
    let span = to - from;
    let mut n = match unit {
        CalendarUnit::Year | CalendarUnit::Month => {
            let a = from.components_in(calendar, zone)?;
            let b = to.components_in(calendar, zone)?;
            let months = |c: &CalendarComponents| -> Option<i64> {
                let year = i64::from(c.year?);
                let year = if c.era == Some(0) { 1 - year } else { year };
                Some(year * 12 + i64::from(c.month?))
            };
            let diff = months(&b).zip(months(&a)).map(|(b, a)| b - a)
                .ok_or_else(|| unresolved("month difference"))?;
            if unit == CalendarUnit::Year { diff / 12 } else { diff }
        }
        CalendarUnit::Week => span.num_weeks(),
        CalendarUnit::Day => span.num_days(),
        CalendarUnit::Hour => span.num_hours(),
        CalendarUnit::Minute => span.num_minutes(),
        CalendarUnit::Second => span.num_seconds(),
    };

    let step = |k: i64| {
        calendar
            .add(k, unit, from, zone)
            .ok_or_else(|| unresolved("date difference"))
    };

    if to >= from {
        while n > 0 && step(n)? > to {
            n -= 1;
        }
        while step(n + 1)? <= to {
            n += 1;
        }
    } else {
        while n < 0 && step(n)? < to {
            n += 1;
        }
        while step(n - 1)? >= to {
            n -= 1;
        }
    }
    Ok(n)
}
