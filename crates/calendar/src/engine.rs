//! `CalendarEngine`: a calendar, the host's local zone, and a clock.
//!
//! Every operation that the free-standing [`Instant`] API takes a calendar
//! and zone for is available here with the host defaults filled in. "Now"
//! always comes from the injected [`Clock`], never from the system directly.

use auxi_domain::config::{Config, ConfigSeverity};
use auxi_domain::{Error, Result};
use chrono::Duration;

use crate::calendar::{Calendar, CalendarUnit, Gregorian};
use crate::clock::{Clock, SystemClock};
use crate::components::CalendarComponents;
use crate::instant::Instant;
use crate::parse;
use crate::schedules::{
    generate_repeating_occurrences, generate_repeating_occurrences_utc, validate_spec, ScheduleResult,
    ScheduleSpec,
};
use crate::zone::Zone;

/// Schedule defaults carried by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDefaults {
    pub include_date_components: bool,
    /// Zone the UTC export converts from; `None` means the engine's zone.
    pub utc_source: Option<Zone>,
    pub max_hour_limit: Option<i64>,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            include_date_components: false,
            utc_source: None,
            max_hour_limit: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarEngine<C = Gregorian, K = SystemClock> {
    calendar: C,
    zone: Zone,
    clock: K,
    schedule: ScheduleDefaults,
}

impl CalendarEngine<Gregorian, SystemClock> {
    /// Build a Gregorian engine on the system clock from configuration.
    /// Configuration errors (not warnings) are rejected.
    pub fn from_config(config: &Config) -> Result<Self> {
        let issues: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|issue| issue.severity == ConfigSeverity::Error)
            .map(|issue| issue.to_string())
            .collect();
        if !issues.is_empty() {
            return Err(Error::Config(issues.join("; ")));
        }

        let zone: Zone = config.calendar.timezone.parse()?;
        let utc_source = config
            .schedule
            .utc_source_timezone
            .as_deref()
            .map(str::parse::<Zone>)
            .transpose()?;

        tracing::debug!(
            timezone = %zone,
            week_start = ?config.calendar.week_start,
            "calendar engine configured"
        );

        Ok(Self {
            calendar: Gregorian::new(config.calendar.week_start.into()),
            zone,
            clock: SystemClock,
            schedule: ScheduleDefaults {
                include_date_components: config.schedule.include_date_components,
                utc_source,
                max_hour_limit: Some(config.schedule.max_hour_limit),
            },
        })
    }
}

impl<C: Calendar, K: Clock> CalendarEngine<C, K> {
    pub fn new(calendar: C, zone: Zone, clock: K) -> Self {
        Self {
            calendar,
            zone,
            clock,
            schedule: ScheduleDefaults::default(),
        }
    }

    /// Swap the clock, e.g. for a [`FixedClock`](crate::clock::FixedClock)
    /// in tests.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> CalendarEngine<C, K2> {
        CalendarEngine {
            calendar: self.calendar,
            zone: self.zone,
            clock,
            schedule: self.schedule,
        }
    }

    pub fn with_schedule_defaults(mut self, schedule: ScheduleDefaults) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // ── Components ──────────────────────────────────────────────────

    pub fn components(&self, at: Instant) -> Result<CalendarComponents> {
        at.components_in(&self.calendar, &self.zone)
    }

    /// Compose an instant from a partial breakdown. Every absent field takes
    /// the value it has "now" (per the clock) before composing.
    pub fn instant_from(&self, partial: &CalendarComponents) -> Result<Instant> {
        let now = self.components(self.now())?;
        let mut merged = partial.merged_with(&now);
        merged.weekday = None;
        self.calendar
            .instant_from(&merged, &self.zone)
            .ok_or_else(|| Error::Unresolved(format!("no instant matches {merged:?}")))
    }

    /// Today at the given time. `None` for out-of-range inputs.
    pub fn time_of_day(&self, hour: u32, minute: u32, second: u32, nanosecond: u32) -> Option<Instant> {
        if hour > 23 || minute > 59 || second > 59 || nanosecond > 999_999_999 {
            return None;
        }
        let partial = CalendarComponents {
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
            nanosecond: Some(nanosecond),
            ..CalendarComponents::default()
        };
        self.instant_from(&partial).ok()
    }

    pub fn day_number_of_week(&self, at: Instant) -> Result<u32> {
        at.day_number_of_week(&self.calendar, &self.zone)
    }

    // ── Relative to now ─────────────────────────────────────────────

    pub fn is_today(&self, at: Instant) -> bool {
        at.is_same_day(self.now(), &self.calendar, &self.zone)
    }

    pub fn is_yesterday(&self, at: Instant) -> bool {
        match self.calendar.add(-1, CalendarUnit::Day, self.now(), &self.zone) {
            Some(yesterday) => at.is_same_day(yesterday, &self.calendar, &self.zone),
            None => false,
        }
    }

    pub fn is_same_day(&self, a: Instant, b: Instant) -> bool {
        a.is_same_day(b, &self.calendar, &self.zone)
    }

    pub fn tomorrow(&self, at: Instant) -> Instant {
        at.tomorrow(&self.calendar, &self.zone)
    }

    pub fn elapsed_since(&self, start: Instant) -> Duration {
        self.now() - start
    }

    // ── Boundaries ──────────────────────────────────────────────────

    pub fn start_of_day(&self, at: Instant) -> Result<Instant> {
        at.start_of_day(&self.calendar, &self.zone)
    }

    pub fn end_of_day(&self, at: Instant) -> Result<Instant> {
        at.end_of_day(&self.calendar, &self.zone)
    }

    pub fn start_of_week(&self, at: Instant) -> Result<Instant> {
        at.start_of_week(&self.calendar, &self.zone)
    }

    pub fn end_of_week(&self, at: Instant) -> Result<Instant> {
        at.end_of_week(&self.calendar, &self.zone)
    }

    pub fn next_week(&self, at: Instant) -> Result<Instant> {
        at.next_week(&self.calendar, &self.zone)
    }

    pub fn previous_week(&self, at: Instant) -> Result<Instant> {
        at.previous_week(&self.calendar, &self.zone)
    }

    pub fn start_of_month(&self, at: Instant) -> Result<Instant> {
        at.start_of_month(&self.calendar, &self.zone)
    }

    pub fn end_of_month(&self, at: Instant) -> Result<Instant> {
        at.end_of_month(&self.calendar, &self.zone)
    }

    pub fn next_month(&self, at: Instant) -> Result<Instant> {
        at.next_month(&self.calendar, &self.zone)
    }

    pub fn previous_month(&self, at: Instant) -> Result<Instant> {
        at.previous_month(&self.calendar, &self.zone)
    }

    pub fn set_time(&self, at: Instant, hour: u32, minute: u32, second: u32) -> Option<Instant> {
        at.set_time(hour, minute, second, &self.calendar, &self.zone)
    }

    pub fn set_time_of_day(&self, at: Instant, source: Instant) -> Option<Instant> {
        at.set_time_of_day(source, &self.calendar, &self.zone)
    }

    pub fn set_date(&self, at: Instant, month: u32, day: u32, year: i32) -> Option<Instant> {
        at.set_date(month, day, year, &self.calendar, &self.zone)
    }

    // ── Differences ─────────────────────────────────────────────────

    /// Whole days from `other` to `at`.
    pub fn days_between(&self, at: Instant, other: Instant) -> Result<i64> {
        at.days_between(other, &self.calendar, &self.zone)
    }

    pub fn hours_between(&self, at: Instant, other: Instant) -> Result<i64> {
        at.hours_between(other, &self.calendar, &self.zone)
    }

    pub fn months_between(&self, at: Instant, other: Instant) -> Result<i64> {
        at.months_between(other, &self.calendar, &self.zone)
    }

    // ── Time-zone conversion ────────────────────────────────────────

    /// Shift `at` by `to − from`, both offsets sampled now.
    pub fn convert(&self, at: Instant, to: &Zone, from: &Zone) -> Instant {
        at.convert_at(to, from, self.now())
    }

    /// From the local zone to UTC.
    pub fn convert_to_utc(&self, at: Instant) -> Instant {
        self.convert(at, &Zone::UTC, &self.zone)
    }

    /// From UTC to the local zone.
    pub fn convert_to_local(&self, at: Instant) -> Instant {
        self.convert(at, &self.zone, &Zone::UTC)
    }

    // ── Parsing ─────────────────────────────────────────────────────

    /// Parse a wall-clock string in the local zone.
    pub fn parse_local(&self, raw: &str, format: &str) -> Option<Instant> {
        parse::parse_in_zone(raw, format, &self.zone)
    }

    // ── Schedules ───────────────────────────────────────────────────

    /// A `ScheduleSpec` carrying the engine's default for date components.
    pub fn schedule_spec(&self, start: Instant, interval_minutes: i64) -> ScheduleSpec {
        ScheduleSpec::new(start, interval_minutes).with_date_components(self.schedule.include_date_components)
    }

    pub fn repeating_occurrences(&self, spec: &ScheduleSpec) -> Result<ScheduleResult> {
        validate_spec(spec, self.schedule.max_hour_limit).map_err(Error::InvalidSchedule)?;
        generate_repeating_occurrences(spec, &self.calendar, &self.zone)
    }

    /// Occurrences converted to UTC from the configured source zone (the
    /// local zone unless overridden).
    pub fn repeating_occurrences_utc(&self, spec: &ScheduleSpec) -> Result<ScheduleResult> {
        let source = self.schedule.utc_source.unwrap_or(self.zone);
        self.repeating_occurrences_utc_from(spec, &source)
    }

    pub fn repeating_occurrences_utc_from(&self, spec: &ScheduleSpec, source_zone: &Zone) -> Result<ScheduleResult> {
        validate_spec(spec, self.schedule.max_hour_limit).map_err(Error::InvalidSchedule)?;
        generate_repeating_occurrences_utc(spec, &self.calendar, &self.zone, source_zone, self.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    fn engine(zone: &str, now: Instant) -> CalendarEngine<Gregorian, FixedClock> {
        CalendarEngine::new(Gregorian::default(), zone.parse().unwrap(), FixedClock::new(now))
    }

    #[test]
    fn from_config_uses_zone_and_week_start() {
        let config = Config::from_toml_str(
            r#"
[calendar]
timezone = "Europe/Berlin"
week_start = "monday"
"#,
        )
        .unwrap();
        let engine = CalendarEngine::from_config(&config).unwrap();
        assert_eq!(engine.zone().to_string(), "Europe/Berlin");
        assert_eq!(engine.calendar().first_weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn from_config_rejects_invalid_timezone() {
        let mut config = Config::default();
        config.calendar.timezone = "Nowhere/Land".into();
        assert!(matches!(CalendarEngine::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn instant_from_fills_missing_fields_from_now() {
        let e = engine("UTC", utc(2024, 6, 15, 14, 45, 12));
        let partial = CalendarComponents {
            hour: Some(9),
            minute: Some(0),
            ..CalendarComponents::default()
        };
        assert_eq!(e.instant_from(&partial).unwrap(), utc(2024, 6, 15, 9, 0, 12));
    }

    #[test]
    fn instant_from_rejects_impossible_dates() {
        let e = engine("UTC", utc(2023, 6, 15, 14, 45, 12));
        let partial = CalendarComponents {
            month: Some(2),
            day: Some(29),
            ..CalendarComponents::default()
        };
        assert!(e.instant_from(&partial).is_err());
    }

    #[test]
    fn time_of_day_is_today() {
        let e = engine("Asia/Tokyo", utc(2024, 6, 15, 20, 0, 0)); // June 16th in Tokyo
        let eight = e.time_of_day(8, 0, 0, 0).unwrap();
        assert_eq!(eight, utc(2024, 6, 15, 23, 0, 0));
        assert!(e.is_today(eight));
        assert_eq!(e.time_of_day(24, 0, 0, 0), None);
        assert_eq!(e.time_of_day(8, 60, 0, 0), None);
    }

    #[test]
    fn today_and_yesterday() {
        let e = engine("UTC", utc(2024, 3, 1, 10, 0, 0));
        assert!(e.is_today(utc(2024, 3, 1, 0, 0, 0)));
        assert!(!e.is_today(utc(2024, 2, 29, 23, 59, 59)));
        assert!(e.is_yesterday(utc(2024, 2, 29, 23, 59, 59)));
        assert!(!e.is_yesterday(utc(2024, 2, 28, 12, 0, 0)));
    }

    #[test]
    fn convert_round_trips_with_fixed_clock() {
        let e = engine("America/New_York", utc(2024, 3, 10, 6, 30, 0));
        let paris: Zone = "Europe/Paris".parse().unwrap();
        let x = utc(2024, 11, 3, 5, 30, 0);
        let there = e.convert(x, &paris, e.zone());
        assert_eq!(e.convert(there, e.zone(), &paris), x);
        assert_eq!(e.convert_to_local(e.convert_to_utc(x)), x);
    }

    #[test]
    fn elapsed_since_uses_clock() {
        let e = engine("UTC", utc(2024, 6, 15, 12, 0, 0));
        assert_eq!(e.elapsed_since(utc(2024, 6, 15, 11, 15, 0)), Duration::minutes(45));
    }

    #[test]
    fn schedule_defaults_apply() {
        let e = engine("UTC", utc(2024, 6, 15, 0, 0, 0)).with_schedule_defaults(ScheduleDefaults {
            include_date_components: true,
            utc_source: None,
            max_hour_limit: Some(12),
        });
        let spec = e.schedule_spec(utc(2024, 6, 15, 0, 0, 0), 60);
        assert!(spec.include_date_components);
        assert!(e.repeating_occurrences(&spec.with_hour_limit(13)).is_err());
        let result = e.repeating_occurrences(&spec.with_hour_limit(12)).unwrap();
        assert_eq!(result.len(), 12);
        assert_eq!(result.first().year, Some(2024));
    }

    #[test]
    fn utc_export_uses_configured_source_zone() {
        let start = utc(2024, 6, 15, 0, 0, 0);
        let e = engine("UTC", start).with_schedule_defaults(ScheduleDefaults {
            utc_source: Some(Zone::fixed(3600).unwrap()),
            ..ScheduleDefaults::default()
        });
        let result = e.repeating_occurrences_utc(&e.schedule_spec(start, 60)).unwrap();
        assert_eq!(result.len(), 24);
        assert_eq!(result.first(), &CalendarComponents::time(23, 0, 0));
    }

    #[test]
    fn parse_local_reads_host_zone() {
        let e = engine("+02:00", utc(2024, 6, 15, 0, 0, 0));
        assert_eq!(
            e.parse_local("2024/06/15 10:00:00", parse::SIMPLE_DATE_TIME),
            Some(utc(2024, 6, 15, 8, 0, 0))
        );
    }
}
