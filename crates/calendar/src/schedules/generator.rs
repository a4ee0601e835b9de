//! Repeating-occurrence generator.
//!
//! Occurrences advance by exactly `interval_minutes` of absolute time. The
//! cutoff is either `start + hour_limit` (exclusive) or the end of the
//! start's local calendar day. The local-day cutoff always reads the
//! unconverted instant, even when the emitted components are exported as
//! UTC: the schedule ends at local midnight whatever the export format.

use auxi_domain::trace::TraceEvent;
use auxi_domain::{Error, Result};

use super::model::{ScheduleResult, ScheduleSpec};
use super::validation::validate_spec;
use crate::calendar::{Calendar, CalendarUnit};
use crate::components::CalendarComponents;
use crate::instant::Instant;
use crate::zone::Zone;

/// Generate occurrences as local components in `zone`.
///
/// Hour limits are checked against
/// [`HOUR_LIMIT_CEILING`](auxi_domain::config::HOUR_LIMIT_CEILING) only; the
/// engine also applies the configured `max_hour_limit`.
pub fn generate_repeating_occurrences<C: Calendar + ?Sized>(
    spec: &ScheduleSpec,
    calendar: &C,
    zone: &Zone,
) -> Result<ScheduleResult> {
    generate(spec, calendar, zone, None)
}

/// Generate occurrences whose components are shifted from `source_zone` to
/// UTC, so a scheduler that stores UTC fields fires at the intended local
/// times. Offsets are sampled at `reference` (usually "now").
pub fn generate_repeating_occurrences_utc<C: Calendar + ?Sized>(
    spec: &ScheduleSpec,
    calendar: &C,
    zone: &Zone,
    source_zone: &Zone,
    reference: Instant,
) -> Result<ScheduleResult> {
    let export = UtcExport {
        source: source_zone,
        reference,
    };
    generate(spec, calendar, zone, Some(export))
}

#[derive(Clone, Copy)]
struct UtcExport<'a> {
    source: &'a Zone,
    reference: Instant,
}

/// When generation stops.
enum Cutoff {
    /// Strictly before this instant.
    Before(Instant),
    /// While the local date (era, year, month, day) is unchanged.
    SameLocalDay(CalendarComponents),
}

fn local_date<C: Calendar + ?Sized>(calendar: &C, at: Instant, zone: &Zone) -> Option<CalendarComponents> {
    let c = calendar.components(at, zone)?;
    c.day?;
    Some(CalendarComponents {
        era: c.era,
        year: c.year,
        month: c.month,
        day: c.day,
        ..CalendarComponents::default()
    })
}

fn truncated(emitted: usize, reason: &str) {
    tracing::warn!(emitted, reason, "repeating schedule truncated");
    TraceEvent::ScheduleTruncated {
        emitted,
        reason: reason.to_string(),
    }
    .emit();
}

fn generate<C: Calendar + ?Sized>(
    spec: &ScheduleSpec,
    calendar: &C,
    zone: &Zone,
    export: Option<UtcExport<'_>>,
) -> Result<ScheduleResult> {
    validate_spec(spec, None).map_err(Error::InvalidSchedule)?;

    let mask = spec.component_mask();
    let emit = |at: Instant| -> Option<CalendarComponents> {
        let target = match export {
            Some(e) => at.convert_at(&Zone::UTC, e.source, e.reference),
            None => at,
        };
        calendar.components(target, zone).map(|c| c.restricted_to(mask))
    };

    let first = emit(spec.start)
        .ok_or_else(|| Error::Unresolved("components of schedule start".into()))?;
    let mut result = ScheduleResult::starting_with(first);

    let start_day = local_date(calendar, spec.start, zone)
        .ok_or_else(|| Error::Unresolved("local date of schedule start".into()))?;
    let cutoff = match spec.hour_limit {
        Some(hours) => match calendar.add(hours, CalendarUnit::Hour, spec.start, zone) {
            Some(end) => Cutoff::Before(end),
            None => {
                tracing::warn!(hours, "hour limit unresolved, cutting off at end of local day");
                Cutoff::SameLocalDay(start_day)
            }
        },
        None => Cutoff::SameLocalDay(start_day),
    };

    let mut cursor = calendar.add(spec.interval_minutes, CalendarUnit::Minute, spec.start, zone);
    loop {
        let Some(at) = cursor else {
            truncated(result.len(), "could not advance by the interval");
            break;
        };
        let within = match &cutoff {
            Cutoff::Before(end) => at < *end,
            Cutoff::SameLocalDay(day) => match local_date(calendar, at, zone) {
                Some(current) => current == *day,
                None => {
                    truncated(result.len(), "local date unresolved");
                    break;
                }
            },
        };
        if !within {
            break;
        }
        match emit(at) {
            Some(occurrence) => result.push(occurrence),
            None => {
                truncated(result.len(), "components unresolved");
                break;
            }
        }
        cursor = calendar.add(spec.interval_minutes, CalendarUnit::Minute, at, zone);
    }

    tracing::debug!(
        occurrences = result.len(),
        interval_minutes = spec.interval_minutes,
        utc = export.is_some(),
        "generated repeating schedule"
    );
    TraceEvent::ScheduleGenerated {
        occurrences: result.len(),
        interval_minutes: spec.interval_minutes,
        hour_limit: spec.hour_limit,
        utc: export.is_some(),
    }
    .emit();

    Ok(result)
}
