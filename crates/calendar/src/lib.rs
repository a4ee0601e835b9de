//! Calendar arithmetic over absolute instants.
//!
//! An [`Instant`] is a point on the UTC timeline. Every calendar question
//! (which day, which week, how many months apart) is answered against an
//! explicit [`Calendar`] and [`Zone`]. [`CalendarEngine`] bundles both with a
//! [`Clock`] so "today" and "now" are injectable.
//!
//! Repeating schedules live in [`schedules`]: occurrences every N minutes,
//! cut off at the end of the local day or after an hour limit, optionally
//! exported as UTC fields.

mod boundaries;
pub mod calendar;
pub mod clock;
pub mod components;
pub mod engine;
pub mod instant;
pub mod interval;
pub mod parse;
pub mod schedules;
pub mod zone;

pub use auxi_domain::{Error, Result};
pub use calendar::{days_in_month, Calendar, CalendarUnit, Gregorian};
pub use clock::{Clock, FixedClock, SystemClock};
pub use components::{components_match, CalendarComponents, Component};
pub use engine::{CalendarEngine, ScheduleDefaults};
pub use instant::Instant;
pub use schedules::{
    generate_repeating_occurrences, generate_repeating_occurrences_utc, ScheduleResult, ScheduleSpec,
};
pub use zone::{parse_zone, Zone};

/// Everything needed for day-to-day use.
///
/// ```
/// use auxi_calendar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::calendar::{Calendar, CalendarUnit, Gregorian};
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::components::{components_match, CalendarComponents, Component};
    pub use crate::engine::CalendarEngine;
    pub use crate::instant::Instant;
    pub use crate::schedules::{ScheduleResult, ScheduleSpec};
    pub use crate::zone::{parse_zone, Zone};
    pub use auxi_domain::{Error, Result};
}

#[cfg(test)]
mod tests {
    #[test]
    fn prelude_exports() {
        use crate::prelude::*;
        use chrono::{TimeZone, Utc};

        let now = Instant::from(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
        let engine = CalendarEngine::new(Gregorian::default(), Zone::UTC, FixedClock::new(now));
        let start = engine.start_of_month(now).unwrap();
        assert_eq!(
            engine.components(start).unwrap().restricted_to(crate::components::DATE_COMPONENTS),
            CalendarComponents::date(2024, 2, 1)
        );
        assert!(components_match(
            &CalendarComponents::time(12, 0, 0),
            &engine.components(now).unwrap().restricted_to(crate::components::TIME_COMPONENTS),
        ));
    }
}
