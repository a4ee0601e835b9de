//! Repeating schedules: evenly spaced occurrences from a start instant,
//! cut off at the end of the start's local day or after an hour limit.
//!
//! Split into submodules:
//! - [`model`]: `ScheduleSpec` input and `ScheduleResult` output
//! - [`generator`]: occurrence generation, local or exported as UTC
//! - [`validation`]: input validation (intervals, hour limits, timezones)

pub mod generator;
pub mod model;
pub mod validation;

pub use generator::{generate_repeating_occurrences, generate_repeating_occurrences_utc};
pub use model::{ScheduleResult, ScheduleSpec};
pub use validation::{validate_hour_limit, validate_interval, validate_spec, validate_timezone};
