//! Duration constructors from fractional days, hours, and minutes.
//!
//! Units simply add up: `from_days(1.0, Some(22.0), Some(120.0))` is 48
//! hours.

use chrono::Duration;

pub fn from_days(days: f64, hours: Option<f64>, minutes: Option<f64>) -> Duration {
    from_hours(days * 24.0 + hours.unwrap_or(0.0), minutes)
}

pub fn from_hours(hours: f64, minutes: Option<f64>) -> Duration {
    from_minutes(hours * 60.0 + minutes.unwrap_or(0.0))
}

/// Saturates at roughly ±292 years.
pub fn from_minutes(minutes: f64) -> Duration {
    Duration::nanoseconds((minutes * 60.0 * 1e9).round() as i64)
}
