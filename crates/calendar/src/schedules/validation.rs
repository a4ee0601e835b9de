//! Input validation for schedule fields (intervals, hour limits, timezones).

use auxi_domain::config::HOUR_LIMIT_CEILING;

use super::model::ScheduleSpec;

/// Validate an IANA timezone, `UTC`, or fixed-offset string.
pub fn validate_timezone(tz: &str) -> Result<(), String> {
    if tz.parse::<crate::zone::Zone>().is_err() {
        Err(format!(
            "invalid timezone: '{}'; use IANA names like 'America/New_York', 'UTC', or an offset like '+05:30'",
            tz
        ))
    } else {
        Ok(())
    }
}

/// The repeat interval must be a positive number of minutes.
pub fn validate_interval(minutes: i64) -> Result<(), String> {
    if minutes <= 0 {
        return Err(format!("interval must be a positive number of minutes, got {}", minutes));
    }
    Ok(())
}

/// Hour limits may be zero (start only) but not negative. They must not
/// exceed `max` when one is given, nor [`HOUR_LIMIT_CEILING`] in any case.
pub fn validate_hour_limit(hours: i64, max: Option<i64>) -> Result<(), String> {
    if hours < 0 {
        return Err(format!("hour limit must not be negative, got {}", hours));
    }
    if hours > HOUR_LIMIT_CEILING {
        return Err(format!(
            "hour limit {} exceeds the ceiling of {} hours",
            hours, HOUR_LIMIT_CEILING
        ));
    }
    if let Some(max) = max {
        if hours > max {
            return Err(format!("hour limit {} exceeds the maximum of {}", hours, max));
        }
    }
    Ok(())
}

/// Validate every field of a schedule spec.
pub fn validate_spec(spec: &ScheduleSpec, max_hour_limit: Option<i64>) -> Result<(), String> {
    validate_interval(spec.interval_minutes)?;
    if let Some(hours) = spec.hour_limit {
        validate_hour_limit(hours, max_hour_limit)?;
    }
    Ok(())
}
