use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Repeating schedule defaults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hard upper bound on any schedule's hour limit (one leap year), applied
/// whatever `max_hour_limit` says.
pub const HOUR_LIMIT_CEILING: i64 = 366 * 24;

/// Defaults applied when building repeating schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Emit year/month/day alongside hour/minute/second.
    #[serde(default)]
    pub include_date_components: bool,
    /// Zone the UTC-exporting generator converts from. Falls back to the
    /// calendar zone when unset.
    #[serde(default)]
    pub utc_source_timezone: Option<String>,
    /// Largest hour limit a schedule may request.
    #[serde(default = "default_max_hour_limit")]
    pub max_hour_limit: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            include_date_components: false,
            utc_source_timezone: None,
            max_hour_limit: default_max_hour_limit(),
        }
    }
}

fn default_max_hour_limit() -> i64 {
    24 * 7
}
