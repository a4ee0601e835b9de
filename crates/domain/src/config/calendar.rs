use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Calendar / time-zone settings
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Host calendar settings: the local zone every "current" default resolves
/// against and the first day of the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// IANA name (`America/New_York`), `UTC`/`GMT`, or a fixed offset
    /// such as `+05:30`.
    #[serde(default = "d_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub week_start: WeekStart,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: d_timezone(),
            week_start: WeekStart::default(),
        }
    }
}

fn d_timezone() -> String {
    "UTC".into()
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<WeekStart> for chrono::Weekday {
    fn from(start: WeekStart) -> Self {
        match start {
            WeekStart::Sunday => chrono::Weekday::Sun,
            WeekStart::Monday => chrono::Weekday::Mon,
            WeekStart::Tuesday => chrono::Weekday::Tue,
            WeekStart::Wednesday => chrono::Weekday::Wed,
            WeekStart::Thursday => chrono::Weekday::Thu,
            WeekStart::Friday => chrono::Weekday::Fri,
            WeekStart::Saturday => chrono::Weekday::Sat,
        }
    }
}

/// Parse a fixed UTC offset (`+05:30`, `-0800`, `+09`) into seconds east
/// of UTC. Returns `None` for anything else, including offsets of a day or
/// more.
pub fn parse_offset_seconds(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if minutes.is_empty() || minutes.len() > 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Names accepted for UTC itself, matched case-insensitively.
pub const UTC_ALIASES: &[&str] = &["utc", "gmt", "z"];

pub fn is_utc_alias(raw: &str) -> bool {
    let raw = raw.trim();
    UTC_ALIASES.iter().any(|alias| raw.eq_ignore_ascii_case(alias))
}

/// True when `raw` names a zone the calendar engine can resolve.
pub fn is_known_timezone(raw: &str) -> bool {
    let raw = raw.trim();
    is_utc_alias(raw)
        || parse_offset_seconds(raw).is_some()
        || raw.parse::<chrono_tz::Tz>().is_ok()
}
