//! Partial calendar breakdowns of an instant.

use serde::{Deserialize, Serialize};

/// A single calendar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Era,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Nanosecond,
    Weekday,
}

/// Hour, minute, and second only.
pub const TIME_COMPONENTS: &[Component] = &[Component::Hour, Component::Minute, Component::Second];

/// Year, month, day, hour, minute, and second.
pub const DATE_TIME_COMPONENTS: &[Component] = &[
    Component::Year,
    Component::Month,
    Component::Day,
    Component::Hour,
    Component::Minute,
    Component::Second,
];

/// Year, month, and day.
pub const DATE_COMPONENTS: &[Component] = &[Component::Year, Component::Month, Component::Day];

/// Every field a calendar can produce.
pub const ALL_COMPONENTS: &[Component] = &[
    Component::Era,
    Component::Year,
    Component::Month,
    Component::Day,
    Component::Hour,
    Component::Minute,
    Component::Second,
    Component::Nanosecond,
    Component::Weekday,
];

/// A partial breakdown of an instant. Absent fields are `None`, never zero.
///
/// `weekday` counts from 1 (Sunday) to 7 (Saturday). `era` is 1 for the
/// common era and 0 before it; `year` is then counted within the era.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanosecond: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u32>,
}

impl CalendarComponents {
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..Self::default()
        }
    }

    pub fn time(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
            ..Self::default()
        }
    }

    pub fn date_time(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
            ..Self::date(year, month, day)
        }
    }

    pub fn get(&self, component: Component) -> Option<i64> {
        match component {
            Component::Era => self.era.map(i64::from),
            Component::Year => self.year.map(i64::from),
            Component::Month => self.month.map(i64::from),
            Component::Day => self.day.map(i64::from),
            Component::Hour => self.hour.map(i64::from),
            Component::Minute => self.minute.map(i64::from),
            Component::Second => self.second.map(i64::from),
            Component::Nanosecond => self.nanosecond.map(i64::from),
            Component::Weekday => self.weekday.map(i64::from),
        }
    }

    /// Keep only the fields named in `mask`; the rest become `None`.
    pub fn restricted_to(&self, mask: &[Component]) -> Self {
        let keep = |c: Component| mask.contains(&c);
        Self {
            era: self.era.filter(|_| keep(Component::Era)),
            year: self.year.filter(|_| keep(Component::Year)),
            month: self.month.filter(|_| keep(Component::Month)),
            day: self.day.filter(|_| keep(Component::Day)),
            hour: self.hour.filter(|_| keep(Component::Hour)),
            minute: self.minute.filter(|_| keep(Component::Minute)),
            second: self.second.filter(|_| keep(Component::Second)),
            nanosecond: self.nanosecond.filter(|_| keep(Component::Nanosecond)),
            weekday: self.weekday.filter(|_| keep(Component::Weekday)),
        }
    }

    /// Fill every absent field from `fallback`. Present fields win.
    ///
    /// This is the explicit "defaults to the current value" step: callers
    /// pass the breakdown of "now" as the fallback.
    pub fn merged_with(&self, fallback: &CalendarComponents) -> Self {
        Self {
            era: self.era.or(fallback.era),
            year: self.year.or(fallback.year),
            month: self.month.or(fallback.month),
            day: self.day.or(fallback.day),
            hour: self.hour.or(fallback.hour),
            minute: self.minute.or(fallback.minute),
            second: self.second.or(fallback.second),
            nanosecond: self.nanosecond.or(fallback.nanosecond),
            weekday: self.weekday.or(fallback.weekday),
        }
    }

    /// See [`components_match`].
    pub fn matches(&self, other: &CalendarComponents) -> bool {
        components_match(self, other)
    }

    fn ymd(&self) -> Option<(i32, u32, u32)> {
        Some((self.year?, self.month?, self.day?))
    }

    fn hms(&self) -> Option<(u32, u32, u32)> {
        Some((self.hour?, self.minute?, self.second?))
    }
}

/// Two-tier equality.
///
/// When both sides carry year, month, and day, only those are compared.
/// Otherwise, when both carry hour, minute, and second, those are compared.
/// Anything else is `false`. Callers needing strict equality must supply the
/// date fields.
pub fn components_match(lhs: &CalendarComponents, rhs: &CalendarComponents) -> bool {
    if let (Some(l), Some(r)) = (lhs.ymd(), rhs.ymd()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (lhs.hms(), rhs.hms()) {
        return l == r;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_date_matches_despite_different_time() {
        let a = CalendarComponents::date_time(2024, 6, 15, 8, 0, 0);
        let b = CalendarComponents::date_time(2024, 6, 15, 23, 59, 59);
        assert!(components_match(&a, &b));
    }

    #[test]
    fn different_date_does_not_fall_back_to_time() {
        let a = CalendarComponents::date_time(2024, 6, 15, 8, 0, 0);
        let b = CalendarComponents::date_time(2024, 6, 16, 8, 0, 0);
        assert!(!components_match(&a, &b));
    }

    #[test]
    fn time_tier_used_when_date_missing() {
        let a = CalendarComponents::time(8, 30, 0);
        let b = CalendarComponents::date_time(2024, 6, 16, 8, 30, 0);
        assert!(components_match(&a, &b));
        assert!(!components_match(&a, &CalendarComponents::time(8, 30, 1)));
    }

    #[test]
    fn nothing_comparable_is_false() {
        let a = CalendarComponents::date(2024, 6, 15);
        let b = CalendarComponents::time(8, 30, 0);
        assert!(!components_match(&a, &b));
        assert!(!components_match(&CalendarComponents::default(), &CalendarComponents::default()));
    }

    #[test]
    fn restriction_leaves_other_fields_unset() {
        let full = CalendarComponents {
            era: Some(1),
            nanosecond: Some(5),
            weekday: Some(7),
            ..CalendarComponents::date_time(2024, 6, 15, 8, 30, 10)
        };
        let time = full.restricted_to(TIME_COMPONENTS);
        assert_eq!(time, CalendarComponents::time(8, 30, 10));
        assert_eq!(time.year, None);
        assert_eq!(full.restricted_to(DATE_COMPONENTS), CalendarComponents::date(2024, 6, 15));
        assert_eq!(full.restricted_to(ALL_COMPONENTS), full);
    }

    #[test]
    fn merge_prefers_present_fields() {
        let partial = CalendarComponents {
            hour: Some(9),
            ..CalendarComponents::default()
        };
        let now = CalendarComponents::date_time(2024, 6, 15, 14, 45, 12);
        let merged = partial.merged_with(&now);
        assert_eq!(merged, CalendarComponents::date_time(2024, 6, 15, 9, 45, 12));
    }

    #[test]
    fn get_reads_single_fields() {
        let c = CalendarComponents::date(2024, 2, 29);
        assert_eq!(c.get(Component::Month), Some(2));
        assert_eq!(c.get(Component::Hour), None);
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let json = serde_json::to_value(CalendarComponents::time(1, 2, 3)).unwrap();
        assert_eq!(json, serde_json::json!({"hour": 1, "minute": 2, "second": 3}));
    }
}
