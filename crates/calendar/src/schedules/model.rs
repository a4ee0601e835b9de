//! Schedule data model.

use serde::{Deserialize, Serialize};

use crate::components::{CalendarComponents, Component, DATE_TIME_COMPONENTS, TIME_COMPONENTS};
use crate::instant::Instant;

/// Input for a repeating schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    pub start: Instant,
    /// Minutes between occurrences. Must be positive.
    pub interval_minutes: i64,
    /// Emit year/month/day as well as hour/minute/second.
    #[serde(default)]
    pub include_date_components: bool,
    /// Stop before `start + hour_limit` hours instead of at the end of the
    /// start's local day.
    #[serde(default)]
    pub hour_limit: Option<i64>,
}

impl ScheduleSpec {
    pub fn new(start: Instant, interval_minutes: i64) -> Self {
        Self {
            start,
            interval_minutes,
            include_date_components: false,
            hour_limit: None,
        }
    }

    pub fn with_date_components(mut self, include: bool) -> Self {
        self.include_date_components = include;
        self
    }

    pub fn with_hour_limit(mut self, hours: i64) -> Self {
        self.hour_limit = Some(hours);
        self
    }

    /// Fields every emitted occurrence carries.
    pub fn component_mask(&self) -> &'static [Component] {
        if self.include_date_components {
            DATE_TIME_COMPONENTS
        } else {
            TIME_COMPONENTS
        }
    }
}

/// Chronologically ordered occurrences. Always holds at least the start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScheduleResult {
    occurrences: Vec<CalendarComponents>,
}

impl ScheduleResult {
    pub(crate) fn starting_with(first: CalendarComponents) -> Self {
        Self {
            occurrences: vec![first],
        }
    }

    pub(crate) fn push(&mut self, occurrence: CalendarComponents) {
        self.occurrences.push(occurrence);
    }

    /// The start occurrence.
    pub fn first(&self) -> &CalendarComponents {
        &self.occurrences[0]
    }

    pub fn last(&self) -> &CalendarComponents {
        &self.occurrences[self.occurrences.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// A result always holds the start occurrence, so this is `false`.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarComponents> {
        self.occurrences.iter()
    }

    pub fn as_slice(&self) -> &[CalendarComponents] {
        &self.occurrences
    }

    pub fn into_vec(self) -> Vec<CalendarComponents> {
        self.occurrences
    }
}

impl<'a> IntoIterator for &'a ScheduleResult {
    type Item = &'a CalendarComponents;
    type IntoIter = std::slice::Iter<'a, CalendarComponents>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.iter()
    }
}

impl IntoIterator for ScheduleResult {
    type Item = CalendarComponents;
    type IntoIter = std::vec::IntoIter<CalendarComponents>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let spec = ScheduleSpec::new(Instant::UNIX_EPOCH, 15)
            .with_date_components(true)
            .with_hour_limit(3);
        assert_eq!(spec.interval_minutes, 15);
        assert!(spec.include_date_components);
        assert_eq!(spec.hour_limit, Some(3));
        assert_eq!(spec.component_mask(), DATE_TIME_COMPONENTS);
    }

    #[test]
    fn default_mask_is_time_only() {
        let spec = ScheduleSpec::new(Instant::UNIX_EPOCH, 15);
        assert_eq!(spec.component_mask(), TIME_COMPONENTS);
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let json = r#"{"start":"2024-06-15T00:00:00Z","interval_minutes":30}"#;
        let spec: ScheduleSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.interval_minutes, 30);
        assert!(!spec.include_date_components);
        assert_eq!(spec.hour_limit, None);
    }

    #[test]
    fn result_accessors() {
        let mut result = ScheduleResult::starting_with(CalendarComponents::time(0, 0, 0));
        result.push(CalendarComponents::time(1, 0, 0));
        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.first().hour, Some(0));
        assert_eq!(result.last().hour, Some(1));
        let hours: Vec<_> = result.iter().filter_map(|c| c.hour).collect();
        assert_eq!(hours, vec![0, 1]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.is_array());
    }
}
