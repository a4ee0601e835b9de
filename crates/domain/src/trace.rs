use serde::Serialize;

/// Structured trace events emitted across the auxi crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    ScheduleGenerated {
        occurrences: usize,
        interval_minutes: i64,
        hour_limit: Option<i64>,
        utc: bool,
    },
    ScheduleTruncated {
        emitted: usize,
        reason: String,
    },
    ConfigLoaded {
        path: String,
        from_file: bool,
        timezone: String,
    },
    ZoneFallback {
        requested: String,
        fallback: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "auxi_event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let event = TraceEvent::ScheduleTruncated {
            emitted: 3,
            reason: "components unresolved".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "ScheduleTruncated");
        assert_eq!(json["emitted"], 3);
    }

    #[test]
    fn optional_fields_serialize_as_null() {
        let event = TraceEvent::ScheduleGenerated {
            occurrences: 24,
            interval_minutes: 60,
            hour_limit: None,
            utc: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["hour_limit"].is_null());
        assert_eq!(json["occurrences"], 24);
    }
}
