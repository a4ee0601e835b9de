mod calendar;
mod schedule;

pub use calendar::*;
pub use schedule::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::trace::TraceEvent;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AUXI_CONFIG";
/// Config path used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "calendar.toml";

/// Hour limits above this only produce a warning.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Loading
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load the configuration from the path in `AUXI_CONFIG` (or
    /// `calendar.toml` by default). A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let from_file = path.exists();
        let config = if from_file {
            let raw = std::fs::read_to_string(path)?;
            Self::from_toml_str(&raw)
                .map_err(|e| Error::Config(format!("parsing {}: {e}", path.display())))?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        TraceEvent::ConfigLoaded {
            path: path.display().to_string(),
            from_file,
            timezone: config.calendar.timezone.clone(),
        }
        .emit();

        Ok(config)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !is_known_timezone(&self.calendar.timezone) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "calendar.timezone".into(),
                message: format!(
                    "unknown timezone '{}' (use IANA names like 'America/New_York', 'UTC', or '+05:30')",
                    self.calendar.timezone
                ),
            });
        }

        if let Some(tz) = &self.schedule.utc_source_timezone {
            if !is_known_timezone(tz) {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "schedule.utc_source_timezone".into(),
                    message: format!("unknown timezone '{tz}'"),
                });
            }
        }

        if self.schedule.max_hour_limit <= 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "schedule.max_hour_limit".into(),
                message: "max_hour_limit must be greater than 0".into(),
            });
        } else if self.schedule.max_hour_limit > HOUR_LIMIT_CEILING {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "schedule.max_hour_limit".into(),
                message: format!(
                    "max_hour_limit {} exceeds the ceiling of {} hours; schedules stop at the ceiling",
                    self.schedule.max_hour_limit, HOUR_LIMIT_CEILING
                ),
            });
        }

        errors
    }

    /// True when [`Config::validate`] reports no errors (warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|e| e.severity != ConfigSeverity::Error)
    }
}
