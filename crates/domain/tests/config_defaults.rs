use auxi_domain::config::{Config, WeekStart};

#[test]
fn default_timezone_is_utc() {
    let config = Config::default();
    assert_eq!(config.calendar.timezone, "UTC");
    assert_eq!(config.calendar.week_start, WeekStart::Sunday);
}

#[test]
fn calendar_section_parses() {
    let toml_str = r#"
[calendar]
timezone = "America/New_York"
week_start = "monday"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.calendar.timezone, "America/New_York");
    assert_eq!(config.calendar.week_start, WeekStart::Monday);
    assert!(config.is_valid());
}

#[test]
fn schedule_section_parses() {
    let toml_str = r#"
[schedule]
include_date_components = true
utc_source_timezone = "+02:00"
max_hour_limit = 48
"#;
    let config = Config::from_toml_str(toml_str).unwrap();
    assert!(config.schedule.include_date_components);
    assert_eq!(config.schedule.utc_source_timezone.as_deref(), Some("+02:00"));
    assert_eq!(config.schedule.max_hour_limit, 48);
    assert!(config.validate().is_empty());
}

#[test]
fn unknown_week_start_is_rejected() {
    let toml_str = r#"
[calendar]
week_start = "funday"
"#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn invalid_source_timezone_is_reported() {
    let toml_str = r#"
[schedule]
utc_source_timezone = "Nowhere/Land"
"#;
    let config = Config::from_toml_str(toml_str).unwrap();
    let issues = config.validate();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "schedule.utc_source_timezone");
}

#[test]
fn load_from_file_reads_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.toml");
    std::fs::write(&path, "[calendar]\ntimezone = \"Asia/Tokyo\"\n").unwrap();
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.calendar.timezone, "Asia/Tokyo");
}

#[test]
fn load_from_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.calendar.timezone, "UTC");
    assert_eq!(config.schedule.max_hour_limit, 168);
    assert!(config.schedule.utc_source_timezone.is_none());
}

#[test]
fn utc_aliases_are_valid_timezones() {
    for tz in ["Z", "gmt", "UTC"] {
        let config = Config::from_toml_str(&format!("[calendar]\ntimezone = \"{tz}\"\n")).unwrap();
        assert!(config.is_valid(), "{tz}");
    }
}
