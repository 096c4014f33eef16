//! Integration tests for Settings layered loading.
//!
//! The global layer is always pointed at a temp directory, so the host's own
//! config never leaks into these tests.

use std::fs;

use tempfile::TempDir;

use gantt_model::{ApplicationError, Calendar, Settings};

#[test]
fn given_no_config_files_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("gantt-model.toml");

    let settings = Settings::load_layers(Some(&global), None).expect("load defaults");
    assert_eq!(settings.backfill_months, 1);
    assert!(settings.validate_records);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gantt-model.toml");
    fs::write(&path, "backfill_months = 3\nvalidate_records = false\n").unwrap();

    let settings = Settings::load_layers(None, Some(&path)).expect("load settings");

    assert_eq!(settings.backfill_months, 3);
    assert!(!settings.validate_records);
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let err = Settings::load_layers(None, Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gantt-model.toml");
    fs::write(&path, "backfill_months = \"many\"\n").unwrap();

    assert!(matches!(
        Settings::load_layers(None, Some(&path)),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    // only this test touches the offset, so parallel tests are unaffected
    std::env::set_var("GANTT_MODEL_UTC_OFFSET_MINUTES", "-300");
    let settings = Settings::load_layers(None, None);
    std::env::remove_var("GANTT_MODEL_UTC_OFFSET_MINUTES");

    let settings = settings.expect("load with env");
    assert_eq!(settings.utc_offset_minutes, -300);
    let calendar = settings.calendar().expect("valid offset");
    assert_eq!(calendar.offset().local_minus_utc(), -300 * 60);
    assert_ne!(calendar, Calendar::default());
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins_over_global() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let local = dir.path().join("local.toml");
    fs::write(&global, "backfill_months = 6\nvalidate_records = false\n").unwrap();
    fs::write(&local, "backfill_months = 2\n").unwrap();

    let settings = Settings::load_layers(Some(&global), Some(&local)).expect("load layers");

    assert_eq!(settings.backfill_months, 2);
    assert!(!settings.validate_records);
}
