use gluekit_settings::{Config, SettingsError};
use std::path::PathBuf;

#[test]
fn test_json_round_trip_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.trajectory.trail_length = 250;
    config.trajectory.show_current_point = true;
    config.trajectory.placeholder_path = Some(PathBuf::from("/opt/cell/placeholder.png"));
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_toml_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("gluekit").join("config.toml");

    let mut config = Config::default();
    config.trajectory.display_interval_ms = 50;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.trajectory.display_interval_ms, 50);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[trajectory]\nimage_width = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_json_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(&err, SettingsError::Parse { path: p, .. } if p == &path));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[trajectory\ntrail_length = ").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
}

#[test]
fn test_save_into_file_parent_fails_with_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "").unwrap();

    let err = Config::default()
        .save_to_file(&blocker.join("config.toml"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::Write { .. }));
}
