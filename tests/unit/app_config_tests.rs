/*!
 * Unit tests for configuration handling
 */

use sentex::app_config::{Config, LogLevel};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_logLevel_shouldDeserializeLowercase() {
    let config: Config =
        serde_json::from_str(r#"{"log_level": "debug"}"#).expect("Failed to parse");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapAllLevels() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_save_shouldCreateParentDirectories() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.json");

    Config::default().save(&path).expect("Failed to save");
    assert!(path.exists());

    let loaded = Config::from_file(&path).expect("Failed to reload");
    assert_eq!(loaded.default_language, "eng");
}

#[test]
fn test_fromFile_shouldRejectInvalidConfiguration() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &dir.path().to_path_buf(),
        "config.json",
        r#"{"default_language": ""}"#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_databasePath_shouldRoundTrip() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.database_path = Some(dir.path().join("cache.db"));
    config.tatoeba_data_dir = Some(dir.path().join("tatoeba"));
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.database_path, config.database_path);
    assert_eq!(loaded.tatoeba_data_dir, config.tatoeba_data_dir);
}
