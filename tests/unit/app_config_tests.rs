/*!
 * Tests for application configuration functionality
 */

use log::LevelFilter;
use xcstrings_translator::app_config::{Config, FailurePolicy, LogLevel};
use xcstrings_translator::errors::ConfigError;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, None);
    assert!(config.target_languages.is_empty());
    assert_eq!(config.translation.concurrency, 5);
    assert_eq!(config.translation.timeout_secs, 300);
    assert_eq!(config.translation.retry_count, 3);
    assert_eq!(config.translation.retry_backoff_ms, 1000);
    assert_eq!(config.translation.rate_limit, None);
    assert!(config.translation.cache_enabled);
    assert_eq!(config.translation.failure_policy, FailurePolicy::AbortOnFirstFailure);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test loading a configuration file from disk
#[test]
fn test_fromFile_withValidJson_shouldLoadEverySection() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "source_language": "en",
            "target_languages": ["fr", "de", "zh-Hans"],
            "translation": {
                "concurrency": 8,
                "timeout_secs": 60,
                "failure_policy": "collect_all",
                "retry_count": 1,
                "rate_limit": 120,
                "cache_enabled": false
            },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.source_language.as_deref(), Some("en"));
    assert_eq!(config.target_languages, vec!["fr", "de", "zh-Hans"]);
    assert_eq!(config.translation.concurrency, 8);
    assert_eq!(config.translation.failure_policy, FailurePolicy::CollectAll);
    assert_eq!(config.translation.retry_backoff_ms, 1000);
    assert!(!config.translation.cache_enabled);
    assert_eq!(LevelFilter::from(config.log_level), LevelFilter::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fromFile_withMissingFile_shouldNameThePath() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("missing.json");

    let error = Config::from_file(&path).unwrap_err();

    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn test_fromFile_withMalformedJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    let error = Config::from_file(&path).unwrap_err();

    assert!(error.to_string().contains("Failed to parse config file"));
}

/// Test configuration validation
#[test]
fn test_validate_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::new(&["fr"]);
    assert!(config.validate().is_ok());

    config.source_language = Some("xyz".to_string());
    assert!(matches!(config.validate(), Err(ConfigError::InvalidLanguage(_))));
    config.source_language = Some("en".to_string());

    config.target_languages = vec!["en".to_string()];
    assert!(matches!(config.validate(), Err(ConfigError::NoTargetLanguages)));
    config.target_languages = vec!["fr".to_string()];

    config.translation.rate_limit = Some(0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "rate_limit", .. })
    ));
}
