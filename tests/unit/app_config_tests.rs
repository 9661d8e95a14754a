/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use pdftrans::app_config::{Config, LogLevel, TargetLanguage};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.checkpoint_interval, 50);
    assert_eq!(config.engine.endpoint, "http://localhost:5000");
    assert!(config.engine.api_key.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.source_language = "zz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "fr".to_string();
    assert!(config.validate().is_ok());

    // Only Spanish and English are supported targets
    config.target_language = "de".to_string();
    assert!(config.validate().is_err());
    config.target_language = "eng".to_string();
    assert!(config.validate().is_ok());

    config.checkpoint_interval = 0;
    assert!(config.validate().is_err());
    config.checkpoint_interval = 1;

    config.engine.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_targetLabel_shouldUseEnglishLanguageName() -> Result<()> {
    let mut config = Config::default();
    assert_eq!(config.target_label()?, "Spanish");

    config.target_language = "en".to_string();
    assert_eq!(config.target_label()?, "English");
    Ok(())
}

#[test]
fn test_targetLanguage_fromCode_shouldAcceptBothCodeForms() {
    assert_eq!(TargetLanguage::from_code("es"), Some(TargetLanguage::Spanish));
    assert_eq!(TargetLanguage::from_code("spa"), Some(TargetLanguage::Spanish));
    assert_eq!(TargetLanguage::from_code("en"), Some(TargetLanguage::English));
    assert_eq!(TargetLanguage::from_code("fr"), None);
    assert_eq!(TargetLanguage::default(), TargetLanguage::Spanish);
}

/// A partial conf.json only overrides what it names
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "target_language": "en",
        "checkpoint_interval": 5,
        "engine": { "endpoint": "http://translate.local:8080" },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.checkpoint_interval, 5);
    assert_eq!(config.engine.endpoint, "http://translate.local:8080");
    assert_eq!(config.engine.timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

#[test]
fn test_serialize_roundTrip_shouldPreserveEngineSettings() -> Result<()> {
    let mut config = Config::default();
    config.engine.api_key = "secret".to_string();
    config.engine.packages_dir = Some("/opt/packages".into());

    let restored: Config = serde_json::from_str(&serde_json::to_string_pretty(&config)?)?;
    assert_eq!(restored.engine.api_key, "secret");
    assert_eq!(restored.engine.packages_dir(), std::path::PathBuf::from("/opt/packages"));
    Ok(())
}
