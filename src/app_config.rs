use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO), one of the supported targets
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Number of pages between two checkpoints
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Translation engine config
    #[serde(default)]
    pub engine: EngineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Languages a run can translate into
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    // @target: Spanish
    #[default]
    Spanish,
    // @target: English
    English,
}

impl TargetLanguage {
    /// Every supported target, in menu order
    pub const ALL: [TargetLanguage; 2] = [TargetLanguage::Spanish, TargetLanguage::English];

    // @returns: ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    // @returns: Supported target matching an ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|target| language_utils::language_codes_match(target.code(), code))
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Translation engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    // @field: LibreTranslate-compatible service URL
    #[serde(default = "default_engine_endpoint")]
    pub endpoint: String,

    // @field: API key, empty when the server does not require one
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Directory holding installed language packages
    #[serde(default)]
    pub packages_dir: Option<PathBuf>,

    // @field: URL of the package index
    #[serde(default = "default_package_index_url")]
    pub package_index_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_engine_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            packages_dir: None,
            package_index_url: default_package_index_url(),
        }
    }
}

impl EngineConfig {
    /// Directory holding installed packages, falling back to the per-user data dir
    pub fn packages_dir(&self) -> PathBuf {
        self.packages_dir.clone().unwrap_or_else(default_packages_dir)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    TargetLanguage::default().code().to_string()
}

pub(crate) fn default_checkpoint_interval() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_engine_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_package_index_url() -> String {
    "https://raw.githubusercontent.com/argosopentech/argospm-index/main/index.json".to_string()
}

fn default_packages_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("argos-translate")
        .join("packages")
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)?;
        language_utils::validate_language_code(&self.target_language)?;

        if TargetLanguage::from_code(&self.target_language).is_none() {
            let supported: Vec<&str> = TargetLanguage::ALL.iter().map(|t| t.code()).collect();
            return Err(anyhow!(
                "Unsupported target language '{}', expected one of: {}",
                self.target_language,
                supported.join(", ")
            ));
        }

        if self.checkpoint_interval == 0 {
            return Err(anyhow!("Checkpoint interval must be at least 1 page"));
        }

        Url::parse(&self.engine.endpoint)
            .map_err(|e| anyhow!("Invalid engine endpoint '{}': {}", self.engine.endpoint, e))?;
        Url::parse(&self.engine.package_index_url)
            .map_err(|e| anyhow!("Invalid package index URL '{}': {}", self.engine.package_index_url, e))?;

        Ok(())
    }

    /// Label used in output file names, e.g. "Spanish"
    pub fn target_label(&self) -> Result<String> {
        language_utils::get_language_name(&self.target_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            checkpoint_interval: default_checkpoint_interval(),
            engine: EngineConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
