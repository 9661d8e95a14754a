/*!
 * Translation engine capability.
 *
 * The engine translates text for a language pair and manages the language
 * packages those pairs need:
 * - `packages`: local package store and remote package index
 * - `libretranslate`: HTTP client for a LibreTranslate-compatible server
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::EngineError;
use crate::language_utils;

pub mod libretranslate;
pub mod packages;

pub use libretranslate::LibreTranslateEngine;

/// A translation package for one language pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguagePackage {
    /// Source language code (ISO 639-1)
    pub from_code: String,
    /// Target language code (ISO 639-1)
    pub to_code: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub to_name: String,
    #[serde(default)]
    pub package_version: String,
    /// Download URLs, first one preferred
    #[serde(default)]
    pub links: Vec<String>,
}

impl LanguagePackage {
    pub fn new(from_code: impl Into<String>, to_code: impl Into<String>) -> Self {
        Self {
            from_code: from_code.into(),
            to_code: to_code.into(),
            from_name: String::new(),
            to_name: String::new(),
            package_version: String::new(),
            links: Vec::new(),
        }
    }

    /// Whether this package translates exactly `from` -> `to`
    pub fn matches(&self, from: &str, to: &str) -> bool {
        language_utils::language_codes_match(&self.from_code, from)
            && language_utils::language_codes_match(&self.to_code, to)
    }
}

impl std::fmt::Display for LanguagePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from_code, self.to_code)?;
        if !self.package_version.is_empty() {
            write!(f, " (v{})", self.package_version)?;
        }
        Ok(())
    }
}

/// Common trait for translation engines
///
/// The pipeline only calls these operations; how packages are stored and how
/// text is translated is up to the implementation.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Whether a package for `from` -> `to` is installed and ready
    async fn is_package_installed(&self, from: &str, to: &str) -> Result<bool, EngineError>;

    /// Packages that can be downloaded
    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, EngineError>;

    /// Download and install a package, returning where it was installed
    async fn download_and_install(&self, package: &LanguagePackage) -> Result<PathBuf, EngineError>;

    /// Translate a piece of text
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, EngineError>;
}
