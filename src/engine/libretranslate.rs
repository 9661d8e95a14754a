use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use super::packages::{PackageIndex, PackageStore};
use super::{LanguagePackage, TranslationEngine};
use crate::app_config::EngineConfig;
use crate::errors::EngineError;
use crate::language_utils;

/// Client for a LibreTranslate-compatible server backed by Argos packages.
///
/// A pair counts as installed only when the server lists it under
/// `/languages`, since that is what `/translate` will accept. New packages are
/// unpacked into the directory the server loads its models from.
#[derive(Debug)]
pub struct LibreTranslateEngine {
    /// Base URL of the server, always ending with '/'
    base_url: Url,
    /// Optional API key sent with each request
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
    store: PackageStore,
    index: PackageIndex,
}

/// Translate request for the LibreTranslate API
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Translate response from the LibreTranslate API
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Entry of the server's `/languages` listing
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerLanguage {
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Codes this language translates into; older servers leave it out
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Parse the body of a `/languages` response
pub fn parse_languages(json: &str) -> Result<Vec<ServerLanguage>, EngineError> {
    serde_json::from_str(json).map_err(|e| EngineError::ParseError(format!("language list: {}", e)))
}

/// Whether the listed languages include a model for `from` -> `to`.
///
/// Without a `targets` list every other listed language counts as a target.
pub fn serves_pair(languages: &[ServerLanguage], from: &str, to: &str) -> bool {
    let Some(source) = languages
        .iter()
        .find(|l| language_utils::language_codes_match(&l.code, from))
    else {
        return false;
    };

    if source.targets.is_empty() {
        languages
            .iter()
            .any(|l| l.code != source.code && language_utils::language_codes_match(&l.code, to))
    } else {
        source
            .targets
            .iter()
            .any(|code| language_utils::language_codes_match(code, to))
    }
}

/// Error body returned by the LibreTranslate API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl LibreTranslateEngine {
    /// Create a client from the engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut base_url = Url::parse(&config.endpoint)
            .map_err(|e| EngineError::RequestFailed(format!("invalid endpoint '{}': {}", config.endpoint, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let index_url = Url::parse(&config.package_index_url).map_err(|e| {
            EngineError::RequestFailed(format!("invalid package index '{}': {}", config.package_index_url, e))
        })?;

        Ok(Self {
            base_url,
            api_key: Some(config.api_key.clone()).filter(|key| !key.is_empty()),
            client: client.clone(),
            store: PackageStore::new(config.packages_dir()),
            index: PackageIndex::new(index_url, client),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        self.base_url
            .join(path)
            .map_err(|e| EngineError::RequestFailed(format!("invalid URL for '{}': {}", path, e)))
    }

    /// Languages the server currently has models loaded for
    pub async fn languages(&self) -> Result<Vec<ServerLanguage>, EngineError> {
        let response = self.client.get(self.endpoint("languages")?).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }
        parse_languages(&body)
    }

    async fn download(&self, link: &str) -> Result<Bytes, EngineError> {
        let response = self.client.get(link).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message: format!("download of {} failed", link),
            });
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl TranslationEngine for LibreTranslateEngine {
    async fn is_package_installed(&self, from: &str, to: &str) -> Result<bool, EngineError> {
        let languages = self.languages().await?;
        Ok(serves_pair(&languages, from, to))
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, EngineError> {
        self.index.fetch().await
    }

    async fn download_and_install(&self, package: &LanguagePackage) -> Result<PathBuf, EngineError> {
        if let Some(existing) = self.store.find(&package.from_code, &package.to_code)? {
            warn!(
                "Package {} is already in {:?} but not served; restart the server to load it",
                package, existing
            );
            return Ok(existing);
        }

        let link = package
            .links
            .first()
            .ok_or_else(|| EngineError::PackageError(format!("package {} has no download link", package)))?;

        info!("Downloading package {} from {}", package, link);
        let payload = self.download(link).await?;
        debug!("Downloaded {} bytes", payload.len());

        let mut archive = tempfile::NamedTempFile::new()?;
        archive.write_all(&payload)?;
        archive.flush()?;

        self.store.install_archive(archive.path())
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, EngineError> {
        let request = TranslateRequest {
            q: text,
            source: from,
            target: to,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(self.endpoint("translate")?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        Ok(parsed.translated_text)
    }
}
