use log::debug;
use reqwest::Client;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use url::Url;

use super::LanguagePackage;
use crate::errors::EngineError;

/// Metadata file found at the root of every installed package
const METADATA_FILE: &str = "metadata.json";

/// Parse the JSON package index into packages
pub fn parse_index(json: &str) -> Result<Vec<LanguagePackage>, EngineError> {
    serde_json::from_str(json).map_err(|e| EngineError::ParseError(format!("package index: {}", e)))
}

/// Local directory of installed language packages.
///
/// Each package lives in its own subdirectory with a `metadata.json`
/// describing its language pair.
#[derive(Debug, Clone)]
pub struct PackageStore {
    root: PathBuf,
}

impl PackageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every readable package in the store, with its directory
    pub fn installed(&self) -> Result<Vec<(PathBuf, LanguagePackage)>, EngineError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut packages = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let package_dir = entry?.path();
            let metadata_path = package_dir.join(METADATA_FILE);
            if !metadata_path.is_file() {
                continue;
            }
            let parsed = fs::read_to_string(&metadata_path)
                .map_err(EngineError::from)
                .and_then(|content| {
                    serde_json::from_str::<LanguagePackage>(&content)
                        .map_err(|e| EngineError::ParseError(e.to_string()))
                });
            match parsed {
                Ok(package) => packages.push((package_dir, package)),
                Err(e) => debug!("Ignoring unreadable package metadata {:?}: {}", metadata_path, e),
            }
        }

        Ok(packages)
    }

    /// Directory of the installed package for exactly `from` -> `to`
    pub fn find(&self, from: &str, to: &str) -> Result<Option<PathBuf>, EngineError> {
        Ok(self
            .installed()?
            .into_iter()
            .find(|(_, package)| package.matches(from, to))
            .map(|(dir, _)| dir))
    }

    /// Unpack a downloaded package archive into the store.
    ///
    /// Returns the package directory, taken from the archive's top-level entry.
    pub fn install_archive(&self, archive_path: &Path) -> Result<PathBuf, EngineError> {
        let mut archive = zip::ZipArchive::new(File::open(archive_path)?)?;

        let top_level = archive
            .file_names()
            .filter_map(|name| name.split('/').next())
            .find(|component| !component.is_empty())
            .map(str::to_string)
            .ok_or_else(|| EngineError::PackageError("package archive is empty".to_string()))?;

        fs::create_dir_all(&self.root)?;
        archive.extract(&self.root)?;

        let package_dir = self.root.join(top_level);
        if !package_dir.join(METADATA_FILE).is_file() {
            return Err(EngineError::PackageError(format!(
                "package archive has no {} in {:?}",
                METADATA_FILE, package_dir
            )));
        }

        Ok(package_dir)
    }
}

/// Remote index of downloadable packages
#[derive(Debug, Clone)]
pub struct PackageIndex {
    url: Url,
    client: Client,
}

impl PackageIndex {
    pub fn new(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    pub async fn fetch(&self) -> Result<Vec<LanguagePackage>, EngineError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }
        parse_index(&body)
    }
}
