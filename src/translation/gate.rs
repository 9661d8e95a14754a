use log::{debug, error};
use std::sync::Arc;

use crate::engine::TranslationEngine;
use crate::errors::EngineError;
use crate::progress::{IssueKind, ProgressReporter};

/// Verifies, and installs when needed, the package for a language pair
#[derive(Debug, Clone)]
pub struct CapabilityGate {
    engine: Arc<dyn TranslationEngine>,
}

impl CapabilityGate {
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self { engine }
    }

    /// Make sure `source` -> `target` can be translated.
    ///
    /// Returns false when no package exists for the exact pair, when checking
    /// or installing fails, or when the engine still lacks the pair after
    /// installing it. Every outcome is reported on `progress`.
    pub async fn ensure(&self, source: &str, target: &str, progress: &ProgressReporter) -> bool {
        progress.info(format!("Checking translation package {} -> {}...", source, target));

        match self.ensure_inner(source, target, progress).await {
            Ok(true) => true,
            Ok(false) => {
                progress.error(
                    IssueKind::CapabilityUnavailable,
                    format!("No translation package found for {} -> {}", source, target),
                );
                false
            }
            Err(e) => {
                error!("Package check for {} -> {} failed: {}", source, target, e);
                progress.error(
                    IssueKind::CapabilityUnavailable,
                    format!("Failed to install or verify translation package: {}", e),
                );
                false
            }
        }
    }

    async fn ensure_inner(
        &self,
        source: &str,
        target: &str,
        progress: &ProgressReporter,
    ) -> Result<bool, EngineError> {
        if self.engine.is_package_installed(source, target).await? {
            progress.success("Translation package already installed and ready");
            return Ok(true);
        }

        progress.info(format!(
            "Installing package {} -> {}. This may take a while...",
            source, target
        ));

        let available = self.engine.available_packages().await?;
        debug!("{} packages available upstream", available.len());

        let Some(package) = available.into_iter().find(|p| p.matches(source, target)) else {
            return Ok(false);
        };

        let installed_at = self.engine.download_and_install(&package).await?;
        debug!("Package {} installed at {:?}", package, installed_at);

        if !self.engine.is_package_installed(source, target).await? {
            return Err(EngineError::PackageError(format!(
                "package {} installed at {:?} but the engine does not serve it yet",
                package, installed_at
            )));
        }

        progress.success(format!("Translation package {} installed", package));
        Ok(true)
    }
}
