/*!
 * Mock translation engine for testing
 *
 * Translates by prefixing the target code, e.g. "Hello" becomes "[es] Hello",
 * and never touches the network. Installed and downloadable packages are
 * configured per test.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use pdftrans::engine::{LanguagePackage, TranslationEngine};
use pdftrans::errors::EngineError;

/// Blocks containing this marker fail to translate
pub const FAIL_MARKER: &str = "FAIL";

/// Calls recorded by the mock
#[derive(Debug, Default)]
pub struct EngineCalls {
    pub installed_checks: usize,
    pub index_fetches: usize,
    pub installs: Vec<LanguagePackage>,
    pub translations: Vec<String>,
}

#[derive(Debug, Default)]
struct EngineState {
    installed: Vec<(String, String)>,
    available: Vec<LanguagePackage>,
    index_unreachable: bool,
    install_fails: bool,
    install_unserved: bool,
    calls: EngineCalls,
}

/// Engine double shared between a test and the run under test
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<EngineState>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with `from -> to` already installed
    pub fn with_installed(from: &str, to: &str) -> Self {
        let engine = Self::new();
        engine.state.lock().installed.push((from.to_string(), to.to_string()));
        engine
    }

    /// Engine with nothing installed and `from -> to` downloadable
    pub fn with_available(from: &str, to: &str) -> Self {
        let engine = Self::new();
        engine.state.lock().available.push(LanguagePackage::new(from, to));
        engine
    }

    pub fn set_index_unreachable(&self) {
        self.state.lock().index_unreachable = true;
    }

    pub fn set_install_fails(&self) {
        self.state.lock().install_fails = true;
    }

    /// Installs succeed but the pair never becomes available
    pub fn set_install_unserved(&self) {
        self.state.lock().install_unserved = true;
    }

    pub fn installs(&self) -> Vec<LanguagePackage> {
        self.state.lock().calls.installs.clone()
    }

    pub fn translations(&self) -> Vec<String> {
        self.state.lock().calls.translations.clone()
    }

    pub fn index_fetches(&self) -> usize {
        self.state.lock().calls.index_fetches
    }

    pub fn as_engine(&self) -> Arc<dyn TranslationEngine> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn is_package_installed(&self, from: &str, to: &str) -> Result<bool, EngineError> {
        let mut state = self.state.lock();
        state.calls.installed_checks += 1;
        Ok(state.installed.iter().any(|(f, t)| f == from && t == to))
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePackage>, EngineError> {
        let mut state = self.state.lock();
        state.calls.index_fetches += 1;
        if state.index_unreachable {
            return Err(EngineError::ConnectionError("index unreachable".to_string()));
        }
        Ok(state.available.clone())
    }

    async fn download_and_install(&self, package: &LanguagePackage) -> Result<PathBuf, EngineError> {
        let mut state = self.state.lock();
        if state.install_fails {
            return Err(EngineError::PackageError("archive is corrupt".to_string()));
        }
        state.calls.installs.push(package.clone());
        if state.install_unserved {
            return Ok(PathBuf::from("/packages/unserved"));
        }
        state
            .installed
            .push((package.from_code.clone(), package.to_code.clone()));
        Ok(PathBuf::from(format!("/packages/{}_{}", package.from_code, package.to_code)))
    }

    async fn translate(&self, text: &str, _from: &str, to: &str) -> Result<String, EngineError> {
        let mut state = self.state.lock();
        state.calls.translations.push(text.to_string());
        if text.contains(FAIL_MARKER) {
            return Err(EngineError::RequestFailed("engine rejected the block".to_string()));
        }
        Ok(format!("[{}] {}", to, text))
    }
}
