use log::warn;
use std::sync::Arc;

use crate::engine::TranslationEngine;
use crate::progress::{IssueKind, ProgressReporter};

/// Characters of the original text kept in a failure sentinel
pub const SENTINEL_PREFIX_CHARS: usize = 50;

/// Result of translating one block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    /// Engine output
    Translated(String),
    /// Engine failure; the block is replaced by a sentinel
    Failed {
        reason: String,
        original_prefix: String,
    },
}

impl BlockOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, BlockOutcome::Failed { .. })
    }

    /// Text written to the output for this block
    pub fn into_text(self) -> String {
        match self {
            BlockOutcome::Translated(text) => text,
            BlockOutcome::Failed { original_prefix, .. } => sentinel(&original_prefix),
        }
    }
}

/// Visible marker standing in for a block that failed to translate
pub fn sentinel(original_prefix: &str) -> String {
    format!("[TRANSLATION ERROR: {}...]", original_prefix)
}

/// Translates single blocks for a fixed language pair
#[derive(Debug, Clone)]
pub struct BlockTranslator {
    engine: Arc<dyn TranslationEngine>,
    source_language: String,
    target_language: String,
}

impl BlockTranslator {
    pub fn new(
        engine: Arc<dyn TranslationEngine>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Translate one block. Never fails: engine errors are reported on
    /// `progress` and come back as [`BlockOutcome::Failed`]. No retry.
    pub async fn translate(&self, text: &str, progress: &ProgressReporter) -> BlockOutcome {
        match self
            .engine
            .translate(text, &self.source_language, &self.target_language)
            .await
        {
            Ok(translated) => BlockOutcome::Translated(translated),
            Err(e) => {
                warn!("Block translation failed: {}", e);
                progress.error(IssueKind::Translation, format!("Error translating a block: {}", e));
                BlockOutcome::Failed {
                    reason: e.to_string(),
                    original_prefix: text.chars().take(SENTINEL_PREFIX_CHARS).collect(),
                }
            }
        }
    }
}
