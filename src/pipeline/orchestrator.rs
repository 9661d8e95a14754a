/*!
 * Run orchestration.
 *
 * A run goes `Idle -> GateChecking -> Scanning -> ProcessingDocument* -> Completed`,
 * or ends in `Failed` when the language pair is unavailable or the root cannot
 * be scanned. A document that fails is skipped; the run moves on to the next
 * one. [`Orchestrator::run`] consumes the orchestrator, so a finished run
 * cannot be restarted.
 */

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::output;
use crate::document::{BlockExtractor, DocumentReader};
use crate::engine::TranslationEngine;
use crate::errors::{DocumentError, RunError};
use crate::file_utils::{FileManager, DOCUMENT_EXTENSION};
use crate::progress::{EventKind, IssueKind, ProgressReporter, Severity};
use crate::translation::{BlockTranslator, CapabilityGate};

/// Separator between translated blocks in every output
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    GateChecking,
    Scanning,
    /// Processing the document at this 0-based index
    ProcessingDocument(usize),
    Completed,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

/// Parameters of one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory scanned for documents
    pub root: PathBuf,
    pub source_language: String,
    pub target_language: String,
    /// Suffix used in output file names
    pub target_label: String,
    /// Pages between checkpoints
    pub checkpoint_interval: usize,
}

/// Result of one successfully processed document
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub page_count: usize,
    /// Original blocks joined with blank lines
    pub transcript: String,
    /// Translated blocks joined with blank lines
    pub translation: String,
    pub blocks: usize,
    pub failed_blocks: usize,
    pub checkpoints: Vec<PathBuf>,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Terminal state
    pub state: RunState,
    /// Why the run failed, when it did
    pub failure: Option<RunError>,
    /// Documents discovered
    pub total: usize,
    /// Documents attempted
    pub processed: usize,
    /// Documents that could not be read
    pub failed_documents: usize,
    /// Documents that vanished between scanning and processing
    pub skipped: usize,
    /// Blocks replaced by a failure sentinel
    pub failed_blocks: usize,
    pub artifacts: Vec<PathBuf>,
    pub checkpoints: Vec<PathBuf>,
    pub persistence_failures: usize,
    pub duration: Duration,
}

impl RunReport {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            state: RunState::Idle,
            failure: None,
            total: 0,
            processed: 0,
            failed_documents: 0,
            skipped: 0,
            failed_blocks: 0,
            artifacts: Vec::new(),
            checkpoints: Vec::new(),
            persistence_failures: 0,
            duration: Duration::ZERO,
        }
    }

    /// Whether anything went wrong along the way
    pub fn has_issues(&self) -> bool {
        self.failure.is_some()
            || self.failed_documents > 0
            || self.failed_blocks > 0
            || self.persistence_failures > 0
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{:?}: {} of {} documents processed, {} failed, {} skipped, {} block errors, {} write errors",
            self.state,
            self.processed,
            self.total,
            self.failed_documents,
            self.skipped,
            self.failed_blocks,
            self.persistence_failures
        )
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Drives one run from gate check to the last document
pub struct Orchestrator {
    settings: RunSettings,
    engine: Arc<dyn TranslationEngine>,
    extractor: BlockExtractor,
    translator: BlockTranslator,
    progress: ProgressReporter,
    state: RunState,
    report: RunReport,
}

impl Orchestrator {
    pub fn new(
        mut settings: RunSettings,
        engine: Arc<dyn TranslationEngine>,
        reader: Arc<dyn DocumentReader>,
        progress: ProgressReporter,
    ) -> Self {
        settings.checkpoint_interval = settings.checkpoint_interval.max(1);
        let translator = BlockTranslator::new(
            engine.clone(),
            settings.source_language.clone(),
            settings.target_language.clone(),
        );
        Self {
            settings,
            engine,
            extractor: BlockExtractor::new(reader),
            translator,
            progress,
            state: RunState::Idle,
            report: RunReport::new(Uuid::new_v4()),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.report.run_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        debug!("[{}] {:?} -> {:?}", self.report.run_id, self.state, next);
        self.state = next;
        self.progress
            .event(Severity::Info, format!("Run state: {:?}", next), EventKind::StateChanged(next));
    }

    /// Execute the whole run and return its report
    pub async fn run(mut self) -> RunReport {
        let started = Instant::now();
        info!(
            "[{}] Translating PDFs under {:?} ({} -> {})",
            self.report.run_id, self.settings.root, self.settings.source_language, self.settings.target_language
        );

        self.transition(RunState::GateChecking);
        let gate = CapabilityGate::new(self.engine.clone());
        if !gate
            .ensure(&self.settings.source_language, &self.settings.target_language, &self.progress)
            .await
        {
            let failure = RunError::CapabilityUnavailable {
                from: self.settings.source_language.clone(),
                to: self.settings.target_language.clone(),
            };
            return self.finish(RunState::Failed, Some(failure), started);
        }

        self.transition(RunState::Scanning);
        let documents = match FileManager::find_files(&self.settings.root, DOCUMENT_EXTENSION) {
            Ok(documents) => documents,
            Err(e) => {
                let failure = RunError::Scan {
                    path: self.settings.root.clone(),
                    reason: format!("{:#}", e),
                };
                self.progress.error(IssueKind::Fault, format!("ERROR: {}", failure));
                return self.finish(RunState::Failed, Some(failure), started);
            }
        };

        if documents.is_empty() {
            self.progress.warning(IssueKind::DiscoveryEmpty, "No PDF files found.");
            return self.finish(RunState::Completed, None, started);
        }

        self.report.total = documents.len();
        for (index, path) in documents.iter().enumerate() {
            if !FileManager::file_exists(path) {
                debug!("Skipping {:?}, removed since scanning", path);
                self.report.skipped += 1;
                continue;
            }

            self.report.processed += 1;
            self.transition(RunState::ProcessingDocument(index));
            let name = display_name(path);
            self.progress.event(
                Severity::Info,
                format!("Current file: {} ({}/{})", name, self.report.processed, self.report.total),
                EventKind::DocumentStarted {
                    name: name.clone(),
                    processed: self.report.processed,
                    total: self.report.total,
                },
            );

            match self.process_document(path).await {
                Ok(outcome) => self.complete_document(name, outcome),
                Err(e) => {
                    warn!("[{}] {}", self.report.run_id, e);
                    self.report.failed_documents += 1;
                    self.progress
                        .error(IssueKind::DocumentOpen, format!("ERROR processing '{}': {}", name, e));
                }
            }
        }

        self.progress.success("Run completed.");
        self.finish(RunState::Completed, None, started)
    }

    /// Translate every page of one document, writing checkpoints on the way
    async fn process_document(&mut self, path: &Path) -> Result<DocumentOutcome, DocumentError> {
        let document = self.extractor.open(path)?;
        let page_count = document.page_count();
        self.progress.event(
            Severity::Info,
            format!("Pages: {}", page_count),
            EventKind::PageCount { pages: page_count },
        );

        let mut transcript: Vec<String> = Vec::new();
        let mut translated: Vec<String> = Vec::new();
        let mut accumulated = String::new();
        let mut failed_blocks = 0;
        let mut checkpoints = Vec::new();

        for page_index in 0..page_count {
            let page_number = page_index + 1;
            let blocks = document.blocks_of(page_index)?;
            self.progress.event(
                Severity::Info,
                format!("Processing page {}/{}...", page_number, page_count),
                EventKind::PageStarted {
                    page: page_number,
                    pages: page_count,
                },
            );

            let block_count = blocks.len();
            for (block_index, block) in blocks.into_iter().enumerate() {
                self.progress.event(
                    Severity::Info,
                    format!("Translating block {}/{} of page {}...", block_index + 1, block_count, page_number),
                    EventKind::BlockStarted {
                        page: page_number,
                        block: block_index + 1,
                        blocks: block_count,
                    },
                );
                let outcome = self.translator.translate(&block.text, &self.progress).await;
                if outcome.is_failure() {
                    failed_blocks += 1;
                }
                let text = outcome.into_text();
                accumulated.push_str(&text);
                accumulated.push_str(BLOCK_SEPARATOR);
                translated.push(text);
                transcript.push(block.text);
            }

            if page_number % self.settings.checkpoint_interval == 0 {
                match output::write_checkpoint(path, &accumulated, &self.settings.target_label, page_number, &self.progress) {
                    Ok(checkpoint) => checkpoints.push(checkpoint),
                    Err(_) => self.report.persistence_failures += 1,
                }
            }
        }

        Ok(DocumentOutcome {
            path: path.to_path_buf(),
            page_count,
            transcript: transcript.join(BLOCK_SEPARATOR),
            translation: translated.join(BLOCK_SEPARATOR),
            blocks: translated.len(),
            failed_blocks,
            checkpoints,
        })
    }

    fn complete_document(&mut self, name: String, outcome: DocumentOutcome) {
        self.report.failed_blocks += outcome.failed_blocks;
        self.report.checkpoints.extend(outcome.checkpoints.iter().cloned());

        match output::write_artifact(&outcome.path, &outcome.translation, &self.settings.target_label, &self.progress) {
            Ok(artifact) => self.report.artifacts.push(artifact),
            Err(_) => self.report.persistence_failures += 1,
        }

        debug!(
            "[{}] {}: {} pages, {} blocks, {} failed",
            self.report.run_id, name, outcome.page_count, outcome.blocks, outcome.failed_blocks
        );
        self.progress.event(
            Severity::Info,
            format!("Finished {}", name),
            EventKind::DocumentCompleted {
                name,
                transcript: outcome.transcript,
                translation: outcome.translation,
            },
        );
    }

    fn finish(mut self, state: RunState, failure: Option<RunError>, started: Instant) -> RunReport {
        self.transition(state);
        self.report.state = state;
        self.report.failure = failure;
        self.report.duration = started.elapsed();
        info!("[{}] {}", self.report.run_id, self.report.summary());

        self.progress.event(
            if state == RunState::Failed { Severity::Error } else { Severity::Info },
            self.report.summary(),
            EventKind::RunFinished(Box::new(self.report.clone())),
        );
        self.report
    }
}
