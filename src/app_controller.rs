use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app_config::Config;
use crate::document::DocumentReader;
use crate::engine::{LibreTranslateEngine, TranslationEngine};
use crate::errors::RunError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::pipeline::{spawn_run, Orchestrator, RunReport, RunSettings};
use crate::progress::{progress_channel, EventKind, ProgressEvent, Severity};

// @module: Application controller for batch PDF translation

/// Name of the issues log written to the root of a run
pub const ISSUES_LOG_FILE: &str = "pdftrans.issues.log";

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run parameters for a root directory.
    ///
    /// Language codes are passed on in the 2-letter form packages and the
    /// engine use, whatever form the configuration holds.
    pub fn run_settings(&self, root: PathBuf) -> Result<RunSettings> {
        Ok(RunSettings {
            root,
            source_language: language_utils::normalize_to_part1(&self.config.source_language)?,
            target_language: language_utils::normalize_to_part1(&self.config.target_language)?,
            target_label: self.config.target_label()?,
            checkpoint_interval: self.config.checkpoint_interval,
        })
    }

    /// Translate every PDF under `root` with the configured engine and reader
    pub async fn run(&self, root: PathBuf) -> Result<RunReport> {
        let engine = LibreTranslateEngine::from_config(&self.config.engine)
            .context("Failed to create translation engine")?;
        let reader = default_reader()?;
        self.run_with(root, Arc::new(engine), reader).await
    }

    /// Translate every PDF under `root` using the given engine and reader.
    ///
    /// The run executes on a background worker; this task only consumes
    /// progress events until the worker is done.
    pub async fn run_with(
        &self,
        root: PathBuf,
        engine: Arc<dyn TranslationEngine>,
        reader: Arc<dyn DocumentReader>,
    ) -> Result<RunReport> {
        if !FileManager::dir_exists(&root) {
            return Err(RunError::InvalidRoot(root).into());
        }

        let settings = self.run_settings(root.clone())?;
        let (reporter, events) = progress_channel();
        let orchestrator = Orchestrator::new(settings, engine, reader, reporter);
        let run_id = orchestrator.run_id();
        let handle = spawn_run(orchestrator)?;

        ConsoleSink::new().drain(events).await;

        let report = handle.finished().await?;
        if report.has_issues() {
            let log_path = root.join(ISSUES_LOG_FILE);
            let line = format!(
                "Run {} over {}: {} - Duration: {}",
                run_id,
                root.display(),
                report.summary(),
                Self::format_duration(report.duration)
            );
            if let Err(e) = FileManager::append_to_log_file(&log_path, &line) {
                warn!("Failed to write run summary to {:?}: {}", log_path, e);
            } else {
                info!("Issues logged to {}", log_path.display());
            }
        }

        Ok(report)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Document reader compiled into this build
pub fn default_reader() -> Result<Arc<dyn DocumentReader>> {
    #[cfg(feature = "mupdf")]
    {
        Ok(Arc::new(crate::document::MupdfReader::new()))
    }
    #[cfg(not(feature = "mupdf"))]
    {
        Err(anyhow::anyhow!("This build has no PDF reader; rebuild with the `mupdf` feature"))
    }
}

/// Terminal progress sink: logs events and drives the progress bars
struct ConsoleSink {
    multi_progress: MultiProgress,
    documents: Option<ProgressBar>,
    pages: Option<ProgressBar>,
}

impl ConsoleSink {
    fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            documents: None,
            pages: None,
        }
    }

    fn bar_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    async fn drain(mut self, mut events: UnboundedReceiver<ProgressEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        if let Some(pages) = self.pages.take() {
            pages.finish_and_clear();
        }
        if let Some(documents) = self.documents.take() {
            documents.finish_with_message("done");
        }
    }

    fn log(&self, event: &ProgressEvent) {
        let line = format!("[{}] {}", event.timestamp.format("%H:%M:%S"), event.message);
        self.multi_progress.suspend(|| match event.severity {
            Severity::Error => error!("{}", line),
            Severity::Warning => warn!("{}", line),
            Severity::Success => info!("{}", line),
            Severity::Info => debug!("{}", line),
        });
    }

    fn handle(&mut self, event: ProgressEvent) {
        match &event.kind {
            EventKind::DocumentStarted { name, processed, total } => {
                let bar = self.documents.get_or_insert_with(|| {
                    let bar = self.multi_progress.add(ProgressBar::new(*total as u64));
                    bar.set_style(Self::bar_style("files"));
                    bar
                });
                bar.set_position(processed.saturating_sub(1) as u64);
                bar.set_message(name.clone());
                self.log(&event);
            }
            EventKind::PageCount { pages } => {
                if let Some(previous) = self.pages.take() {
                    previous.finish_and_clear();
                }
                let bar = self.multi_progress.add(ProgressBar::new(*pages as u64));
                bar.set_style(Self::bar_style("pages"));
                self.pages = Some(bar);
                self.log(&event);
            }
            EventKind::PageStarted { page, .. } => {
                if let Some(bar) = &self.pages {
                    bar.set_position(page.saturating_sub(1) as u64);
                }
            }
            EventKind::BlockStarted { block, blocks, .. } => {
                if let Some(bar) = &self.pages {
                    bar.set_message(format!("block {}/{}", block, blocks));
                }
            }
            EventKind::DocumentCompleted { name, transcript, translation } => {
                if let Some(bar) = &self.documents {
                    bar.inc(1);
                }
                debug!(
                    "{}: transcript {} chars, translation {} chars",
                    name,
                    transcript.chars().count(),
                    translation.chars().count()
                );
            }
            EventKind::RunFinished(report) => {
                let summary = format!(
                    "{} in {}",
                    report.summary(),
                    Controller::format_duration(report.duration)
                );
                self.multi_progress.suspend(|| {
                    if event.severity.is_error() {
                        error!("{}", summary)
                    } else {
                        info!("{}", summary)
                    }
                });
            }
            _ => self.log(&event),
        }
    }
}
