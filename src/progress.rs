/*!
 * Progress events emitted by a run.
 *
 * The orchestrator is the only producer; a single consumer (the CLI, a UI, a
 * service) drains the channel. Events are immutable values, so nothing the
 * consumer does can reach back into run state. The channel is unbounded and
 * FIFO: the worker never waits on the consumer.
 */

use chrono::{DateTime, Local};
use log::trace;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::pipeline::{RunReport, RunState};

/// How an event should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine status
    Info,
    /// Something was completed or persisted
    Success,
    /// Unusual but expected condition
    Warning,
    /// A failure (of a block, a document, a write or the whole run)
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// Classification of the problems a run can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Language pair missing and not installable; the run stops
    CapabilityUnavailable,
    /// A document could not be opened or read; it is skipped
    DocumentOpen,
    /// A block could not be translated; a sentinel replaces it
    Translation,
    /// A checkpoint or artifact could not be written
    Persistence,
    /// Nothing to translate under the root
    DiscoveryEmpty,
    /// Unexpected run-level fault
    Fault,
}

/// Structured payload of an event
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Free-text status line
    Message,
    /// Something went wrong, see `IssueKind`
    Issue(IssueKind),
    /// The run moved to a new state
    StateChanged(RunState),
    /// A document is about to be processed
    DocumentStarted {
        name: String,
        /// 1-based position of this document in the run
        processed: usize,
        total: usize,
    },
    /// Page count of the current document, known once it is open
    PageCount { pages: usize },
    /// A page is about to be processed
    PageStarted { page: usize, pages: usize },
    /// A block of the current page is about to be translated (1-based)
    BlockStarted { page: usize, block: usize, blocks: usize },
    /// A checkpoint file was written
    CheckpointWritten { path: PathBuf, page: usize },
    /// The final translation file was written
    ArtifactWritten { path: PathBuf },
    /// A document finished; carries both texts for display
    DocumentCompleted {
        name: String,
        transcript: String,
        translation: String,
    },
    /// Last event of a run
    RunFinished(Box<RunReport>),
}

/// One observable state change
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
    pub kind: EventKind,
}

impl ProgressEvent {
    pub fn new(severity: Severity, message: impl Into<String>, kind: EventKind) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            message: message.into(),
            kind,
        }
    }

    /// Issue carried by this event, if any
    pub fn issue(&self) -> Option<IssueKind> {
        match self.kind {
            EventKind::Issue(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Producer side of the progress channel
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: UnboundedSender<ProgressEvent>,
}

/// Create a connected reporter/receiver pair
pub fn progress_channel() -> (ProgressReporter, UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressReporter { tx }, rx)
}

impl ProgressReporter {
    pub fn emit(&self, event: ProgressEvent) {
        // A dropped receiver means nobody is watching; the run carries on.
        if self.tx.send(event).is_err() {
            trace!("Progress receiver dropped, event discarded");
        }
    }

    pub fn event(&self, severity: Severity, message: impl Into<String>, kind: EventKind) {
        self.emit(ProgressEvent::new(severity, message, kind));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.event(Severity::Info, message, EventKind::Message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.event(Severity::Success, message, EventKind::Message);
    }

    pub fn warning(&self, issue: IssueKind, message: impl Into<String>) {
        self.event(Severity::Warning, message, EventKind::Issue(issue));
    }

    pub fn error(&self, issue: IssueKind, message: impl Into<String>) {
        self.event(Severity::Error, message, EventKind::Issue(issue));
    }
}
