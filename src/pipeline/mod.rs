/*!
 * Batch processing pipeline.
 *
 * - `orchestrator`: run state machine and per-document processing
 * - `output`: checkpoint and artifact writers
 * - `worker`: runs an orchestrator on a dedicated background thread
 */

pub mod orchestrator;
pub mod output;
pub mod worker;

pub use orchestrator::{
    DocumentOutcome, Orchestrator, RunReport, RunSettings, RunState, BLOCK_SEPARATOR,
};
pub use worker::{spawn_run, RunHandle};
