use log::{debug, error};
use std::thread::{self, JoinHandle};

use super::{Orchestrator, RunReport};
use crate::errors::RunError;

/// A run executing on its own thread
pub struct RunHandle {
    join: JoinHandle<RunReport>,
}

impl RunHandle {
    /// Block until the run ends
    pub fn wait(self) -> Result<RunReport, RunError> {
        self.join.join().map_err(|_| {
            error!("Run worker panicked");
            RunError::WorkerPanicked
        })
    }

    /// Wait for the run without blocking the calling async runtime
    pub async fn finished(self) -> Result<RunReport, RunError> {
        tokio::task::spawn_blocking(move || self.wait())
            .await
            .map_err(|_| RunError::WorkerPanicked)?
    }
}

/// Start a run on a dedicated worker thread.
///
/// The worker drives the run on its own single-threaded runtime, so documents,
/// pages and blocks are handled strictly one at a time and the caller's
/// thread is never blocked by document I/O or translation.
pub fn spawn_run(orchestrator: Orchestrator) -> Result<RunHandle, RunError> {
    let run_id = orchestrator.run_id();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RunError::WorkerSpawn(e.to_string()))?;

    let join = thread::Builder::new()
        .name(format!("pdftrans-run-{}", run_id.simple()))
        .spawn(move || {
            debug!("[{}] Worker started", run_id);
            runtime.block_on(orchestrator.run())
        })
        .map_err(|e| RunError::WorkerSpawn(e.to_string()))?;

    Ok(RunHandle { join })
}
