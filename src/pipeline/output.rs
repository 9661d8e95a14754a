use log::{debug, error};
use std::path::{Path, PathBuf};

use crate::errors::PersistenceError;
use crate::file_utils::FileManager;
use crate::progress::{EventKind, IssueKind, ProgressReporter, Severity};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn write(path: &Path, text: &str) -> Result<(), PersistenceError> {
    FileManager::write_to_file(path, text).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the translation accumulated so far for a document.
///
/// Failures are reported on `progress` and returned; callers carry on.
pub fn write_checkpoint(
    document: &Path,
    accumulated_text: &str,
    target_label: &str,
    page_number: usize,
    progress: &ProgressReporter,
) -> Result<PathBuf, PersistenceError> {
    let path = FileManager::checkpoint_path(document, target_label, page_number);
    debug!("Writing checkpoint {:?} ({} bytes)", path, accumulated_text.len());

    match write(&path, accumulated_text) {
        Ok(()) => {
            progress.event(
                Severity::Success,
                format!("CHECKPOINT: progress up to page {} saved to {}", page_number, file_name(&path)),
                EventKind::CheckpointWritten {
                    path: path.clone(),
                    page: page_number,
                },
            );
            Ok(path)
        }
        Err(e) => {
            error!("{}", e);
            progress.error(IssueKind::Persistence, format!("Error saving checkpoint: {}", e));
            Err(e)
        }
    }
}

/// Write the final translation of a document.
///
/// Failures are reported on `progress` and returned; callers carry on.
pub fn write_artifact(
    document: &Path,
    final_text: &str,
    target_label: &str,
    progress: &ProgressReporter,
) -> Result<PathBuf, PersistenceError> {
    let path = FileManager::artifact_path(document, target_label);

    match write(&path, final_text) {
        Ok(()) => {
            progress.event(
                Severity::Success,
                format!("Translation saved to {}", file_name(&path)),
                EventKind::ArtifactWritten { path: path.clone() },
            );
            Ok(path)
        }
        Err(e) => {
            error!("{}", e);
            progress.error(IssueKind::Persistence, format!("Error saving translation: {}", e));
            Err(e)
        }
    }
}
