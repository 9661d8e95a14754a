/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;
use std::path::PathBuf;

use pdftrans::errors::{AppError, DocumentError, EngineError, PersistenceError, RunError};

#[test]
fn test_engineError_display_shouldIncludeDetails() {
    let error = EngineError::ApiError {
        status_code: 400,
        message: "es is not supported".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 400 - es is not supported");
}

#[test]
fn test_documentError_page_shouldReportOneBasedPage() {
    let error = DocumentError::Page {
        path: PathBuf::from("report.pdf"),
        page: 3,
        reason: "bad xref".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("page 3"));
    assert!(message.contains("bad xref"));
}

#[test]
fn test_persistenceError_shouldExposeIoSource() {
    let error = PersistenceError::Write {
        path: PathBuf::from("/readonly/doc_Spanish.txt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.source().is_some());
    assert!(error.to_string().contains("denied"));
}

#[test]
fn test_appError_fromLayerErrors_shouldWrap() {
    let app: AppError = EngineError::ConnectionError("refused".to_string()).into();
    assert!(matches!(app, AppError::Engine(_)));

    let app: AppError = RunError::WorkerPanicked.into();
    assert!(matches!(app, AppError::Run(RunError::WorkerPanicked)));

    let app: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("surprise").into();
    assert!(matches!(app, AppError::Unknown(ref m) if m == "surprise"));
}

#[test]
fn test_runError_capabilityUnavailable_shouldNamePair() {
    let error = RunError::CapabilityUnavailable {
        from: "en".to_string(),
        to: "es".to_string(),
    };
    assert_eq!(error.to_string(), "Translation package en -> es is not available");
    assert_eq!(error.clone(), error);
}
