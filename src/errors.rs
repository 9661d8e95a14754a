/*!
 * Error types for the pdftrans application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions. Only
 * `RunError::CapabilityUnavailable` and unexpected worker faults end a run early;
 * every other error is contained to its document or block.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the translation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error while resolving, downloading or unpacking a language package
    #[error("Package error: {0}")]
    PackageError(String),

    /// Local filesystem error in the package store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

impl From<zip::result::ZipError> for EngineError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::PackageError(error.to_string())
    }
}

/// Errors that can occur while reading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be opened or is not a readable PDF
    #[error("Failed to open document {path:?}: {reason}")]
    Open { path: PathBuf, reason: String },

    /// A single page could not be read
    #[error("Failed to read page {page} of {path:?}: {reason}")]
    Page {
        path: PathBuf,
        /// 1-based page number
        page: usize,
        reason: String,
    },
}

/// Errors that can occur while persisting checkpoints and artifacts
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end a run before or instead of processing documents
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunError {
    /// The engine cannot translate the requested language pair
    #[error("Translation package {from} -> {to} is not available")]
    CapabilityUnavailable { from: String, to: String },

    /// The root path is missing or not a directory
    #[error("Not a valid directory: {0:?}")]
    InvalidRoot(PathBuf),

    /// The root directory could not be scanned
    #[error("Failed to scan {path:?}: {reason}")]
    Scan { path: PathBuf, reason: String },

    /// The background worker could not be started
    #[error("Failed to start worker: {0}")]
    WorkerSpawn(String),

    /// The background worker panicked
    #[error("Worker terminated unexpectedly")]
    WorkerPanicked,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the translation engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error from document reading
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from output persistence
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Error at run level
    #[error("Run error: {0}")]
    Run(#[from] RunError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
