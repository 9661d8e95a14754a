/*!
 * # pdftrans - batch PDF translation
 *
 * A Rust library that walks a directory tree, extracts the text of every PDF
 * in reading order and translates it block by block with an offline
 * translation engine.
 *
 * ## Features
 *
 * - Recursive discovery of `.pdf` files
 * - Reading-order text extraction (top to bottom, then left to right)
 * - Language package check and automatic installation before a run
 * - Per-block failure isolation with inline error markers
 * - Periodic checkpoints and a final translation file per document
 * - Run progress delivered as events to any consumer
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Text block model, reading order and document readers
 * - `engine`: Translation engine interface and the LibreTranslate client:
 *   - `engine::libretranslate`: HTTP translation client
 *   - `engine::packages`: Local package store and remote package index
 * - `translation`: Capability gate and per-block translation
 * - `pipeline`: Run orchestration, output writers and the background worker
 * - `progress`: Progress events and the reporting channel
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod engine;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod progress;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, TargetLanguage};
pub use app_controller::Controller;
pub use document::{Block, BlockExtractor, DocumentHandle, DocumentReader};
pub use engine::{LanguagePackage, LibreTranslateEngine, TranslationEngine};
pub use errors::{AppError, DocumentError, EngineError, PersistenceError, RunError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1};
pub use pipeline::{Orchestrator, RunHandle, RunReport, RunSettings, RunState};
pub use progress::{EventKind, IssueKind, ProgressEvent, ProgressReporter, Severity};
