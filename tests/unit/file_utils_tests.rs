/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::common;
use pdftrans::file_utils::{FileManager, DOCUMENT_EXTENSION};

#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_artifactPath_shouldSitNextToDocument() {
    let path = FileManager::artifact_path(Path::new("/docs/reports/annual.pdf"), "Spanish");
    assert_eq!(path, Path::new("/docs/reports/annual_Spanish.txt"));
}

#[test]
fn test_checkpointPath_shouldCarryPageNumber() {
    let path = FileManager::checkpoint_path(Path::new("/docs/annual.pdf"), "English", 100);
    assert_eq!(path, Path::new("/docs/annual_English_CHECKPOINT_100.txt"));
}

#[test]
fn test_findFiles_shouldRecurseAndMatchCaseInsensitively() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_pdf(root, "b.pdf")?;
    common::create_test_pdf(root, "a.PDF")?;
    common::create_test_pdf(root, "nested/deeper/c.pdf")?;
    common::create_test_file(root, "notes.txt", "not a pdf")?;
    common::create_test_file(root, "pdf", "no extension")?;

    let found = FileManager::find_files(root, DOCUMENT_EXTENSION)?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.PDF", "b.pdf", "nested/deeper/c.pdf"]);
    Ok(())
}

#[test]
fn test_findFiles_withMissingRoot_shouldFail() {
    assert!(FileManager::find_files("/definitely/not/here", DOCUMENT_EXTENSION).is_err());
}

#[test]
fn test_writeToFile_shouldReplaceContentAndCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/doc_Spanish.txt");

    FileManager::write_to_file(&path, "first run with more text")?;
    FileManager::write_to_file(&path, "second run")?;

    assert_eq!(fs::read_to_string(&path)?, "second run");
    Ok(())
}

#[test]
fn test_appendToLogFile_shouldKeepPreviousLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs/run.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("first"));
    assert!(lines[1].ends_with("second"));
    Ok(())
}
