use anyhow::{Result, Context};
use chrono::Local;
use log::warn;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extension of the documents a run picks up
pub const DOCUMENT_EXTENSION: &str = "pdf";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Sibling output path "<stem>_<suffix>.txt" for a document
    fn sibling_txt_path(document: &Path, suffix: &str) -> PathBuf {
        let stem = document.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{}_{}.txt", stem, suffix);
        match document.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Path of the final translation for a document: `<stem>_<label>.txt`
    pub fn artifact_path<P: AsRef<Path>>(document: P, target_label: &str) -> PathBuf {
        Self::sibling_txt_path(document.as_ref(), target_label)
    }

    /// Path of a checkpoint: `<stem>_<label>_CHECKPOINT_<page>.txt`
    pub fn checkpoint_path<P: AsRef<Path>>(document: P, target_label: &str, page_number: usize) -> PathBuf {
        let suffix = format!("{}_CHECKPOINT_{}", target_label, page_number);
        Self::sibling_txt_path(document.as_ref(), &suffix)
    }

    /// Find files with a specific extension under a directory, recursively.
    ///
    /// Entries are visited sorted by file name, so the result is stable between
    /// runs over an unchanged tree. Unreadable subdirectories are skipped with a
    /// warning; an unreadable root is an error.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to read directory: {:?}", dir.as_ref()));
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Write a string to a file, replacing any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, content)
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
