use std::path::Path;

use mupdf::{Document, TextPageFlags};

use super::{Block, DocumentHandle, DocumentReader};
use crate::errors::DocumentError;

/// MuPDF-based implementation of [`DocumentReader`].
///
/// Blocks are the text blocks of MuPDF's structured text, positioned at the
/// top-left corner of their bounding box. Lines of a block are joined with a
/// newline. Image blocks carry no lines and come out empty.
#[derive(Debug, Default)]
pub struct MupdfReader;

impl MupdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for MupdfReader {
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentHandle>, DocumentError> {
        let open_error = |reason: String| DocumentError::Open {
            path: path.to_path_buf(),
            reason,
        };

        let path_str = path
            .to_str()
            .ok_or_else(|| open_error("invalid path encoding".into()))?;
        let document = Document::open(path_str).map_err(|e| open_error(e.to_string()))?;
        let page_count = document.page_count().map_err(|e| open_error(e.to_string()))?;

        Ok(Box::new(MupdfDocument {
            path: path.to_path_buf(),
            document,
            page_count: page_count.max(0) as usize,
        }))
    }
}

struct MupdfDocument {
    path: std::path::PathBuf,
    document: Document,
    page_count: usize,
}

impl MupdfDocument {
    fn page_error(&self, page_index: usize, reason: String) -> DocumentError {
        DocumentError::Page {
            path: self.path.clone(),
            page: page_index + 1,
            reason,
        }
    }
}

impl DocumentHandle for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_blocks(&self, page_index: usize) -> Result<Vec<Block>, DocumentError> {
        let page = self
            .document
            .load_page(page_index as i32)
            .map_err(|e| self.page_error(page_index, e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| self.page_error(page_index, e.to_string()))?;

        let mut blocks = Vec::new();
        for block in text_page.blocks() {
            let bounds = block.bounds();
            let lines: Vec<String> = block
                .lines()
                .map(|line| {
                    line.chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect::<String>()
                })
                .collect();
            blocks.push(Block::new(bounds.x0, bounds.y0, lines.join("\n")));
        }

        Ok(blocks)
    }
}
