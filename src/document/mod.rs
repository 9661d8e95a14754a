/*!
 * Document reading and block extraction.
 *
 * The PDF parser itself sits behind [`DocumentReader`]; this module turns what
 * a reader reports into blocks in reading order, top to bottom and then left
 * to right, dropping blocks with no meaningful text.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::DocumentError;

#[cfg(feature = "mupdf")]
pub mod mupdf_reader;

#[cfg(feature = "mupdf")]
pub use self::mupdf_reader::MupdfReader;

/// One unit of text on a page, as reported by the reader
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Horizontal offset of the block origin
    pub x: f32,
    /// Vertical offset of the block origin
    pub y: f32,
    /// Raw block text
    pub text: String,
}

impl Block {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self { x, y, text: text.into() }
    }

    /// Whether the block carries content worth translating.
    ///
    /// Empty blocks and single characters (bullets, page ornaments) are not.
    pub fn is_meaningful(&self) -> bool {
        self.text.trim().chars().count() > 1
    }
}

/// Sort blocks by (vertical, horizontal) position
pub fn sort_reading_order(blocks: &mut [Block]) {
    blocks.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
}

/// Order blocks for reading and keep only meaningful ones, with trimmed text
pub fn reading_order(mut blocks: Vec<Block>) -> Vec<Block> {
    sort_reading_order(&mut blocks);
    blocks
        .into_iter()
        .filter(Block::is_meaningful)
        .map(|block| Block {
            text: block.text.trim().to_string(),
            ..block
        })
        .collect()
}

/// An open document. Resources are released when the handle is dropped.
pub trait DocumentHandle {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Every text block of a page (0-based index), in reader order
    fn page_blocks(&self, page_index: usize) -> Result<Vec<Block>, DocumentError>;
}

/// Opens documents for extraction
pub trait DocumentReader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentHandle>, DocumentError>;
}

/// Opens documents through a reader and yields ordered blocks per page
#[derive(Clone)]
pub struct BlockExtractor {
    reader: Arc<dyn DocumentReader>,
}

impl BlockExtractor {
    pub fn new(reader: Arc<dyn DocumentReader>) -> Self {
        Self { reader }
    }

    pub fn open(&self, path: &Path) -> Result<OpenDocument, DocumentError> {
        let handle = self.reader.open(path)?;
        Ok(OpenDocument {
            path: path.to_path_buf(),
            handle,
        })
    }
}

/// A document opened by a [`BlockExtractor`]
pub struct OpenDocument {
    path: PathBuf,
    handle: Box<dyn DocumentHandle>,
}

impl OpenDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.handle.page_count()
    }

    /// Meaningful blocks of a page (0-based index) in reading order
    pub fn blocks_of(&self, page_index: usize) -> Result<Vec<Block>, DocumentError> {
        if page_index >= self.page_count() {
            return Err(DocumentError::Page {
                path: self.path.clone(),
                page: page_index + 1,
                reason: format!("document has only {} pages", self.page_count()),
            });
        }
        let blocks = self.handle.page_blocks(page_index)?;
        Ok(reading_order(blocks))
    }
}
