/*!
 * Tests for block ordering and extraction through a reader
 */

use anyhow::Result;
use rand::seq::SliceRandom;
use std::path::Path;

use crate::common::mock_reader::MockReader;
use pdftrans::document::{reading_order, Block, BlockExtractor};
use pdftrans::errors::DocumentError;

/// Ordering does not depend on the order the reader reports blocks in
#[test]
fn test_readingOrder_withShuffledInput_shouldBeStable() {
    let expected: Vec<Block> = (0..30)
        .flat_map(|row| {
            (0..3).map(move |col| Block::new(col as f32 * 150.0, row as f32 * 12.5, format!("r{}c{}", row, col)))
        })
        .collect();

    let mut rng = rand::rng();
    for _ in 0..10 {
        let mut shuffled = expected.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(reading_order(shuffled), expected);
    }
}

#[test]
fn test_readingOrder_withEqualPositions_shouldKeepEveryBlock() {
    let blocks = vec![
        Block::new(10.0, 10.0, "same spot one"),
        Block::new(10.0, 10.0, "same spot two"),
    ];
    let ordered = reading_order(blocks);
    assert_eq!(ordered.len(), 2);
}

#[test]
fn test_readingOrder_withOnlyNoise_shouldBeEmpty() {
    let blocks = vec![Block::new(0.0, 0.0, "-"), Block::new(0.0, 5.0, "  "), Block::new(0.0, 9.0, "\n3\n")];
    assert!(reading_order(blocks).is_empty());
}

#[test]
fn test_extractor_blocksOf_shouldOrderAndFilterPages() -> Result<()> {
    let reader = MockReader::new()
        .with_blocks(
            "paper.pdf",
            vec![vec![
                Block::new(300.0, 40.0, "Column two"),
                Block::new(20.0, 40.0, "Column one"),
                Block::new(20.0, 5.0, "Title"),
                Block::new(500.0, 780.0, "1"),
            ]],
        )
        .into_reader();
    let extractor = BlockExtractor::new(reader.clone());

    let document = extractor.open(Path::new("/docs/paper.pdf"))?;
    assert_eq!(document.page_count(), 1);
    assert_eq!(document.path(), Path::new("/docs/paper.pdf"));

    let texts: Vec<String> = document.blocks_of(0)?.into_iter().map(|b| b.text).collect();
    assert_eq!(texts, vec!["Title", "Column one", "Column two"]);
    assert_eq!(reader.opened(), vec!["paper.pdf"]);
    Ok(())
}

#[test]
fn test_extractor_blocksOf_pastLastPage_shouldFail() -> Result<()> {
    let reader = MockReader::new().with_document("short.pdf", vec![vec!["only page"]]).into_reader();
    let document = BlockExtractor::new(reader).open(Path::new("short.pdf"))?;

    let error = document.blocks_of(1).err();
    assert!(matches!(error, Some(DocumentError::Page { page: 2, .. })));
    Ok(())
}

#[test]
fn test_extractor_open_withUnreadableDocument_shouldFail() {
    let reader = MockReader::new().with_unreadable("scan.pdf").into_reader();
    let result = BlockExtractor::new(reader).open(Path::new("scan.pdf"));
    assert!(matches!(result, Err(DocumentError::Open { .. })));
}
