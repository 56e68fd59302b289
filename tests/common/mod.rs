/*!
 * Common test utilities for the readflow test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use readflow::block_classifier::TextBlock;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small book-like text export: frontmatter, a chapter marker, running
/// headers, page numbers, footnotes, and real prose
pub fn sample_book_text() -> String {
    let header = "A SAMPLE OF PROSE";
    let mut lines = vec![
        "Copyright 2020 by Nobody".to_string(),
        "All rights reserved.".to_string(),
        "Chapter 1".to_string(),
    ];
    for page in 1..=4 {
        lines.push(header.to_string());
        lines.push(format!(
            "The narrative continues on page {page}. It has several sentences, \
             some with clauses; others are short."
        ));
        lines.push(format!("Another paragraph follows[{page}] with a marker."));
        lines.push(format!("{page}"));
    }
    lines.push("[1] A footnote explaining something minor.".to_string());
    lines.join("\n")
}

/// Positioned blocks spanning three pages: a running header, one body
/// paragraph per page, and a footer page number
pub fn sample_blocks() -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    for page in 0..3 {
        blocks.push(TextBlock::new(
            "The Long Novel", 100.0, 20.0, 300.0, 40.0, 800.0, 10.0, page,
        ));
        blocks.push(TextBlock::new(
            format!("Body prose for page {page}. It reads well, and ends properly."),
            80.0,
            400.0,
            520.0,
            440.0,
            800.0,
            12.0,
            page,
        ));
        blocks.push(TextBlock::new(
            format!("{}", page + 1),
            300.0,
            780.0,
            320.0,
            795.0,
            800.0,
            9.0,
            page,
        ));
    }
    blocks
}
