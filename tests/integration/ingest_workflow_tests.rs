/*!
 * End-to-end tests for the ingestion pipeline: raw source to playable
 * document
 */

use crate::common;
use readflow::app_config::Config;
use readflow::app_controller::Controller;
use readflow::errors::AppError;

#[test]
fn test_ingestText_fullPipeline_shouldProduceCleanDocument() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(&common::sample_book_text(), "/books/sample.txt")
        .unwrap();

    assert!(document.word_count() > 0);
    assert!(document.sentence_count() > 0);
    // Nothing from the frontmatter or the running header survives
    // tokenization
    assert!(!document.tokens.iter().any(|t| t.text == "Copyright"));
    assert!(!document.sentences.iter().any(|s| s.text.contains("SAMPLE OF PROSE")));
    // Sentence ranges tile the token stream
    let total: usize = document.sentences.iter().map(|s| s.word_count).sum();
    assert_eq!(total, document.tokens.len());
}

#[test]
fn test_ingestBlocks_fullPipeline_shouldDropLayoutNoise() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_blocks(&common::sample_blocks(), "/books/layout.pdf")
        .unwrap();

    assert!(document.word_count() > 0);
    assert!(!document.sentences.iter().any(|s| s.text.contains("Long Novel")));
    assert!(document
        .sentences
        .iter()
        .any(|s| s.text.contains("Body prose for page 1")));
}

#[test]
fn test_ingestFile_shouldDeriveStableIdAndTitle() {
    let controller = Controller::new_with_defaults().unwrap();
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "novel.txt",
        "The Remarkable Journey\nChapter 1\nIt began on a Tuesday morning.",
    )
    .unwrap();

    let first = controller.ingest_file(&path).unwrap();
    let second = controller.ingest_file(&path).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.title, "The Remarkable Journey");
    assert!(first.tokens.iter().any(|t| t.text == "Tuesday"));
}

#[test]
fn test_ingestFile_withOnlyNoise_shouldReportNoContent() {
    let controller = Controller::new_with_defaults().unwrap();
    let temp_dir = common::create_temp_dir().unwrap();
    // Bare page numbers only; filtering leaves nothing to tokenize
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "blank.txt",
        "1\n2\n3\n",
    )
    .unwrap();

    let result = controller.ingest_file(&path);
    assert!(matches!(result, Err(AppError::Document(_))));
}

#[test]
fn test_ingestText_withFilteringDisabled_shouldKeepEverything() {
    let mut config = Config::default();
    config.filtering.skip_frontmatter = false;
    config.filtering.skip_page_numbers = false;
    config.filtering.skip_footnotes = false;
    config.filtering.skip_repeated_lines = false;
    let controller = Controller::with_config(config).unwrap();

    let document = controller
        .ingest_text("Copyright notice\n42\nReal prose.", "/books/raw.txt")
        .unwrap();
    assert!(document.tokens.iter().any(|t| t.text == "Copyright"));
    assert!(document.tokens.iter().any(|t| t.text == "42"));
}
