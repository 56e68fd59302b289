/*!
 * Document assembly: the immutable import-time product of filtering and
 * tokenization, plus title/author metadata heuristics.
 *
 * A `Document` is created once at import and replaced wholesale on
 * re-import; tokens and sentences are never mutated in place.
 */

use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::tokenizer::{group_sentences, split_paragraphs, tokenize, Sentence, Token};

/// Lines shorter than this are not considered title candidates
const MIN_TITLE_LEN: usize = 10;

/// Lines longer than this are not considered title candidates
const MAX_TITLE_LEN: usize = 100;

/// How many leading lines are scanned for a title
const TITLE_SCAN_LINES: usize = 10;

/// An ingested document: metadata plus the immutable token stream
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier derived from the source path
    pub id: String,
    /// Document title (metadata or first-line heuristic)
    pub title: String,
    /// Document author, when known
    pub author: Option<String>,
    /// Word tokens in reading order
    pub tokens: Vec<Token>,
    /// Sentences derived from the token stream
    pub sentences: Vec<Sentence>,
    /// Import timestamp
    pub imported_at: DateTime<Utc>,
}

impl Document {
    /// Build a document from already-filtered running text
    pub fn from_clean_text(
        clean_text: &str,
        id: impl Into<String>,
        title: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        let paragraphs = split_paragraphs(clean_text);
        let tokens = tokenize(&paragraphs);
        let sentences = group_sentences(&tokens);

        Self {
            id: id.into(),
            title: title.into(),
            author,
            tokens,
            sentences,
            imported_at: Utc::now(),
        }
    }

    /// Number of word tokens
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of sentences
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// True when the document produced no tokens at all. A degenerate but
    /// valid state: playback treats it as already finished.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Stable document id: sha256 over the source path
pub fn document_id<P: AsRef<Path>>(path: P) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_ref().to_string_lossy().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Pick a title from the leading lines of the raw (pre-filter) text: the
/// first line of plausible title length that doesn't look like a running
/// header. Falls back to the file stem.
pub fn extract_title<P: AsRef<Path>>(source_path: P, raw_text: &str) -> String {
    for line in raw_text.lines().take(TITLE_SCAN_LINES) {
        let line = line.trim();
        let len = line.chars().count();
        if len <= MIN_TITLE_LEN || len >= MAX_TITLE_LEN {
            continue;
        }
        let lower = line.to_lowercase();
        if ["chapter", "page", "table of contents"]
            .iter()
            .any(|skip| lower.contains(skip))
        {
            continue;
        }
        return line.to_string();
    }

    source_path
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string())
}
