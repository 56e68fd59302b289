/*!
 * Content filtering for ingested documents.
 *
 * Strips non-content noise before tokenization: frontmatter, page numbers,
 * footnotes, and headers/footers repeated across the document. Positional
 * input goes through zone classification first; plain text falls back to
 * line-based heuristics. Every step is total: unmatched patterns pass
 * through unfiltered, because under-filtering beats corrupting content.
 */

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{FilteringConfig, ZoneConfig};
use crate::block_classifier::{normalize_text, TextBlock, Zone, ZoneClassifier};

// Chapter-like markers that signal the start of real content
static CHAPTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(chapter\s+[0-9ivxlcdm]+\b|prologue\b|part\s+[0-9ivxlcdm]+\b|book\s+[0-9ivxlcdm]+\b)")
        .unwrap()
});

// "Page 12", "Page 12 of 340", or a bare number on its own line
static PAGE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(page\s+\d+\s*(of\s*\d+)?|\d+)\s*$").unwrap());

// Inline [3] / [iv] footnote references
static INLINE_FOOTNOTE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+|[ivxlcdm]+)\]").unwrap());

// Lines that open like a footnote: "[3] ...", "3. ...", "3) ..."
static FOOTNOTE_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\[(\d+|[ivxlcdm]+)\]|\d+[.)])\s+").unwrap());

/// Only the first lines of a document are scanned for a chapter marker
const CONTENT_START_SCAN_LINES: usize = 1000;

/// Normalized lines longer than this are never treated as repeated noise
const MAX_REPEATED_LINE_LEN: usize = 80;

/// Footnote-looking lines longer than this are kept; dropping long numbered
/// lines would kill legitimate numbered sections
const MAX_FOOTNOTE_LINE_LEN: usize = 200;

/// Strips non-content noise from positional blocks or plain text
#[derive(Debug, Clone)]
pub struct ContentFilter {
    filtering: FilteringConfig,
    classifier: ZoneClassifier,
    min_body_font_size: f64,
}

impl ContentFilter {
    /// Create a filter with default settings
    pub fn new() -> Self {
        Self::with_config(FilteringConfig::default(), ZoneConfig::default())
    }

    /// Create a filter with custom filtering and zone settings
    pub fn with_config(filtering: FilteringConfig, zones: ZoneConfig) -> Self {
        let min_body_font_size = zones.min_body_font_size;
        Self {
            filtering,
            classifier: ZoneClassifier::with_config(zones),
            min_body_font_size,
        }
    }

    /// Filter positioned blocks: drop header and footer zones, drop
    /// boilerplate repeated across pages, drop sub-minimum font sizes, and
    /// concatenate the surviving body text in original order.
    pub fn filter_blocks(&self, blocks: &[TextBlock]) -> String {
        let repeated = self.classifier.find_repeated_default(blocks);

        let mut kept: Vec<&str> = Vec::new();
        let mut dropped = 0usize;
        for block in blocks {
            if self.classifier.classify(block) != Zone::Body {
                dropped += 1;
                continue;
            }
            if repeated.contains(&normalize_text(&block.text)) {
                dropped += 1;
                continue;
            }
            if self.min_body_font_size > 0.0 && block.font_size < self.min_body_font_size {
                dropped += 1;
                continue;
            }
            kept.push(block.text.as_str());
        }

        debug!(
            "Positional filter: kept {} of {} blocks ({} dropped)",
            kept.len(),
            blocks.len(),
            dropped
        );

        kept.join("\n")
    }

    /// Filter plain text with line-based heuristics: frontmatter skip,
    /// repeated-line removal, page-number lines, and footnotes.
    pub fn filter_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();

        if self.filtering.skip_frontmatter {
            match Self::find_content_start(&lines) {
                Some(start_idx) => {
                    lines.drain(..start_idx);
                }
                None => {
                    // No chapter marker anywhere: skip a leading fraction of
                    // characters as probable frontmatter
                    let n_chars = (text.chars().count() as f64
                        * self.filtering.frontmatter_skip_fraction)
                        as usize;
                    let remainder: String = text.chars().skip(n_chars).collect();
                    lines = remainder.lines().map(|l| l.to_string()).collect();
                }
            }
        }

        if self.filtering.skip_repeated_lines {
            lines = self.remove_repeated_lines(lines);
        }

        if self.filtering.skip_page_numbers {
            lines.retain(|ln| !PAGE_NUMBER_REGEX.is_match(ln.trim()));
        }

        if self.filtering.skip_footnotes {
            lines = lines
                .into_iter()
                .filter(|ln| {
                    let trimmed = ln.trim();
                    !(FOOTNOTE_LINE_REGEX.is_match(trimmed)
                        && trimmed.chars().count() <= MAX_FOOTNOTE_LINE_LEN)
                })
                .map(|ln| INLINE_FOOTNOTE_REGEX.replace_all(&ln, "").into_owned())
                .collect();
        }

        lines.join("\n")
    }

    /// Scan the leading lines for a chapter-like marker and return its index
    fn find_content_start(lines: &[String]) -> Option<usize> {
        lines
            .iter()
            .take(CONTENT_START_SCAN_LINES)
            .position(|ln| CHAPTER_REGEX.is_match(ln))
    }

    /// Remove short normalized lines appearing more often than the configured
    /// threshold across the whole document (running headers in text exports)
    fn remove_repeated_lines(&self, lines: Vec<String>) -> Vec<String> {
        let mut freq: HashMap<String, usize> = HashMap::new();
        let norms: Vec<String> = lines.iter().map(|ln| normalize_text(ln)).collect();
        for norm in &norms {
            if norm.is_empty() || norm.chars().count() > MAX_REPEATED_LINE_LEN {
                continue;
            }
            *freq.entry(norm.clone()).or_insert(0) += 1;
        }

        let threshold = self.filtering.repeat_threshold;
        let repeated: std::collections::HashSet<&String> = freq
            .iter()
            .filter(|&(_, &count)| count > threshold)
            .map(|(norm, _)| norm)
            .collect();

        if repeated.is_empty() {
            return lines;
        }

        lines
            .into_iter()
            .zip(norms)
            .filter(|(_, norm)| !repeated.contains(norm))
            .map(|(ln, _)| ln)
            .collect()
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}
