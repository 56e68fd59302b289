/*!
 * Position-aware classification of document text blocks.
 *
 * Positional decoders (PDF and friends) hand the engine raw text blocks with
 * page-relative rectangles and font metadata. This module classifies each
 * block into a page zone (header/body/footer) and detects boilerplate text
 * repeated verbatim across pages, so the content filter can drop both.
 */

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::app_config::ZoneConfig;

/// Normalized strings longer than this never qualify as boilerplate.
/// Running headers and footers are short; body sentences are not.
const MAX_BOILERPLATE_LEN: usize = 80;

/// A text block with position and font metadata, produced by an external
/// document decoder. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Raw block text
    pub text: String,
    /// Left edge of the bounding rectangle
    pub x0: f64,
    /// Top edge of the bounding rectangle
    pub y0: f64,
    /// Right edge of the bounding rectangle
    pub x1: f64,
    /// Bottom edge of the bounding rectangle
    pub y1: f64,
    /// Height of the page the block sits on
    pub page_height: f64,
    /// Average font size across the block's spans
    pub font_size: f64,
    /// Zero-based page number
    pub page_index: usize,
}

impl TextBlock {
    /// Create a new text block
    pub fn new(
        text: impl Into<String>,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        page_height: f64,
        font_size: f64,
        page_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            x0,
            y0,
            x1,
            y1,
            page_height,
            font_size,
            page_index,
        }
    }
}

/// Vertical page zone a block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Header,
    Body,
    Footer,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Header => write!(f, "header"),
            Zone::Body => write!(f, "body"),
            Zone::Footer => write!(f, "footer"),
        }
    }
}

/// Classifies text blocks into page zones and finds repeated boilerplate
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    config: ZoneConfig,
}

impl ZoneClassifier {
    /// Create a classifier with default zone fractions
    pub fn new() -> Self {
        Self {
            config: ZoneConfig::default(),
        }
    }

    /// Create a classifier with custom zone settings
    pub fn with_config(config: ZoneConfig) -> Self {
        Self { config }
    }

    /// The zone configuration this classifier was built with
    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// Classify a block as header, body, or footer based on its vertical
    /// position. Total over all inputs: malformed bounds (negative y, y past
    /// the page edge, degenerate page height) are clamped to [0, 1] before
    /// comparison rather than rejected.
    pub fn classify(&self, block: &TextBlock) -> Zone {
        let relative_y = if block.page_height > 0.0 {
            (block.y0 / block.page_height).clamp(0.0, 1.0)
        } else {
            // No usable position signal; lands in the header zone like y0 = 0
            0.0
        };

        if relative_y < self.config.header_zone_fraction {
            Zone::Header
        } else if relative_y > 1.0 - self.config.footer_zone_fraction {
            Zone::Footer
        } else {
            Zone::Body
        }
    }

    /// Find normalized strings that repeat across at least `min_occurrences`
    /// distinct pages. Running headers and footers repeat near-verbatim page
    /// after page; one-off body sentences do not. With fewer total pages than
    /// `min_occurrences` nothing can qualify and the set is empty.
    pub fn find_repeated(&self, blocks: &[TextBlock], min_occurrences: usize) -> HashSet<String> {
        if min_occurrences == 0 {
            return HashSet::new();
        }

        let mut pages_by_text: HashMap<String, HashSet<usize>> = HashMap::new();
        for block in blocks {
            let norm = normalize_text(&block.text);
            if norm.is_empty() || norm.chars().count() > MAX_BOILERPLATE_LEN {
                continue;
            }
            pages_by_text.entry(norm).or_default().insert(block.page_index);
        }

        let repeated: HashSet<String> = pages_by_text
            .into_iter()
            .filter(|(_, pages)| pages.len() >= min_occurrences)
            .map(|(text, _)| text)
            .collect();

        debug!(
            "Boilerplate detection: {} blocks scanned, {} repeated strings",
            blocks.len(),
            repeated.len()
        );

        repeated
    }

    /// Find repeated strings using the configured occurrence threshold
    pub fn find_repeated_default(&self, blocks: &[TextBlock]) -> HashSet<String> {
        self.find_repeated(blocks, self.config.min_repeat_occurrences)
    }
}

impl Default for ZoneClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize block text for repetition comparison: trim, lowercase, and
/// collapse internal whitespace runs to single spaces
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
