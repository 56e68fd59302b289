/*!
 * Tokenization of clean running text into paragraphs, sentences, and words.
 *
 * Each word token carries the punctuation mark that follows it (if any), a
 * sentence-end flag, and its originating paragraph index. This is the stream
 * both the duration estimator and the RSVP scheduler consume. Tokenization is
 * fully deterministic and order-preserving so a session can be resumed
 * against a re-parsed document.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Word-like substrings (alphanumeric with one internal apostrophe/hyphen
// group) or a single pause-relevant punctuation mark
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+(?:['-][A-Za-z0-9]+)?|[.,;:!?]").unwrap());

// Runs of blank lines separate paragraphs
static PARAGRAPH_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Punctuation class attached to a word token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Punctuation {
    #[default]
    None,
    Comma,
    Semicolon,
    Colon,
    Period,
    Exclamation,
    Question,
}

impl Punctuation {
    /// Map a punctuation character to its class; anything else is `None`
    pub fn from_char(c: char) -> Self {
        match c {
            ',' => Self::Comma,
            ';' => Self::Semicolon,
            ':' => Self::Colon,
            '.' => Self::Period,
            '!' => Self::Exclamation,
            '?' => Self::Question,
            _ => Self::None,
        }
    }

    /// The character this class renders as, if any
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Comma => Some(','),
            Self::Semicolon => Some(';'),
            Self::Colon => Some(':'),
            Self::Period => Some('.'),
            Self::Exclamation => Some('!'),
            Self::Question => Some('?'),
        }
    }

    /// Whether this mark terminates a sentence
    pub fn is_sentence_end(&self) -> bool {
        matches!(self, Self::Period | Self::Exclamation | Self::Question)
    }

    /// Extra RSVP display pause for this mark, in milliseconds
    pub fn pause_ms(&self) -> u64 {
        match self {
            Self::Comma | Self::Semicolon | Self::Colon => 150,
            Self::Period | Self::Exclamation | Self::Question => 300,
            Self::None => 0,
        }
    }
}

/// A single word token in reading order. Immutable once the document is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The word text, without trailing punctuation
    pub text: String,
    /// Punctuation mark directly following the word, if any
    pub punctuation: Punctuation,
    /// True iff `punctuation` is a sentence terminator
    pub sentence_end: bool,
    /// Zero-based index of the paragraph this token came from
    pub paragraph_index: usize,
}

impl Token {
    /// The word as displayed in the RSVP loop: text plus its trailing mark
    pub fn display_text(&self) -> String {
        match self.punctuation.as_char() {
            Some(c) => format!("{}{}", self.text, c),
            None => self.text.clone(),
        }
    }
}

/// A contiguous run of tokens ending at a sentence terminator (or at the end
/// of the stream), derived from the token sequence at import time
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Reconstructed sentence text
    pub text: String,
    /// Number of word tokens in the sentence
    pub word_count: usize,
    /// Index of the first token of this sentence
    pub token_start: usize,
    /// Index one past the last token of this sentence
    pub token_end: usize,
    /// Paragraph index of the sentence's first token
    pub paragraph_index: usize,
}

/// Split text into paragraphs on runs of blank lines, trimming each and
/// dropping empty results
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_SPLIT_REGEX
        .split(text.trim())
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Tokenize paragraphs into the word-token stream.
///
/// A punctuation mark attaches to the preceding token in the same paragraph;
/// when several marks are adjacent only the first is recorded (one pause per
/// word). A mark with no preceding token in its paragraph is discarded.
pub fn tokenize(paragraphs: &[String]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (p_index, paragraph) in paragraphs.iter().enumerate() {
        let paragraph_first_token = tokens.len();

        for m in TOKEN_REGEX.find_iter(paragraph) {
            let matched = m.as_str();
            let mark = if matched.chars().count() == 1 {
                Punctuation::from_char(matched.chars().next().unwrap_or(' '))
            } else {
                Punctuation::None
            };

            if mark != Punctuation::None {
                if tokens.len() > paragraph_first_token {
                    if let Some(last) = tokens.last_mut() {
                        if last.punctuation == Punctuation::None {
                            last.punctuation = mark;
                            last.sentence_end = mark.is_sentence_end();
                        }
                    }
                }
                continue;
            }

            tokens.push(Token {
                text: matched.to_string(),
                punctuation: Punctuation::None,
                sentence_end: false,
                paragraph_index: p_index,
            });
        }
    }

    tokens
}

/// Group tokens into sentences: contiguous runs ending at a sentence-end
/// token or at the end of the stream
pub fn group_sentences(tokens: &[Token]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        if token.sentence_end {
            sentences.push(build_sentence(tokens, start, i + 1));
            start = i + 1;
        }
    }
    if start < tokens.len() {
        sentences.push(build_sentence(tokens, start, tokens.len()));
    }

    sentences
}

fn build_sentence(tokens: &[Token], start: usize, end: usize) -> Sentence {
    let mut text = String::new();
    for token in &tokens[start..end] {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&token.text);
        if let Some(c) = token.punctuation.as_char() {
            text.push(c);
        }
    }

    Sentence {
        text,
        word_count: end - start,
        token_start: start,
        token_end: end,
        paragraph_index: tokens[start].paragraph_index,
    }
}
