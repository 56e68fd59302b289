/*!
 * Unit tests for tokenization over longer, messier inputs
 */

use readflow::tokenizer::{group_sentences, split_paragraphs, tokenize, Punctuation};

#[test]
fn test_tokenize_onMultiParagraphProse_shouldTrackParagraphs() {
    let text = "First paragraph, with a clause. Second sentence here.\n\n\
                Second paragraph begins now. And ends.\n\n\
                Third one!";
    let paragraphs = split_paragraphs(text);
    assert_eq!(paragraphs.len(), 3);

    let tokens = tokenize(&paragraphs);
    assert!(tokens.iter().all(|t| t.paragraph_index < 3));
    let last_of_p0 = tokens.iter().filter(|t| t.paragraph_index == 0).count();
    assert_eq!(last_of_p0, 8);
}

#[test]
fn test_tokenize_withNumbersAndMixedCase_shouldKeepThemAsWords() {
    let paragraphs = vec!["Route 66 begins in Chicago; it ends in LA.".to_string()];
    let tokens = tokenize(&paragraphs);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Route", "66", "begins", "in", "Chicago", "it", "ends", "in", "LA"]
    );
    assert_eq!(tokens[4].punctuation, Punctuation::Semicolon);
    assert!(!tokens[4].sentence_end);
    assert!(tokens[8].sentence_end);
}

#[test]
fn test_tokenize_withUnmatchableSymbols_shouldSkipThem() {
    let paragraphs = vec!["Text (with) — some «symbols» & more".to_string()];
    let tokens = tokenize(&paragraphs);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Text", "with", "some", "symbols", "more"]);
}

#[test]
fn test_groupSentences_tokenRanges_shouldTileTheStream() {
    let paragraphs = split_paragraphs(
        "One two three. Four five? Six!\n\nSeven eight nine ten.",
    );
    let tokens = tokenize(&paragraphs);
    let sentences = group_sentences(&tokens);

    let mut expected_start = 0;
    for sentence in &sentences {
        assert_eq!(sentence.token_start, expected_start);
        assert_eq!(sentence.word_count, sentence.token_end - sentence.token_start);
        expected_start = sentence.token_end;
    }
    assert_eq!(expected_start, tokens.len());
}

#[test]
fn test_groupSentences_wordCounts_shouldSumToTokenCount() {
    let paragraphs = split_paragraphs("A few words here. And some more there. Trailing bit");
    let tokens = tokenize(&paragraphs);
    let sentences = group_sentences(&tokens);
    let total: usize = sentences.iter().map(|s| s.word_count).sum();
    assert_eq!(total, tokens.len());
}

#[test]
fn test_sentenceText_shouldReconstructReadableProse() {
    let paragraphs = split_paragraphs("Wait, what? Yes.");
    let tokens = tokenize(&paragraphs);
    let sentences = group_sentences(&tokens);
    assert_eq!(sentences[0].text, "Wait, what?");
    assert_eq!(sentences[1].text, "Yes.");
}
