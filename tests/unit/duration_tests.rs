/*!
 * Unit tests for duration estimation across speaking rates
 */

use readflow::duration::{DurationEstimator, DurationTable};
use readflow::tokenizer::{group_sentences, split_paragraphs, tokenize};

fn table_for(text: &str, wpm: f64) -> DurationTable {
    let sentences = group_sentences(&tokenize(&split_paragraphs(text)));
    let estimator = DurationEstimator::new(wpm);
    DurationTable::from_durations(estimator.estimate(&sentences))
}

#[test]
fn test_estimate_scalesInverselyWithRate() {
    let slow = table_for("One two three four five six seven eight.", 100.0);
    let fast = table_for("One two three four five six seven eight.", 200.0);
    assert!((slow.total_secs() - 4.8).abs() < 1e-9);
    assert!((fast.total_secs() - 2.4).abs() < 1e-9);
}

#[test]
fn test_table_startOf_matchesCumulativeDurations() {
    let table = table_for(
        "The quick fox jumps. Then rests. Done.",
        150.0,
    );
    // Durations 1.6, 0.8, 0.5
    assert_eq!(table.start_of(0), Some(0.0));
    assert!((table.start_of(1).unwrap() - 1.6).abs() < 1e-9);
    assert!((table.start_of(2).unwrap() - 2.4).abs() < 1e-9);
    assert_eq!(table.start_of(3), None);
}

#[test]
fn test_resolve_atExactBoundaries_shouldEnterNextSentence() {
    let table = table_for("The quick fox jumps. Then rests. Done.", 150.0);
    // Query the accumulated boundaries themselves; a decimal literal like
    // 2.4 can sit just below the f64 prefix sum and resolve one short
    let second_start = table.start_of(1).unwrap();
    let third_start = table.start_of(2).unwrap();
    assert_eq!(table.resolve(second_start - 1e-9), 0);
    assert_eq!(table.resolve(second_start), 1);
    assert_eq!(table.resolve(third_start - 1e-9), 1);
    assert_eq!(table.resolve(third_start), 2);
}

#[test]
fn test_floor_appliesPerSentenceNotPerDocument() {
    // Five one-word sentences each get the 0.5s floor
    let table = table_for("A. B. C. D. E.", 150.0);
    assert_eq!(table.len(), 5);
    assert!((table.total_secs() - 2.5).abs() < 1e-9);
    assert!(table.durations().iter().all(|&d| d == 0.5));
}

#[test]
fn test_authoritativeOverride_keepsResolveMonotonic() {
    let mut table = table_for("One two three. Four five six. Seven eight nine.", 150.0);
    table.set_authoritative(1, 10.0);
    let mut previous = 0;
    for step in 0..150 {
        let index = table.resolve(step as f64 * 0.1);
        assert!(index >= previous);
        previous = index;
    }
}
