/*!
 * Unit tests for zone classification with custom configurations
 */

use crate::common;
use readflow::app_config::ZoneConfig;
use readflow::block_classifier::{TextBlock, Zone, ZoneClassifier};

#[test]
fn test_classify_withCustomFractions_shouldMoveBoundaries() {
    let classifier = ZoneClassifier::with_config(ZoneConfig {
        header_zone_fraction: 0.25,
        footer_zone_fraction: 0.25,
        ..ZoneConfig::default()
    });

    let block = |y0: f64| TextBlock::new("x", 0.0, y0, 100.0, y0 + 10.0, 1000.0, 12.0, 0);
    assert_eq!(classifier.classify(&block(200.0)), Zone::Header);
    assert_eq!(classifier.classify(&block(260.0)), Zone::Body);
    assert_eq!(classifier.classify(&block(760.0)), Zone::Footer);
}

#[test]
fn test_classify_withZeroFractions_shouldTreatEverythingAsBody() {
    let classifier = ZoneClassifier::with_config(ZoneConfig {
        header_zone_fraction: 0.0,
        footer_zone_fraction: 0.0,
        ..ZoneConfig::default()
    });

    let block = |y0: f64| TextBlock::new("x", 0.0, y0, 100.0, y0 + 10.0, 1000.0, 12.0, 0);
    assert_eq!(classifier.classify(&block(0.0)), Zone::Body);
    assert_eq!(classifier.classify(&block(500.0)), Zone::Body);
    assert_eq!(classifier.classify(&block(999.0)), Zone::Body);
}

#[test]
fn test_findRepeated_onSampleBlocks_shouldFlagRunningHeader() {
    let classifier = ZoneClassifier::new();
    let blocks = common::sample_blocks();
    let repeated = classifier.find_repeated_default(&blocks);
    assert!(repeated.contains("the long novel"));
    // Body prose differs per page, so it never repeats
    assert!(!repeated.iter().any(|s| s.contains("body prose")));
}

#[test]
fn test_findRepeated_withNormalizationDifferences_shouldStillMatch() {
    let classifier = ZoneClassifier::new();
    let variants = ["The  Title", "the title", "  THE TITLE  "];
    let blocks: Vec<TextBlock> = variants
        .iter()
        .enumerate()
        .map(|(page, text)| TextBlock::new(*text, 0.0, 50.0, 100.0, 60.0, 800.0, 10.0, page))
        .collect();
    let repeated = classifier.find_repeated(&blocks, 3);
    assert!(repeated.contains("the title"));
}
