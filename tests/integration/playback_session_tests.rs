/*!
 * Full playback session tests: ingest, open, play, seek, speed changes,
 * and synthesis-reported durations working together
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::common;
use readflow::app_controller::Controller;
use readflow::playback::PlaybackStatus;
use readflow::synthesis::mock::MockSpeechProvider;

#[test]
fn test_session_ingestOpenPlaySeek_shouldTrackSentences() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(&common::sample_book_text(), "/books/sample.txt")
        .unwrap();
    let initial = controller.open(&document);
    assert_eq!(initial.status, PlaybackStatus::Ready);
    assert!(initial.total_secs > 0.0);

    controller.playback().play().unwrap();

    // Walk the whole document in small steps; the sentence index follows
    // monotonically
    let mut previous = 0;
    let mut position = 0.0;
    while position < initial.total_secs {
        let state = controller.playback().update(Some(position), None).unwrap();
        assert!(state.current_sentence_index >= previous);
        assert!(state.current_sentence_index < document.sentence_count());
        previous = state.current_sentence_index;
        position += 0.25;
    }

    // Jump past the end: finished, resolved to the last sentence
    let state = controller
        .playback()
        .update(Some(initial.total_secs + 5.0), None)
        .unwrap();
    assert!(state.is_finished());
    assert_eq!(state.current_sentence_index, document.sentence_count() - 1);
}

#[test]
fn test_session_pauseSpeedChangeResume_shouldHoldPosition() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(&common::sample_book_text(), "/books/sample.txt")
        .unwrap();
    controller.open(&document);
    controller.playback().play().unwrap();
    controller.playback().update(Some(3.0), None).unwrap();
    controller.playback().pause();

    let held = controller.playback().snapshot();
    let after_speed = controller.playback().update(None, Some(1.8)).unwrap();
    assert_eq!(after_speed.position_seconds, held.position_seconds);
    assert!(after_speed.current_sentence_index >= held.current_sentence_index);
    assert_eq!(after_speed.status, PlaybackStatus::Paused);

    controller.playback().play().unwrap();
    assert_eq!(controller.playback().snapshot().status, PlaybackStatus::Playing);
}

#[tokio::test]
async fn test_session_withSynthesis_shouldPreferReportedDurations() {
    let controller = Controller::new_with_defaults()
        .unwrap()
        .with_provider(Arc::new(MockSpeechProvider::working()));
    let document = controller
        .ingest_text(
            "Chapter 1\nThe quick fox jumps over dogs. Then it rests a while.",
            "/books/short.txt",
        )
        .unwrap();
    controller.open(&document);
    let estimated = controller.playback().snapshot().total_secs;

    controller.prefetch_synthesis(&document).await.unwrap();
    let reported = controller.playback().snapshot().total_secs;

    // The mock reports per-sentence durations from the same word counts but
    // without the per-sentence floor, so totals can only shrink or stay put
    assert!(reported > 0.0);
    assert!(reported <= estimated + 1e-9);
}

#[tokio::test]
async fn test_session_estimateOnlyProvider_shouldKeepEstimates() {
    let controller = Controller::new_with_defaults()
        .unwrap()
        .with_provider(Arc::new(MockSpeechProvider::estimate_only()));
    let document = controller
        .ingest_text("Chapter 1\nSome words to speak aloud.", "/books/est.txt")
        .unwrap();
    controller.open(&document);
    let before = controller.playback().snapshot().total_secs;
    controller.prefetch_synthesis(&document).await.unwrap();
    assert_eq!(controller.playback().snapshot().total_secs, before);
}

#[test]
fn test_session_adaptiveRamp_neverMovesPositionOrIndexBackward() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(&common::sample_book_text(), "/books/sample.txt")
        .unwrap();
    controller.open(&document);
    controller.playback().play().unwrap();
    controller.playback().update(Some(4.0), None).unwrap();
    let before = controller.playback().snapshot();

    // Simulate the periodic adaptive-speed poll over a long session
    let start = Instant::now();
    let mut previous_speed = before.speed;
    for minute in 1..=60 {
        let now = start + Duration::from_secs(minute * 60);
        let state = controller.playback().apply_adaptive_speed(now).unwrap();
        assert!(state.speed >= previous_speed);
        assert_eq!(state.position_seconds, before.position_seconds);
        assert!(state.current_sentence_index >= before.current_sentence_index);
        previous_speed = state.speed;
    }
    assert_eq!(previous_speed, controller.config().playback.max_speed);
}
