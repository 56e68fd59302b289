/*!
 * End-to-end RSVP reading loop tests: document to word-by-word display
 */

use std::time::{Duration, Instant};

use crate::common;
use readflow::app_config::Config;
use readflow::app_controller::Controller;
use readflow::scheduler::Tick;

#[test]
fn test_rsvp_overIngestedDocument_shouldVisitEveryWordOnce() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(&common::sample_book_text(), "/books/sample.txt")
        .unwrap();

    let start = Instant::now();
    let mut scheduler = controller.scheduler_for(&document, start);
    let mut visited = vec![scheduler.current_index()];
    let mut now = start;
    while !scheduler.is_finished() {
        now += Duration::from_millis(25);
        if let Tick::Advanced(index) = scheduler.tick(now) {
            visited.push(index);
        }
    }
    assert_eq!(visited, (0..document.word_count()).collect::<Vec<_>>());
}

#[test]
fn test_rsvp_pace_shouldMatchConfiguredWpm() {
    let mut config = Config::default();
    config.playback.rsvp_wpm = 600.0;
    let controller = Controller::with_config(config).unwrap();
    let document = controller
        .ingest_text("Chapter 1\nPlain words with no marks", "/books/pace.txt")
        .unwrap();
    let scheduler = controller.scheduler_for(&document, Instant::now());
    assert_eq!(scheduler.base_interval(), Duration::from_millis(100));
}

#[test]
fn test_rsvp_seekToSentenceStart_shouldResumeFromThere() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller
        .ingest_text(
            "Chapter 1\nFirst sentence here. Second sentence there. Third one now.",
            "/books/seek.txt",
        )
        .unwrap();

    // Seek the word loop to the start of the second sentence, the way a
    // sentence-level skip control would
    let target = document.sentences[1].token_start;
    let start = Instant::now();
    let mut scheduler = controller.scheduler_for(&document, start);
    scheduler.seek(target, start);
    assert_eq!(scheduler.current_index(), target);

    let mut now = start;
    let mut last = target;
    while !scheduler.is_finished() {
        now += Duration::from_millis(25);
        if let Tick::Advanced(index) = scheduler.tick(now) {
            last = index;
        }
    }
    assert_eq!(last, document.word_count() - 1);
}

#[test]
fn test_rsvp_emptyDocument_shouldFinishImmediately() {
    let controller = Controller::new_with_defaults().unwrap();
    let document = controller.ingest_text("", "/books/empty.txt").unwrap();
    let mut scheduler = controller.scheduler_for(&document, Instant::now());
    assert!(scheduler.is_finished());
    assert_eq!(scheduler.tick(Instant::now()), Tick::Finished);
}
