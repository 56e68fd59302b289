/*!
 * readflow - content normalization and playback synchronization for
 * read-aloud and RSVP reading.
 *
 * The engine turns noisy extracted document text (positioned page blocks or
 * plain text exports) into a clean token stream, estimates how long each
 * sentence takes to speak, and keeps the visible reading position in sync
 * with elapsed playback time. Speech synthesis itself stays behind a
 * provider trait; the engine only consumes the durations providers report.
 *
 * Pipeline: zone classification and content filtering -> tokenization ->
 * duration estimation -> playback synchronization and RSVP scheduling.
 */

pub mod app_config;
pub mod app_controller;
pub mod block_classifier;
pub mod content_filter;
pub mod document;
pub mod duration;
pub mod errors;
pub mod playback;
pub mod scheduler;
pub mod synthesis;
pub mod tokenizer;

pub use app_config::Config;
pub use app_controller::Controller;
pub use block_classifier::{TextBlock, Zone, ZoneClassifier};
pub use content_filter::ContentFilter;
pub use document::Document;
pub use duration::{DurationEstimator, DurationTable};
pub use errors::{AppError, DocumentError, PlaybackError, SynthesisError};
pub use playback::{PlaybackState, PlaybackStatus, PlaybackSynchronizer};
pub use scheduler::{RsvpScheduler, Tick};
pub use tokenizer::{Punctuation, Sentence, Token};
