/*!
 * Playback synchronization state machine.
 *
 * Owns the single live `PlaybackState` for the active document and maps
 * elapsed playback time to the active sentence. All mutation goes through
 * one mutex; readers take a consistent snapshot instead of reading fields
 * individually, so a half-updated (position, speed, sentence_index) triple
 * is never observable.
 *
 * Adaptive speed is a pure function of session wall-clock time and is kept
 * strictly separate from position tracking: it changes the rate tokens
 * advance or speech is requested at, never the content position.
 */

use std::time::{Duration, Instant};

use log::debug;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::app_config::PlaybackConfig;
use crate::document::Document;
use crate::duration::{DurationEstimator, DurationTable, SPEED_EPSILON};
use crate::errors::PlaybackError;

/// Lower bound for the playback speed multiplier
pub const MIN_SPEED: f64 = 0.5;

/// Upper bound for the playback speed multiplier
pub const MAX_SPEED: f64 = 3.0;

/// Lifecycle status of the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No document loaded
    Idle,
    /// Document loaded, position at zero
    Ready,
    /// Position advancing
    Playing,
    /// Position held
    Paused,
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackStatus::Idle => write!(f, "idle"),
            PlaybackStatus::Ready => write!(f, "ready"),
            PlaybackStatus::Playing => write!(f, "playing"),
            PlaybackStatus::Paused => write!(f, "paused"),
        }
    }
}

/// Consistent read-only snapshot of the live playback state
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Lifecycle status
    pub status: PlaybackStatus,
    /// Elapsed playback position in seconds (never negative; may exceed the
    /// document length, which signals "finished" to the caller)
    pub position_seconds: f64,
    /// Current speed multiplier within [0.5, 3.0]
    pub speed: f64,
    /// Index of the active sentence
    pub current_sentence_index: usize,
    /// Reading-session identifier, new on every load
    pub session_id: String,
    /// Wall-clock instant the session started
    pub session_start: Instant,
    /// Total estimated playback time of the loaded document
    pub total_secs: f64,
}

impl PlaybackState {
    /// Whether playback has run past the end of the document
    pub fn is_finished(&self) -> bool {
        self.status != PlaybackStatus::Idle && self.position_seconds >= self.total_secs
    }
}

struct Inner {
    status: PlaybackStatus,
    position_seconds: f64,
    speed: f64,
    session_id: String,
    session_start: Instant,
    current_sentence_index: usize,
    /// Durations estimated at speed 1.0; the live table is this divided by
    /// the current speed
    base_durations: Vec<f64>,
    table: DurationTable,
}

impl Inner {
    fn reset(&mut self, status: PlaybackStatus, speed: f64) {
        self.status = status;
        self.position_seconds = 0.0;
        self.speed = speed;
        self.session_id = Uuid::new_v4().to_string();
        self.session_start = Instant::now();
        self.current_sentence_index = 0;
        self.base_durations.clear();
        self.table = DurationTable::empty();
    }

    fn rebuild_table(&mut self) {
        let scaled: Vec<f64> = self
            .base_durations
            .iter()
            .map(|d| d / self.speed)
            .collect();
        self.table = DurationTable::from_durations(scaled);
    }
}

/// The playback synchronization state machine
pub struct PlaybackSynchronizer {
    config: PlaybackConfig,
    inner: Mutex<Inner>,
}

impl PlaybackSynchronizer {
    /// Create an idle synchronizer with the given playback settings
    pub fn new(config: PlaybackConfig) -> Self {
        let start_speed = config.start_speed.clamp(MIN_SPEED, MAX_SPEED);
        Self {
            config,
            inner: Mutex::new(Inner {
                status: PlaybackStatus::Idle,
                position_seconds: 0.0,
                speed: start_speed,
                session_id: Uuid::new_v4().to_string(),
                session_start: Instant::now(),
                current_sentence_index: 0,
                base_durations: Vec::new(),
                table: DurationTable::empty(),
            }),
        }
    }

    /// The playback configuration this synchronizer was built with
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Load a document: transition to Ready with position 0, the configured
    /// start speed, a fresh session, and a recomputed duration table. An
    /// empty document is valid and loads as already-finished.
    pub fn load(&self, document: &Document) {
        let start_speed = self.config.start_speed.clamp(MIN_SPEED, MAX_SPEED);
        let estimator = DurationEstimator::new(self.config.target_wpm);
        let base = estimator.estimate(&document.sentences);

        let mut inner = self.inner.lock();
        inner.reset(PlaybackStatus::Ready, start_speed);
        inner.base_durations = base;
        inner.rebuild_table();
        debug!(
            "Loaded document '{}': {} sentences, {:.1}s estimated",
            document.title,
            inner.table.len(),
            inner.table.total_secs()
        );
    }

    /// Close the active document and return to Idle; all state is reset
    pub fn close(&self) {
        let start_speed = self.config.start_speed.clamp(MIN_SPEED, MAX_SPEED);
        let mut inner = self.inner.lock();
        inner.reset(PlaybackStatus::Idle, start_speed);
    }

    /// Start advancing; requires a loaded document
    pub fn play(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();
        match inner.status {
            PlaybackStatus::Idle => Err(PlaybackError::NoDocument),
            _ => {
                inner.status = PlaybackStatus::Playing;
                Ok(())
            }
        }
    }

    /// Hold the position; a no-op unless currently playing
    pub fn pause(&self) {
        let mut inner = self.inner.lock();
        if inner.status == PlaybackStatus::Playing {
            inner.status = PlaybackStatus::Paused;
        }
    }

    /// Apply a partial update of position and/or speed.
    ///
    /// Position is clamped to >= 0 but never to the document length;
    /// running past the end is a valid terminal state the caller detects.
    /// Speed is clamped into [0.5, 3.0]. NaN or infinite position, or NaN,
    /// infinite, or negative speed, is rejected with `InvalidArgument` and
    /// the state is left completely unchanged (no partial update).
    ///
    /// A material speed change (beyond epsilon) rebuilds the duration table
    /// and re-derives the sentence index from the new table at the current
    /// position. Continuity holds: the index never moves backward while the
    /// position stands still.
    pub fn update(
        &self,
        position_seconds: Option<f64>,
        speed: Option<f64>,
    ) -> Result<PlaybackState, PlaybackError> {
        // Validate everything before touching state
        if let Some(pos) = position_seconds {
            if !pos.is_finite() {
                return Err(PlaybackError::InvalidArgument(format!(
                    "position must be finite, got {pos}"
                )));
            }
        }
        if let Some(sp) = speed {
            if !sp.is_finite() || sp < 0.0 {
                return Err(PlaybackError::InvalidArgument(format!(
                    "speed must be finite and non-negative, got {sp}"
                )));
            }
        }

        let mut inner = self.inner.lock();

        if let Some(pos) = position_seconds {
            inner.position_seconds = pos.max(0.0);
            inner.current_sentence_index = inner.table.resolve(inner.position_seconds);
        }

        if let Some(sp) = speed {
            let clamped = sp.clamp(MIN_SPEED, MAX_SPEED);
            if (clamped - inner.speed).abs() > SPEED_EPSILON {
                inner.speed = clamped;
                inner.rebuild_table();
                // Re-derive from the new table, but never step backward for
                // a held position
                let resolved = inner.table.resolve(inner.position_seconds);
                inner.current_sentence_index = resolved.max(inner.current_sentence_index);
            }
        }

        Ok(Self::snapshot_inner(&inner))
    }

    /// Map an elapsed position to a sentence index using the live duration
    /// table. `resolve(0) == 0`; an empty table resolves to 0.
    pub fn resolve(&self, position_seconds: f64) -> usize {
        self.inner.lock().table.resolve(position_seconds)
    }

    /// Session-ramp speed: the configured start speed plus one increment per
    /// full interval elapsed since the session started, capped at max_speed.
    /// Pure in elapsed wall-clock time; independent of content position.
    pub fn adaptive_speed(&self, now: Instant) -> f64 {
        let inner = self.inner.lock();
        let elapsed = now.saturating_duration_since(inner.session_start);
        adaptive_speed_for(&self.config, elapsed)
    }

    /// Apply the adaptive speed for `now` through the normal update path, so
    /// validation and continuity rules hold
    pub fn apply_adaptive_speed(&self, now: Instant) -> Result<PlaybackState, PlaybackError> {
        let target = self.adaptive_speed(now);
        self.update(None, Some(target))
    }

    /// Prefer an authoritative duration reported by the synthesis
    /// collaborator over the estimate for one sentence. The reported value
    /// reflects the current speed; the speed-1.0 base is back-derived so
    /// later speed changes rescale from the authoritative figure.
    pub fn apply_reported_duration(&self, sentence_index: usize, duration_secs: f64) {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return;
        }
        let mut inner = self.inner.lock();
        if sentence_index >= inner.base_durations.len() {
            return;
        }
        let speed = inner.speed;
        inner.base_durations[sentence_index] = duration_secs * speed;
        inner.table.set_authoritative(sentence_index, duration_secs);
        inner.current_sentence_index = inner.table.resolve(inner.position_seconds);
    }

    /// Take a consistent snapshot of the live state
    pub fn snapshot(&self) -> PlaybackState {
        Self::snapshot_inner(&self.inner.lock())
    }

    fn snapshot_inner(inner: &Inner) -> PlaybackState {
        PlaybackState {
            status: inner.status,
            position_seconds: inner.position_seconds,
            speed: inner.speed,
            current_sentence_index: inner.current_sentence_index,
            session_id: inner.session_id.clone(),
            session_start: inner.session_start,
            total_secs: inner.table.total_secs(),
        }
    }
}

/// The adaptive-speed formula, shared with tests:
/// `min(max_speed, start_speed + floor(minutes / interval) * increment)`
pub fn adaptive_speed_for(config: &PlaybackConfig, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    let increments = (minutes / config.increment_interval_minutes).floor();
    let ramped = config.start_speed + increments * config.speed_increment;
    ramped.min(config.max_speed).clamp(MIN_SPEED, MAX_SPEED)
}
