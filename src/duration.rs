/*!
 * Per-sentence playback duration estimation.
 *
 * Durations are estimated from word counts against a target speaking rate and
 * kept in a prefix-summed table so the playback synchronizer can resolve an
 * elapsed position to a sentence index in O(log n). A synthesis provider may
 * later report an authoritative duration for a span; the table accepts the
 * override and rebuilds its prefix sums, but the estimate is always computed
 * first so sync is available before any audio returns.
 */

use log::debug;

use crate::tokenizer::Sentence;

/// Floor for a single sentence's estimated duration. Guards against
/// degenerate single-word sentences producing near-zero durations that would
/// make seek and sync unstable.
pub const MIN_SENTENCE_DURATION_SECS: f64 = 0.5;

/// Speed deltas smaller than this do not trigger a duration-table recompute
pub const SPEED_EPSILON: f64 = 0.01;

/// Estimates sentence durations from word counts at a target speaking rate
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    target_wpm: f64,
}

impl DurationEstimator {
    /// Create an estimator for the given target words-per-minute rate
    pub fn new(target_wpm: f64) -> Self {
        Self { target_wpm }
    }

    /// The speaking rate this estimator was built with
    pub fn target_wpm(&self) -> f64 {
        self.target_wpm
    }

    /// Estimate a duration for each sentence:
    /// `max(0.5, word_count / target_wpm * 60)` seconds.
    /// An empty slice yields an empty sequence, never an error.
    pub fn estimate(&self, sentences: &[Sentence]) -> Vec<f64> {
        sentences
            .iter()
            .map(|s| self.estimate_one(s.word_count))
            .collect()
    }

    /// Estimate the duration of a single sentence from its word count
    pub fn estimate_one(&self, word_count: usize) -> f64 {
        let raw = word_count as f64 / self.target_wpm * 60.0;
        raw.max(MIN_SENTENCE_DURATION_SECS)
    }
}

/// Ordered per-sentence durations with cumulative prefix sums.
///
/// `cumulative[i]` is the playback time at which sentence `i` begins, so the
/// time-to-sentence mapping is a binary search for the greatest `i` with
/// `cumulative[i] <= position`.
#[derive(Debug, Clone, Default)]
pub struct DurationTable {
    durations: Vec<f64>,
    cumulative: Vec<f64>,
}

impl DurationTable {
    /// Build a table from per-sentence durations
    pub fn from_durations(durations: Vec<f64>) -> Self {
        let mut table = Self {
            durations,
            cumulative: Vec::new(),
        };
        table.rebuild_prefix_sums();
        table
    }

    /// Build an empty table (no document / zero sentences)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of sentences in the table
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// True when the table holds no sentences
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// The per-sentence durations
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Duration of a single sentence, if it exists
    pub fn duration(&self, index: usize) -> Option<f64> {
        self.durations.get(index).copied()
    }

    /// Total playback time covered by the table
    pub fn total_secs(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// The playback time at which the given sentence begins
    pub fn start_of(&self, index: usize) -> Option<f64> {
        self.cumulative.get(index).copied()
    }

    /// Map an elapsed playback position to the active sentence index: the
    /// greatest `i` with `cumulative[i] <= position`. This is the single
    /// authoritative time-to-sentence algorithm, shared by polling lookups
    /// and explicit seeks. An empty table resolves to 0 (an empty document
    /// is already finished, not an error). Positions past the end resolve to
    /// the last sentence; the caller detects "finished" by comparing against
    /// `total_secs`.
    pub fn resolve(&self, position_secs: f64) -> usize {
        if self.cumulative.is_empty() {
            return 0;
        }
        let pos = position_secs.max(0.0);
        // partition_point gives the first index whose start is past `pos`
        let after = self.cumulative.partition_point(|&start| start <= pos);
        after.saturating_sub(1)
    }

    /// Replace one sentence's duration with an authoritative value reported
    /// by the synthesis collaborator and rebuild the prefix sums. Ignored for
    /// out-of-range indices or non-positive values.
    pub fn set_authoritative(&mut self, index: usize, duration_secs: f64) {
        if index >= self.durations.len() || !duration_secs.is_finite() || duration_secs <= 0.0 {
            debug!(
                "Ignoring authoritative duration {duration_secs} for sentence {index} (out of range or invalid)"
            );
            return;
        }
        self.durations[index] = duration_secs;
        self.rebuild_prefix_sums();
    }

    fn rebuild_prefix_sums(&mut self) {
        self.cumulative.clear();
        self.cumulative.reserve(self.durations.len());
        let mut acc = 0.0;
        for &d in &self.durations {
            self.cumulative.push(acc);
            acc += d;
        }
    }
}
