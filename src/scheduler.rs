/*!
 * Cooperative RSVP tick loop.
 *
 * Advances the active word token at computed intervals, independent of any
 * audio stream. Deadlines come from a monotonic clock handed in by the
 * caller, never wall-clock timestamps, so system clock adjustments and
 * pause/resume gaps cannot cause drift. Each tick is atomic and short;
 * cancelling the loop is simply not calling `tick` again.
 */

use std::time::{Duration, Instant};

use log::debug;

use crate::tokenizer::Token;

/// Outcome of a single scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The current token's deadline has not elapsed yet
    Waiting,
    /// Advanced to the token at this index
    Advanced(usize),
    /// The stream is exhausted; the scheduler stays terminal
    Finished,
}

/// Single-threaded cooperative scheduler for word-by-word display
#[derive(Debug)]
pub struct RsvpScheduler {
    tokens: Vec<Token>,
    base_interval: Duration,
    current: usize,
    deadline: Instant,
    finished: bool,
}

impl RsvpScheduler {
    /// Create a scheduler over a token stream at the given words-per-minute
    /// pace, anchored at `now`. An empty stream starts out finished.
    pub fn new(tokens: Vec<Token>, words_per_minute: f64, now: Instant) -> Self {
        let wpm = if words_per_minute.is_finite() && words_per_minute >= 1.0 {
            words_per_minute
        } else {
            1.0
        };
        let base_interval = Duration::from_millis((60_000.0 / wpm) as u64);
        let finished = tokens.is_empty();
        let mut scheduler = Self {
            tokens,
            base_interval,
            current: 0,
            deadline: now,
            finished,
        };
        if !scheduler.finished {
            scheduler.deadline = now + scheduler.delay_for_current();
        }
        scheduler
    }

    /// Index of the active token
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active token, when the stream is not exhausted
    pub fn current_token(&self) -> Option<&Token> {
        if self.finished {
            None
        } else {
            self.tokens.get(self.current)
        }
    }

    /// Whether the scheduler has reached its terminal state
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Base per-word display interval at the configured pace
    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    /// Display delay for a token: the base interval plus a punctuation pause
    /// (+150 ms for clause marks, +300 ms for sentence terminators)
    pub fn delay_for(&self, token: &Token) -> Duration {
        self.base_interval + Duration::from_millis(token.punctuation.pause_ms())
    }

    fn delay_for_current(&self) -> Duration {
        self.tokens
            .get(self.current)
            .map(|t| self.delay_for(t))
            .unwrap_or(self.base_interval)
    }

    /// Evaluate one tick at monotonic time `now`. Advances past the current
    /// token once its deadline has elapsed; after the last token the
    /// scheduler turns terminal and never wraps.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.finished {
            return Tick::Finished;
        }
        if now < self.deadline {
            return Tick::Waiting;
        }

        self.current += 1;
        if self.current >= self.tokens.len() {
            self.finished = true;
            debug!("RSVP stream exhausted after {} tokens", self.tokens.len());
            return Tick::Finished;
        }

        self.deadline = now + self.delay_for_current();
        Tick::Advanced(self.current)
    }

    /// Jump the active token. The pending deadline is reset to `now` so the
    /// next tick immediately re-evaluates from the new position instead of
    /// honoring a deadline computed against the old one. An index past the
    /// end is clamped to the last token; seeking revives a finished stream.
    pub fn seek(&mut self, index: usize, now: Instant) {
        if self.tokens.is_empty() {
            return;
        }
        self.current = index.min(self.tokens.len() - 1);
        self.deadline = now;
        self.finished = false;
    }

    /// Drive the tick loop with tokio timers, invoking `on_word` for every
    /// displayed token (including the first), until the stream is exhausted.
    /// Used by the CLI simulation; tests exercise `tick` directly with
    /// synthetic clocks.
    pub async fn run<F>(&mut self, mut on_word: F)
    where
        F: FnMut(usize, &Token),
    {
        if let Some(token) = self.current_token() {
            on_word(self.current, token);
        }
        loop {
            let now = Instant::now();
            match self.tick(now) {
                Tick::Advanced(index) => {
                    if let Some(token) = self.tokens.get(index) {
                        on_word(index, token);
                    }
                }
                Tick::Waiting => {
                    let pause = self.deadline.saturating_duration_since(now);
                    tokio::time::sleep(pause).await;
                }
                Tick::Finished => break,
            }
        }
    }
}
