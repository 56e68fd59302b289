/*!
 * Application controller for the readflow engine.
 *
 * Ties the pipeline together: ingest a source (positioned blocks or plain
 * text), filter it, build the immutable `Document`, hand it to the playback
 * synchronizer, and construct RSVP schedulers over its token stream. Also
 * drives the optional synthesis prefetch pass that upgrades duration
 * estimates to provider-reported figures.
 */

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::block_classifier::TextBlock;
use crate::content_filter::ContentFilter;
use crate::document::{document_id, extract_title, Document};
use crate::errors::{AppError, DocumentError};
use crate::playback::{PlaybackState, PlaybackSynchronizer};
use crate::scheduler::RsvpScheduler;
use crate::synthesis::{SpeechProvider, SynthesisRequest};

/// Application controller for orchestrating the reading pipeline
pub struct Controller {
    /// Engine configuration
    config: Config,
    /// Content filter built from the configuration
    filter: ContentFilter,
    /// Playback synchronization state machine
    playback: PlaybackSynchronizer,
    /// Optional speech synthesis provider
    provider: Option<Arc<dyn SpeechProvider>>,
}

impl Controller {
    /// Create a new controller with the provided configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let filter = ContentFilter::with_config(config.filtering.clone(), config.zones.clone());
        let playback = PlaybackSynchronizer::new(config.playback.clone());
        Ok(Self {
            config,
            filter,
            playback,
            provider: None,
        })
    }

    /// Create a new controller with default configuration
    pub fn new_with_defaults() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Attach a speech synthesis provider
    pub fn with_provider(mut self, provider: Arc<dyn SpeechProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The playback synchronizer owned by this controller
    pub fn playback(&self) -> &PlaybackSynchronizer {
        &self.playback
    }

    /// Ingest positioned text blocks (a page-layout source). Zone
    /// classification and boilerplate removal run before tokenization.
    pub fn ingest_blocks<P: AsRef<Path>>(
        &self,
        blocks: &[TextBlock],
        source_path: P,
    ) -> Result<Document, AppError> {
        let clean = self.filter.filter_blocks(blocks);
        let raw_head: String = blocks
            .iter()
            .take(10)
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let document = self.assemble(&clean, &raw_head, source_path);
        info!(
            "Ingested {} blocks into '{}': {} words, {} sentences",
            blocks.len(),
            document.title,
            document.word_count(),
            document.sentence_count()
        );
        Ok(document)
    }

    /// Ingest plain running text (a text export with no layout information)
    pub fn ingest_text<P: AsRef<Path>>(
        &self,
        raw_text: &str,
        source_path: P,
    ) -> Result<Document, AppError> {
        let clean = self.filter.filter_text(raw_text);
        let document = self.assemble(&clean, raw_text, source_path);
        info!(
            "Ingested '{}': {} words, {} sentences",
            document.title,
            document.word_count(),
            document.sentence_count()
        );
        Ok(document)
    }

    /// Ingest a plain-text file from disk
    pub fn ingest_file<P: AsRef<Path>>(&self, path: P) -> Result<Document, AppError> {
        let path = path.as_ref();
        let raw_text = std::fs::read_to_string(path).map_err(|e| {
            DocumentError::Unreadable(format!("{}: {}", path.display(), e))
        })?;
        let document = self.ingest_text(&raw_text, path)?;
        if document.is_empty() {
            return Err(DocumentError::NoContent(path.display().to_string()).into());
        }
        Ok(document)
    }

    fn assemble<P: AsRef<Path>>(&self, clean: &str, raw_head: &str, source_path: P) -> Document {
        let path = source_path.as_ref();
        let id = document_id(path);
        let title = extract_title(path, raw_head);
        Document::from_clean_text(clean, id, title, None)
    }

    /// Load a document into the playback synchronizer and return the initial
    /// state snapshot
    pub fn open(&self, document: &Document) -> PlaybackState {
        self.playback.load(document);
        self.playback.snapshot()
    }

    /// Build an RSVP scheduler over the document's token stream at the
    /// configured pace, capped by the wpm ceiling
    pub fn scheduler_for(&self, document: &Document, now: Instant) -> RsvpScheduler {
        let wpm = self
            .config
            .playback
            .rsvp_wpm
            .min(self.config.playback.wpm_max);
        RsvpScheduler::new(document.tokens.clone(), wpm, now)
    }

    /// Prefetch synthesis for every sentence of the document, feeding any
    /// provider-reported durations back into the synchronizer. Individual
    /// sentence failures are logged and skipped; the estimate stays in
    /// effect for those spans.
    pub async fn prefetch_synthesis(&self, document: &Document) -> Result<usize, AppError> {
        let provider = match &self.provider {
            Some(provider) => Arc::clone(provider),
            None => {
                debug!("No synthesis provider attached, skipping prefetch");
                return Ok(0);
            }
        };

        let total = document.sentence_count() as u64;
        let progress = ProgressBar::new(total);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} sentences ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let voice = &self.config.synthesis.voice;
        let rate = self.config.synthesis.speaking_rate;
        let mut synthesized = 0usize;

        for (index, sentence) in document.sentences.iter().enumerate() {
            let mut request = SynthesisRequest::new(&sentence.text, voice).speaking_rate(rate);
            if !self.config.synthesis.language.is_empty() {
                request = request.language(&self.config.synthesis.language);
            }

            match provider.synthesize(request).await {
                Ok(response) => {
                    if let Some(duration) = response.duration_secs {
                        self.playback.apply_reported_duration(index, duration);
                    }
                    synthesized += 1;
                }
                Err(e) => {
                    warn!("Synthesis failed for sentence {index}: {e}");
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Prefetched synthesis for {synthesized} of {} sentences",
            document.sentence_count()
        );
        Ok(synthesized)
    }
}
