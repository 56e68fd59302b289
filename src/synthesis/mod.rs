/*!
 * Speech synthesis provider boundary.
 *
 * The engine never performs synthesis itself; it submits text spans to an
 * external provider and consumes the result (an audio payload and, when the
 * provider knows it, an authoritative duration). The duration estimate is
 * always computed before any request is made, so playback sync works before
 * audio returns; a reported duration is preferred once it arrives.
 */

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::errors::SynthesisError;

/// A text span submitted for synthesis
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Plain text or SSML (detected by a leading `<speak>` tag)
    pub text: String,
    /// Voice name (e.g., "en-US-Neural2-D")
    pub voice: String,
    /// Language code; derived from the voice name when `None`
    pub language: Option<String>,
    /// Speaking rate multiplier
    pub speaking_rate: f64,
}

impl SynthesisRequest {
    /// Create a request with the default speaking rate
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            language: None,
            speaking_rate: 1.0,
        }
    }

    /// Set an explicit language code
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the speaking rate multiplier
    pub fn speaking_rate(mut self, rate: f64) -> Self {
        self.speaking_rate = rate;
        self
    }

    /// Whether the text is SSML rather than plain text
    pub fn is_ssml(&self) -> bool {
        self.text.trim_start().starts_with("<speak>")
    }
}

/// The provider's answer: an audio payload and optional metadata
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// Encoded audio bytes
    pub audio: Bytes,
    /// Audio encoding label (e.g., "MP3")
    pub audio_format: String,
    /// Authoritative playback duration for the span, when the provider
    /// reports one. Preferred over the engine's estimate.
    pub duration_secs: Option<f64>,
}

/// Common trait for all speech synthesis providers
///
/// This trait defines the interface every provider implementation must
/// follow, allowing them to be used interchangeably by the controller.
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug {
    /// Synthesize one text span
    ///
    /// # Arguments
    /// * `request` - The span, voice, and rate to synthesize
    ///
    /// # Returns
    /// * `Result<SynthesisResponse, SynthesisError>` - The audio payload or an error
    async fn synthesize(&self, request: SynthesisRequest)
        -> Result<SynthesisResponse, SynthesisError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), SynthesisError>` - Ok if the provider is reachable
    async fn test_connection(&self) -> Result<(), SynthesisError>;
}

/// Cache key for synthesized audio: sha256 over text, voice, and rate,
/// truncated to 16 hex characters
pub fn cache_key(text: &str, voice: &str, rate: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{text}:{voice}:{rate}").as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

pub mod google;
pub mod mock;
