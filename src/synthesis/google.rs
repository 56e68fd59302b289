use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::SynthesisConfig;
use crate::errors::SynthesisError;
use crate::synthesis::{SpeechProvider, SynthesisRequest, SynthesisResponse};

/// Google Cloud Text-to-Speech client
#[derive(Debug)]
pub struct GoogleTts {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Synthesis input: exactly one of text or ssml
#[derive(Debug, Serialize)]
struct SynthesisInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssml: Option<String>,
}

/// Voice selection parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
}

/// Audio output configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
    speaking_rate: f64,
}

/// Request body for the text:synthesize endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

/// Response body: base64-encoded audio
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSynthesizeResponse {
    audio_content: String,
}

impl GoogleTts {
    /// Create a new Google TTS client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client from the synthesis configuration
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.endpoint.clone(),
            config.timeout_secs,
        )
    }

    fn synthesize_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://texttospeech.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1/text:synthesize?key={}", base, self.api_key)
    }

    /// Derive a language code from a voice name: "en-US-Neural2-D" -> "en-US".
    /// Falls back to "en-US" when the leading segment is not a known
    /// ISO 639-1 code.
    pub fn language_code_for_voice(voice: &str) -> String {
        let parts: Vec<&str> = voice.split('-').collect();
        if parts.len() >= 2 && isolang::Language::from_639_1(parts[0]).is_some() {
            format!("{}-{}", parts[0], parts[1])
        } else {
            "en-US".to_string()
        }
    }

    fn build_body(request: &SynthesisRequest) -> GoogleSynthesizeRequest {
        let input = if request.is_ssml() {
            SynthesisInput {
                text: None,
                ssml: Some(request.text.clone()),
            }
        } else {
            SynthesisInput {
                text: Some(request.text.clone()),
                ssml: None,
            }
        };

        let language_code = request
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| Self::language_code_for_voice(&request.voice));

        GoogleSynthesizeRequest {
            input,
            voice: VoiceSelection {
                language_code,
                name: request.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3".to_string(),
                speaking_rate: request.speaking_rate,
            },
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleTts {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let body = Self::build_body(&request);
        let response = self
            .client
            .post(self.synthesize_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google TTS API error ({}): {}", status, error_text);
            return Err(SynthesisError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response
            .json::<GoogleSynthesizeResponse>()
            .await
            .map_err(|e| SynthesisError::ParseError(e.to_string()))?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(parsed.audio_content.as_bytes())
            .map_err(|e| SynthesisError::ParseError(format!("Invalid base64 audio: {e}")))?;

        // The REST API does not report playback length; the caller keeps
        // using the engine's estimate for this span
        Ok(SynthesisResponse {
            audio: Bytes::from(audio),
            audio_format: "MP3".to_string(),
            duration_secs: None,
        })
    }

    async fn test_connection(&self) -> Result<(), SynthesisError> {
        let request = SynthesisRequest::new("Hello", "en-US-Neural2-D");
        self.synthesize(request).await?;
        Ok(())
    }
}
