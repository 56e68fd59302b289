/*!
 * Mock speech provider for testing.
 *
 * Simulates different provider behaviors:
 * - `MockSpeechProvider::working()` - succeeds and reports a duration
 * - `MockSpeechProvider::estimate_only()` - succeeds without a duration
 * - `MockSpeechProvider::failing()` - always fails
 * - `MockSpeechProvider::slow(ms)` - succeeds after a delay
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::SynthesisError;
use crate::synthesis::{SpeechProvider, SynthesisRequest, SynthesisResponse};

/// Speaking rate the mock's reported durations are based on, in wpm
const MOCK_BASE_WPM: f64 = 150.0;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Succeeds and reports an authoritative duration
    Working,
    /// Succeeds but reports no duration (estimate stays in effect)
    EstimateOnly,
    /// Always fails with a request error
    Failing,
    /// Succeeds after a simulated delay (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for exercising synthesis-dependent behavior in tests
#[derive(Debug)]
pub struct MockSpeechProvider {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockSpeechProvider {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Working mock that reports word-count-derived durations
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Mock that returns audio without a duration
    pub fn estimate_only() -> Self {
        Self::new(MockBehavior::EstimateOnly)
    }

    /// Mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that succeeds after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of synthesize calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The duration a working mock reports for a span: word count against a
    /// fixed base rate, divided by the requested speaking rate
    pub fn reported_duration(text: &str, speaking_rate: f64) -> f64 {
        let words = text.split_whitespace().count() as f64;
        let rate = if speaking_rate > 0.0 { speaking_rate } else { 1.0 };
        (words / MOCK_BASE_WPM * 60.0) / rate
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResponse, SynthesisError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if request.text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        match self.behavior {
            MockBehavior::Failing => Err(SynthesisError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::fake_audio(&request, true))
            }
            MockBehavior::Working => Ok(Self::fake_audio(&request, true)),
            MockBehavior::EstimateOnly => Ok(Self::fake_audio(&request, false)),
        }
    }

    async fn test_connection(&self) -> Result<(), SynthesisError> {
        match self.behavior {
            MockBehavior::Failing => Err(SynthesisError::ConnectionError(
                "mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl MockSpeechProvider {
    fn fake_audio(request: &SynthesisRequest, with_duration: bool) -> SynthesisResponse {
        let duration = if with_duration {
            Some(Self::reported_duration(&request.text, request.speaking_rate))
        } else {
            None
        };
        SynthesisResponse {
            audio: Bytes::from(format!("MOCK:{}", request.text)),
            audio_format: "MP3".to_string(),
            duration_secs: duration,
        }
    }
}
