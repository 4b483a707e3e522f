/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::slow(ms)` - Succeeds after a delay (for timeout testing)
 * - `MockProvider::panicking()` - Panics inside the call
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;
use crate::translation::model::TranslationRequest;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Always fails with an error
    Failing,
    /// Fails for one catalog key, succeeds for every other
    FailOnKey(String),
    /// Fails for every request targeting one language
    FailOnLanguage(String),
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Fails the first N requests with a retryable error, then succeeds
    FailTimes(usize),
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
    /// Panics inside the provider call
    Panicking,
}

/// Mock provider for testing translation behavior
///
/// Clones share the call counter and the call log.
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Extra latency added to every call
    delay_ms: u64,
    request_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay_ms: 0,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_on_key(key: &str) -> Self {
        Self::new(MockBehavior::FailOnKey(key.to_string()))
    }

    pub fn fail_on_language(language: &str) -> Self {
        Self::new(MockBehavior::FailOnLanguage(language.to_string()))
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn fail_times(failures: usize) -> Self {
        Self::new(MockBehavior::FailTimes(failures))
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn panicking() -> Self {
        Self::new(MockBehavior::Panicking)
    }

    /// Add latency to every call, whatever the behavior
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Text the working behaviors return for a request
    pub fn expected_translation(request: &TranslationRequest) -> String {
        format!("[TRANSLATED to {}] {}", request.target_language, request.text)
    }

    /// Number of calls made so far, across clones
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Every request received so far, in call order
    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().clone()
    }

    fn simulated_failure(message: String) -> ProviderError {
        ProviderError::ApiError {
            message,
            status_code: 500,
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(request.clone());

        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }

        match &self.behavior {
            MockBehavior::Working => Ok(Self::expected_translation(request)),

            MockBehavior::Failing => Err(Self::simulated_failure(
                "Simulated provider failure".to_string(),
            )),

            MockBehavior::FailOnKey(key) if *key == request.key => Err(Self::simulated_failure(
                format!("Simulated failure for key '{}'", key),
            )),

            MockBehavior::FailOnLanguage(language) if *language == request.target_language => {
                Err(Self::simulated_failure(format!(
                    "Simulated failure for language {}",
                    language
                )))
            }

            MockBehavior::FailOnKey(_) | MockBehavior::FailOnLanguage(_) => {
                Ok(Self::expected_translation(request))
            }

            MockBehavior::Intermittent { fail_every } => {
                let fail_every = (*fail_every).max(1);
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::expected_translation(request))
                }
            }

            MockBehavior::FailTimes(failures) => {
                if count < *failures {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated transient failure (request #{})",
                        count + 1
                    )))
                } else {
                    Ok(Self::expected_translation(request))
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(Self::expected_translation(request))
            }

            MockBehavior::Panicking => panic!("Simulated provider panic for key '{}'", request.key),
        }
    }
}
