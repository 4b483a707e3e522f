/*!
 * Retry and rate-limit decorator.
 */

use async_trait::async_trait;
use log::warn;
use parking_lot::Mutex;
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;
use crate::translation::model::TranslationRequest;

/// Wraps a provider with exponential-backoff retries and client-side rate
/// limiting
///
/// Only errors classified as retryable are retried. The rate limit is a
/// minimum spacing between calls, shared by every worker using this
/// instance.
#[derive(Debug)]
pub struct RetryingProvider<P> {
    inner: P,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Requests per minute
    rate_limit: Option<u32>,
    /// Earliest instant the next call may start
    next_slot: Mutex<Option<Instant>>,
}

impl<P: TranslationProvider> RetryingProvider<P> {
    pub fn new(inner: P, max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            inner,
            max_retries,
            backoff_base_ms,
            rate_limit: None,
            next_slot: Mutex::new(None),
        }
    }

    /// Limit calls to `rate_limit` requests per minute
    pub fn with_rate_limit(mut self, rate_limit: Option<u32>) -> Self {
        self.rate_limit = rate_limit.filter(|r| *r > 0);
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Backoff before retry number `attempt` (1-based), with up to 25% jitter
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let backoff_ms = self.backoff_base_ms.saturating_mul(1u64 << exponent);
        let max_jitter = backoff_ms / 4;
        let jitter = if max_jitter > 0 {
            rand::rng().random_range(0..=max_jitter)
        } else {
            0
        };
        Duration::from_millis(backoff_ms + jitter)
    }

    /// Reserve the next rate-limit slot and wait for it
    async fn wait_for_slot(&self) {
        let Some(rate_limit) = self.rate_limit else {
            return;
        };
        let spacing = Duration::from_millis(60_000 / rate_limit as u64);

        let wait = {
            let mut next_slot = self.next_slot.lock();
            let now = Instant::now();
            let slot = next_slot.map_or(now, |next| next.max(now));
            *next_slot = Some(slot + spacing);
            slot - now
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

#[async_trait]
impl<P: TranslationProvider> TranslationProvider for RetryingProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let mut attempt = 0;

        loop {
            self.wait_for_slot().await;

            match self.inner.translate(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        "{} failed for '{}' ({}): {} - retry {}/{} in {:?}",
                        self.inner.name(),
                        request.key,
                        request.target_language,
                        e,
                        attempt,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
